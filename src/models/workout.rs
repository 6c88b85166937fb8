use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize)]
pub struct Workout {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub reps: i64,
    pub load: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromSqliteRow for Workout {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            title: row.get("title")?,
            reps: row.get("reps")?,
            load: row.get("load")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Create request body. All three fields are required; they are optional
/// here so the handler can report every missing field in one response.
#[derive(Debug, Deserialize)]
pub struct CreateWorkout {
    pub title: Option<String>,
    pub reps: Option<i64>,
    pub load: Option<f64>,
}

impl CreateWorkout {
    pub fn validate(self) -> Result<(String, i64, f64)> {
        let mut empty_fields = Vec::new();

        let title = self.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        if title.is_none() {
            empty_fields.push("title");
        }
        if self.reps.is_none() {
            empty_fields.push("reps");
        }
        if self.load.is_none() {
            empty_fields.push("load");
        }

        if !empty_fields.is_empty() {
            return Err(AppError::Validation(format!(
                "please fill in all the fields: {}",
                empty_fields.join(", ")
            )));
        }

        let (title, reps, load) = (title.unwrap(), self.reps.unwrap(), self.load.unwrap());
        check_reps(reps)?;
        check_load(load)?;
        Ok((title, reps, load))
    }
}

/// Patch request body; absent fields keep their prior values.
#[derive(Debug, Deserialize)]
pub struct UpdateWorkout {
    pub title: Option<String>,
    pub reps: Option<i64>,
    pub load: Option<f64>,
}

impl UpdateWorkout {
    pub fn validate(self) -> Result<Self> {
        let title = match self.title {
            Some(t) => {
                let t = t.trim().to_string();
                if t.is_empty() {
                    return Err(AppError::Validation("title must not be empty".to_string()));
                }
                Some(t)
            }
            None => None,
        };
        if let Some(reps) = self.reps {
            check_reps(reps)?;
        }
        if let Some(load) = self.load {
            check_load(load)?;
        }
        Ok(Self {
            title,
            reps: self.reps,
            load: self.load,
        })
    }
}

fn check_reps(reps: i64) -> Result<()> {
    if reps <= 0 {
        return Err(AppError::Validation(
            "reps must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

fn check_load(load: f64) -> Result<()> {
    if !load.is_finite() || load < 0.0 {
        return Err(AppError::Validation(
            "load must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}
