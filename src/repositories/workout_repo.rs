use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, UpdateWorkout, Workout};

/// Workout persistence. Every query that touches an existing row is
/// parameterized by owner id, so another user's workout behaves exactly
/// like a missing one.
#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: &str,
        title: &str,
        reps: i64,
        load: f64,
    ) -> Result<Workout> {
        let now = Utc::now();
        let workout = Workout {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            reps,
            load,
            created_at: now,
            updated_at: now,
        };
        let workout_clone = workout.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO workouts (id, user_id, title, reps, load, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    workout_clone.id,
                    workout_clone.user_id,
                    workout_clone.title,
                    workout_clone.reps,
                    workout_clone.load,
                    workout_clone.created_at,
                    workout_clone.updated_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(workout)
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<Workout>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn
                .prepare("SELECT * FROM workouts WHERE user_id = ? ORDER BY created_at DESC")?;
            let workouts = stmt
                .query_map([&user_id], Workout::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(workouts)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_for_user(&self, id: &str, user_id: &str) -> Result<Option<Workout>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM workouts WHERE id = ? AND user_id = ?")?;
            let result = stmt
                .query_row([&id, &user_id], Workout::from_row)
                .optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Apply a partial update; absent fields keep their stored values.
    /// Returns the updated row, or `None` when no owned row matched.
    pub async fn update_for_user(
        &self,
        id: &str,
        user_id: &str,
        patch: UpdateWorkout,
    ) -> Result<Option<Workout>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        let now = Utc::now();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let changed = conn.execute(
                "UPDATE workouts
                 SET title = COALESCE(?, title),
                     reps = COALESCE(?, reps),
                     load = COALESCE(?, load),
                     updated_at = ?
                 WHERE id = ? AND user_id = ?",
                rusqlite::params![patch.title, patch.reps, patch.load, now, id, user_id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            let mut stmt = conn.prepare("SELECT * FROM workouts WHERE id = ? AND user_id = ?")?;
            let result = stmt
                .query_row([&id, &user_id], Workout::from_row)
                .optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete_for_user(&self, id: &str, user_id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM workouts WHERE id = ? AND user_id = ?",
                [&id, &user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
