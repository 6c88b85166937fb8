use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::extractors::Json;
use crate::middleware::AuthUser;
use crate::models::{CreateWorkout, UpdateWorkout, Workout};
use crate::repositories::WorkoutRepository;

#[derive(Clone)]
pub struct WorkoutsState {
    pub workout_repo: WorkoutRepository,
}

pub async fn create(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Json(body): Json<CreateWorkout>,
) -> Result<Response> {
    let (title, reps, load) = body.validate()?;

    let workout = state
        .workout_repo
        .create(&auth_user.id, &title, reps, load)
        .await?;

    Ok((StatusCode::CREATED, Json(workout)).into_response())
}

pub async fn list(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Workout>>> {
    let workouts = state.workout_repo.find_by_user(&auth_user.id).await?;
    Ok(Json(workouts))
}

pub async fn get_one(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Workout>> {
    let id = parse_workout_id(&id)?;

    let workout = state
        .workout_repo
        .find_for_user(&id, &auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("workout not found".to_string()))?;

    Ok(Json(workout))
}

pub async fn update(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateWorkout>,
) -> Result<Json<Workout>> {
    let id = parse_workout_id(&id)?;
    let patch = body.validate()?;

    let workout = state
        .workout_repo
        .update_for_user(&id, &auth_user.id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("workout not found".to_string()))?;

    Ok(Json(workout))
}

pub async fn delete(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_workout_id(&id)?;

    let deleted = state
        .workout_repo
        .delete_for_user(&id, &auth_user.id)
        .await?;
    if !deleted {
        return Err(AppError::NotFound("workout not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn parse_workout_id(id: &str) -> Result<String> {
    Uuid::parse_str(id)
        .map(|u| u.to_string())
        .map_err(|_| AppError::Validation("invalid workout id".to_string()))
}
