use axum::extract::State;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::extractors::Json;
use crate::models::user::email_looks_valid;
use crate::models::Credentials;
use crate::repositories::UserRepository;
use crate::token::TokenService;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone)]
pub struct UsersState {
    pub user_repo: UserRepository,
    pub token_service: TokenService,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub email: String,
    pub token: String,
}

pub async fn signup(
    State(state): State<UsersState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthResponse>> {
    let (email, password) = credentials
        .require_both()
        .ok_or_else(|| AppError::Validation("all fields must be filled".to_string()))?;

    if !email_looks_valid(email) {
        return Err(AppError::Validation("email is not valid".to_string()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(
            "password is not strong enough".to_string(),
        ));
    }

    let user = state.user_repo.create(email, password).await?;
    let token = state.token_service.issue(&user.id)?;

    tracing::info!("New signup: {}", user.email);

    Ok(Json(AuthResponse {
        email: user.email,
        token,
    }))
}

pub async fn login(
    State(state): State<UsersState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthResponse>> {
    let (email, password) = credentials
        .require_both()
        .ok_or_else(|| AppError::Validation("all fields must be filled".to_string()))?;

    // One response for unknown email and wrong password alike
    let user = state
        .user_repo
        .verify_credentials(email, password)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let token = state.token_service.issue(&user.id)?;

    Ok(Json(AuthResponse {
        email: user.email,
        token,
    }))
}
