use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AppError;
use crate::repositories::UserRepository;
use crate::token::TokenService;

/// The authenticated caller, resolved from the `Authorization` header.
///
/// Extracting this runs the whole auth gate: parse the bearer token,
/// verify it, and resolve the embedded user id to an existing user row.
/// Any failure along the way rejects the request with 401 before the
/// handler runs.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = bearer_token(header).ok_or(AppError::Unauthorized)?;

        let token_service = parts
            .extensions
            .get::<TokenService>()
            .cloned()
            .ok_or_else(|| AppError::Internal("token service not configured".to_string()))?;
        let user_repo = parts
            .extensions
            .get::<UserRepository>()
            .cloned()
            .ok_or_else(|| AppError::Internal("user repository not configured".to_string()))?;

        let user_id = token_service.verify(token)?;

        // A token that outlives its user no longer authenticates anyone
        let user = user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser { id: user.id })
    }
}

/// Pull the token out of an `Authorization` header value. The scheme
/// keyword is matched case-insensitively.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
