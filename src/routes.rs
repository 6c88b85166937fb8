use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::handlers::{health, users, workouts};
use crate::repositories::UserRepository;
use crate::token::TokenService;

pub fn create_router(
    users_state: users::UsersState,
    workouts_state: workouts::WorkoutsState,
    token_service: TokenService,
    user_repo: UserRepository,
) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // User routes (no auth)
        .route("/api/user/signup", post(users::signup))
        .route("/api/user/login", post(users::login))
        .with_state(users_state)
        // Workout routes, all behind the auth gate
        .route(
            "/api/workouts",
            get(workouts::list).post(workouts::create),
        )
        .route(
            "/api/workouts/{id}",
            get(workouts::get_one)
                .patch(workouts::update)
                .delete(workouts::delete),
        )
        .with_state(workouts_state)
        // Auth gate collaborators via Extension layers
        .layer(Extension(token_service))
        .layer(Extension(user_repo))
}
