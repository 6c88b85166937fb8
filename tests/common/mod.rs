use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use liftapi::db::{create_memory_pool, DbPool};
use liftapi::handlers::{users, workouts};
use liftapi::migrations::run_migrations_for_tests;
use liftapi::repositories::{UserRepository, WorkoutRepository};
use liftapi::token::TokenService;

pub const TEST_SECRET: &str = "test-secret";

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    let token_service = TokenService::new(TEST_SECRET);
    let user_repo = UserRepository::new(pool.clone());
    let workout_repo = WorkoutRepository::new(pool.clone());

    let users_state = users::UsersState {
        user_repo: user_repo.clone(),
        token_service: token_service.clone(),
    };
    let workouts_state = workouts::WorkoutsState { workout_repo };

    liftapi::routes::create_router(users_state, workouts_state, token_service, user_repo)
}

/// Send one request, optionally with a bearer token and a JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("bearer {}", token));
    }
    let request = match body {
        Some(value) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "response body is not JSON ({}): {}",
            e,
            String::from_utf8_lossy(&bytes)
        )
    })
}

/// Sign up a fresh user and return their bearer token.
pub async fn signup(app: &Router, email: &str, password: &str) -> String {
    let response = send(
        app,
        "POST",
        "/api/user/signup",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert!(
        response.status().is_success(),
        "signup failed: {}",
        response.status()
    );

    let body = body_json(response).await;
    body["token"].as_str().expect("signup token").to_string()
}

/// Create a workout and return its JSON representation.
pub async fn create_workout(
    app: &Router,
    token: &str,
    title: &str,
    reps: i64,
    load: f64,
) -> Value {
    let response = send(
        app,
        "POST",
        "/api/workouts",
        Some(token),
        Some(json!({ "title": title, "reps": reps, "load": load })),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await
}
