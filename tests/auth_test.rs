mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use liftapi::token::TokenService;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn test_workout_endpoints_require_auth() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    for (method, uri) in [
        ("GET", "/api/workouts".to_string()),
        ("POST", "/api/workouts".to_string()),
        ("GET", format!("/api/workouts/{}", Uuid::new_v4())),
        ("PATCH", format!("/api/workouts/{}", Uuid::new_v4())),
        ("DELETE", format!("/api/workouts/{}", Uuid::new_v4())),
    ] {
        let response = common::send(&app, method, &uri, None, None).await;
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} without a token",
            method,
            uri
        );

        let body = common::body_json(response).await;
        assert_eq!(body["error"], "request is not authorized");
    }
}

#[tokio::test]
async fn test_wrong_auth_scheme_is_rejected() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let token = common::signup(&app, "a@b.com", "Abc123!@x").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/workouts")
                .header("Authorization", format!("Basic {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_scheme_is_case_insensitive() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let token = common::signup(&app, "a@b.com", "Abc123!@x").await;

    for scheme in ["bearer", "Bearer", "BEARER"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/workouts")
                    .header("Authorization", format!("{} {}", scheme, token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "scheme {:?}", scheme);
    }
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = common::send(
        &app,
        "GET",
        "/api/workouts",
        Some("definitely.not.ajwt"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    common::signup(&app, "a@b.com", "Abc123!@x").await;

    let forged = TokenService::new("some-other-secret")
        .issue(&Uuid::new_v4().to_string())
        .unwrap();

    let response = common::send(&app, "GET", "/api/workouts", Some(&forged), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_for_unknown_user_is_rejected() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    // Correctly signed, but the subject never signed up
    let token = TokenService::new(common::TEST_SECRET)
        .issue(&Uuid::new_v4().to_string())
        .unwrap();

    let response = common::send(&app, "GET", "/api/workouts", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
