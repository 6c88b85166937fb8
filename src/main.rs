use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use liftapi::config::Config;
use liftapi::handlers::{users, workouts};
use liftapi::repositories::{UserRepository, WorkoutRepository};
use liftapi::token::TokenService;
use liftapi::{db, migrations, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "liftapi=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Connecting to database: {}", config.database_url);

    // Create database pool
    let pool = db::create_pool(&config.database_url)?;

    // Run migrations
    migrations::run_migrations(&pool)?;

    // Token service for issuing and verifying bearer tokens
    let token_service = TokenService::new(&config.jwt_secret);

    // Create repositories
    let user_repo = UserRepository::new(pool.clone());
    let workout_repo = WorkoutRepository::new(pool.clone());

    // Create handler states
    let users_state = users::UsersState {
        user_repo: user_repo.clone(),
        token_service: token_service.clone(),
    };
    let workouts_state = workouts::WorkoutsState {
        workout_repo: workout_repo.clone(),
    };

    // Build router
    let app = routes::create_router(users_state, workouts_state, token_service, user_repo);

    // Start server
    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
