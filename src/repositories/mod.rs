pub mod user_repo;
pub mod workout_repo;

pub use user_repo::UserRepository;
pub use workout_repo::WorkoutRepository;
