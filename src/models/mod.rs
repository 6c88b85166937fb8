pub mod from_row;
pub mod user;
pub mod workout;

pub use from_row::FromSqliteRow;
pub use user::{Credentials, User};
pub use workout::{CreateWorkout, UpdateWorkout, Workout};
