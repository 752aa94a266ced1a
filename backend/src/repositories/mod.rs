//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod meal;
pub mod profile;
pub mod user;

pub use meal::{CreateMeal, MealRecord, MealRepository};
pub use profile::{ProfileRecord, ProfileRepository, UpdateProfile};
pub use user::{UserRecord, UserRepository};
