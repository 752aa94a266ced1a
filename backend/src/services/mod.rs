//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the health-metric engine.

pub mod meal;
pub mod profile;
pub mod user;

pub use meal::MealService;
pub use profile::ProfileService;
pub use user::UserService;
