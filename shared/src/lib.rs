//! Health Tracker Shared Library
//!
//! This crate contains the health-metric engine (BMI and daily calorie
//! estimation) along with the models, validation and API types shared by
//! the backend and WASM modules.

pub mod errors;
pub mod health_metrics;
pub mod models;
pub mod nutrition;
pub mod session;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::*;
pub use models::{Meal, MealType, UserProfile};
pub use nutrition::*;
pub use session::*;
pub use types::*;
