//! API request and response types

use crate::health_metrics::{AppliedDefault, BmiResult, HealthMetrics, Sex};
use crate::models::{Meal, UserProfile};
use crate::nutrition::{CalorieProgress, NutritionTotals};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Auth Types
// ============================================================================

/// Authentication tokens response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Signed-in account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Profile Types
// ============================================================================

/// Partial profile update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub activity_level: Option<String>,
    #[serde(default)]
    pub dietary_preferences: Option<Vec<String>>,
    #[serde(default)]
    pub health_goals: Option<Vec<String>>,
}

/// Profile with the metrics derived from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
    pub metrics: HealthMetrics,
}

// ============================================================================
// Calculator Types
// ============================================================================

/// Ad hoc BMI calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiCalculatorRequest {
    pub weight_kg: f64,
    pub height_cm: f64,
}

/// BMI calculation with its recommendation text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiCalculatorResponse {
    #[serde(flatten)]
    pub result: BmiResult,
    pub recommendation: String,
}

/// Ad hoc calorie estimate
///
/// The activity level is free text; unknown values fall back to sedentary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieRequest {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: i32,
    pub gender: Sex,
    pub activity_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieResponse {
    pub daily_calories: u32,
    pub bmr: f64,
    pub multiplier: f64,
    pub activity_level: String,
    pub activity_description: String,
    pub defaults_applied: Vec<AppliedDefault>,
}

// ============================================================================
// Meal Types
// ============================================================================

/// Meal log request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMealRequest {
    pub meal_name: String,
    /// One of breakfast, lunch, dinner, snack
    pub meal_type: String,
    pub calories: f64,
    #[serde(default)]
    pub protein_g: Option<f64>,
    #[serde(default)]
    pub carbs_g: Option<f64>,
    #[serde(default)]
    pub fats_g: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Defaults to now
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Meal list, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealListResponse {
    pub data: Vec<Meal>,
    pub count: usize,
}

/// Date query parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

/// Totals for one day against the estimated requirement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummaryResponse {
    pub date: NaiveDate,
    pub totals: NutritionTotals,
    pub progress: CalorieProgress,
    pub meals: Vec<Meal>,
}
