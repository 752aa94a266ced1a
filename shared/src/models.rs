//! Data models for the health tracker

use crate::health_metrics::{BodyMeasurements, Sex};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// User profile as stored and returned by the profile service
///
/// A new profile only carries the account identity; every measurement is
/// filled in later by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: Uuid,
    pub email: String,
    pub age: Option<i32>,
    pub gender: Option<Sex>,
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    pub health_goals: Vec<String>,
    /// Stored as free text; resolved leniently by the calorie estimator
    pub activity_level: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Empty profile for a freshly registered account
    pub fn new(uid: Uuid, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            uid,
            email: email.into(),
            age: None,
            gender: None,
            weight_kg: None,
            height_cm: None,
            dietary_preferences: Vec::new(),
            health_goals: Vec::new(),
            activity_level: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Inputs for the health-metric calculations
    pub fn measurements(&self) -> BodyMeasurements {
        BodyMeasurements {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age_years: self.age,
            sex: self.gender,
            activity_level: self.activity_level.clone(),
        }
    }
}

/// Meal slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealType::ALL
            .into_iter()
            .find(|meal_type| meal_type.as_str() == s)
            .ok_or_else(|| format!("Unknown meal type: {}", s))
    }
}

/// Logged meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meal_name: String,
    pub meal_type: MealType,
    pub calories: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fats_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the meal was eaten
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
