//! Health metrics calculations module
//!
//! Provides the BMI classifier and the Mifflin-St Jeor daily calorie
//! estimator, plus the composition of both into the snapshot shown on the
//! profile and metrics screens.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Explicit Defaults**: Fallbacks (unknown activity level, sex without a
//!    formula) are reported in the result instead of applied silently
//! 3. **Rejected Input**: Non-positive or non-finite measurements are errors,
//!    never `NaN`/`Infinity` in the output

use crate::errors::MetricsError;
use crate::validation::get_missing_fields_labels;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

// ============================================================================
// Profile Enumerations
// ============================================================================

/// Sex as recorded on the user profile
///
/// `Other` is accepted by the profile but has no BMR formula of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Male, Sex::Female, Sex::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Other => "other",
        }
    }

    /// BMR formula used for this sex, with the default applied (if any)
    pub fn bmr_formula(&self) -> (BmrFormula, Option<AppliedDefault>) {
        match self {
            Sex::Male => (BmrFormula::Male, None),
            Sex::Female => (BmrFormula::Female, None),
            Sex::Other => (
                BmrFormula::Female,
                Some(AppliedDefault::SexFormula {
                    sex: Sex::Other,
                    formula: BmrFormula::Female,
                }),
            ),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            "other" => Ok(Sex::Other),
            _ => Err(format!("Unknown sex: {}", s)),
        }
    }
}

/// Mifflin-St Jeor variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmrFormula {
    Male,
    Female,
}

impl BmrFormula {
    /// Constant term added to the shared part of the equation
    pub fn constant(&self) -> f64 {
        match self {
            BmrFormula::Male => 5.0,
            BmrFormula::Female => -161.0,
        }
    }
}

/// Activity level for the calorie estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Exercise 1-3 days/week
    Light,
    /// Exercise 3-5 days/week
    Moderate,
    /// Exercise 6-7 days/week
    Active,
    /// Intense exercise daily
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Get the activity multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::Light => "Exercise 1-3 days/week",
            ActivityLevel::Moderate => "Exercise 3-5 days/week",
            ActivityLevel::Active => "Exercise 6-7 days/week",
            ActivityLevel::VeryActive => "Intense exercise daily",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// Resolve a stored activity string, falling back to `Sedentary`
    ///
    /// The fallback is returned alongside the level so callers can surface it.
    pub fn resolve(value: &str) -> (ActivityLevel, Option<AppliedDefault>) {
        match value.parse() {
            Ok(level) => (level, None),
            Err(_) => (
                ActivityLevel::Sedentary,
                Some(AppliedDefault::UnrecognizedActivityLevel {
                    value: value.to_string(),
                }),
            ),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| format!("Unknown activity level: {}", s))
    }
}

/// A fallback the calculation applied instead of failing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppliedDefault {
    /// Activity string did not match a known level; sedentary was used
    UnrecognizedActivityLevel { value: String },
    /// Sex has no formula of its own; `formula` was used instead
    SexFormula { sex: Sex, formula: BmrFormula },
    /// Stored measurements could not produce a calorie estimate; calories stay at 0
    CaloriesUnavailable { field: String },
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obese")]
    Obese,
}

impl BmiCategory {
    /// Classify a raw (unrounded) BMI value
    ///
    /// Bands are half-open with an inclusive lower bound.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::NormalWeight
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    /// Get the BMI range for this category
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, 18.5),
            BmiCategory::NormalWeight => (18.5, 25.0),
            BmiCategory::Overweight => (25.0, 30.0),
            BmiCategory::Obese => (30.0, f64::INFINITY),
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Recommendation text shown next to the category
    pub fn recommendation(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => {
                "Consider consulting a healthcare provider about healthy weight gain strategies."
            }
            BmiCategory::NormalWeight => {
                "Great job! Maintain your healthy lifestyle with balanced nutrition and regular exercise."
            }
            BmiCategory::Overweight => {
                "Consider a balanced diet and regular physical activity to reach a healthier weight."
            }
            BmiCategory::Obese => {
                "Consult with a healthcare provider for personalized guidance on healthy weight management."
            }
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BmiCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Underweight" => Ok(BmiCategory::Underweight),
            "Normal weight" => Ok(BmiCategory::NormalWeight),
            "Overweight" => Ok(BmiCategory::Overweight),
            "Obese" => Ok(BmiCategory::Obese),
            _ => Err(format!("Unknown BMI category: {}", s)),
        }
    }
}

/// BMI calculation result
///
/// `daily_calories` is 0 until composed with a calorie estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// BMI rounded to one decimal place
    pub bmi: f64,
    /// Category of the unrounded BMI
    pub category: BmiCategory,
    /// Estimated maintenance calories (kcal/day)
    pub daily_calories: u32,
}

impl BmiResult {
    pub fn with_daily_calories(self, daily_calories: u32) -> Self {
        Self {
            daily_calories,
            ..self
        }
    }
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), MetricsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MetricsError::invalid(field, value))
    }
}

/// Round to one decimal place, halves away from zero
pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Calculate BMI from weight and height, unrounded and unchecked
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn raw_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Calculate and classify BMI
///
/// Classification uses the raw value, so a BMI of 24.996 displays as 25.0
/// but stays "Normal weight".
pub fn classify_bmi(weight_kg: f64, height_cm: f64) -> Result<BmiResult, MetricsError> {
    ensure_positive("weight_kg", weight_kg)?;
    ensure_positive("height_cm", height_cm)?;

    let bmi = raw_bmi(weight_kg, height_cm);

    Ok(BmiResult {
        bmi: round_to_one_decimal(bmi),
        category: BmiCategory::from_bmi(bmi),
        daily_calories: 0,
    })
}

// ============================================================================
// BMR and Daily Calories
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn basal_metabolic_rate(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    formula: BmrFormula,
) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64 + formula.constant()
}

/// Daily calorie estimate with breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieEstimate {
    /// Estimated maintenance calories, rounded to the nearest kcal
    pub kcal: u32,
    /// Basal Metabolic Rate
    pub bmr: f64,
    /// Activity multiplier used
    pub multiplier: f64,
    pub activity_level: ActivityLevel,
    pub formula: BmrFormula,
    /// Fallbacks applied while resolving sex and activity level
    pub defaults_applied: Vec<AppliedDefault>,
}

/// Estimate daily calories with the full breakdown
pub fn estimate_daily_calories_detailed(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    sex: Sex,
    activity_level: &str,
) -> Result<CalorieEstimate, MetricsError> {
    ensure_positive("weight_kg", weight_kg)?;
    ensure_positive("height_cm", height_cm)?;
    if age_years <= 0 {
        return Err(MetricsError::invalid("age_years", age_years as f64));
    }

    let mut defaults_applied = Vec::new();

    let (formula, sex_default) = sex.bmr_formula();
    if let Some(applied) = sex_default {
        warn!(sex = %sex, ?formula, "No BMR formula for sex, using fallback formula");
        defaults_applied.push(applied);
    }

    let (level, activity_default) = ActivityLevel::resolve(activity_level);
    if let Some(applied) = activity_default {
        warn!(activity_level, "Unrecognized activity level, using sedentary multiplier");
        defaults_applied.push(applied);
    }

    let bmr = basal_metabolic_rate(weight_kg, height_cm, age_years, formula);
    if !(bmr > 0.0) {
        return Err(MetricsError::invalid("bmr", bmr));
    }

    let multiplier = level.multiplier();
    let kcal = (bmr * multiplier).round();
    if !(kcal <= u32::MAX as f64) {
        return Err(MetricsError::OutOfRange {
            field: "daily_calories",
            value: kcal,
        });
    }

    Ok(CalorieEstimate {
        kcal: kcal as u32,
        bmr,
        multiplier,
        activity_level: level,
        formula,
        defaults_applied,
    })
}

/// Estimate maintenance calories (kcal/day)
///
/// Unknown activity strings fall back to the sedentary multiplier.
pub fn estimate_daily_calories(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    sex: Sex,
    activity_level: &str,
) -> Result<u32, MetricsError> {
    estimate_daily_calories_detailed(weight_kg, height_cm, age_years, sex, activity_level)
        .map(|estimate| estimate.kcal)
}

// ============================================================================
// Combined Metrics
// ============================================================================

/// Measurements taken from a stored profile; any of them may be unset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurements {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age_years: Option<i32>,
    pub sex: Option<Sex>,
    pub activity_level: Option<String>,
}

/// BMI and calorie snapshot for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    /// `None` until weight and height are known
    pub bmi: Option<BmiResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_description: Option<String>,
    pub defaults_applied: Vec<AppliedDefault>,
    /// Profile fields needed for the full snapshot
    pub missing_fields: Vec<String>,
    /// Display labels for `missing_fields`, same order
    #[serde(default)]
    pub missing_field_labels: Vec<String>,
}

/// Compose the BMI result with the calorie estimate when the profile allows
pub fn compute_health_metrics(
    measurements: &BodyMeasurements,
) -> Result<HealthMetrics, MetricsError> {
    let activity_level = measurements
        .activity_level
        .as_deref()
        .filter(|level| !level.is_empty());

    let mut missing_fields = Vec::new();
    if measurements.weight_kg.is_none() {
        missing_fields.push("weight".to_string());
    }
    if measurements.height_cm.is_none() {
        missing_fields.push("height".to_string());
    }
    if measurements.age_years.is_none() {
        missing_fields.push("age".to_string());
    }
    if measurements.sex.is_none() {
        missing_fields.push("gender".to_string());
    }
    if activity_level.is_none() {
        missing_fields.push("activity_level".to_string());
    }

    let activity_description = activity_level
        .and_then(|level| level.parse::<ActivityLevel>().ok())
        .map(|level| level.description().to_string());

    let (weight_kg, height_cm) = match (measurements.weight_kg, measurements.height_cm) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            return Ok(HealthMetrics {
                bmi: None,
                recommendation: None,
                activity_description,
                defaults_applied: Vec::new(),
                missing_field_labels: get_missing_fields_labels(&missing_fields),
                missing_fields,
            })
        }
    };

    let mut bmi = classify_bmi(weight_kg, height_cm)?;
    let mut defaults_applied = Vec::new();

    if let (Some(age), Some(sex), Some(level)) =
        (measurements.age_years, measurements.sex, activity_level)
    {
        match estimate_daily_calories_detailed(weight_kg, height_cm, age, sex, level) {
            Ok(estimate) => {
                bmi = bmi.with_daily_calories(estimate.kcal);
                defaults_applied = estimate.defaults_applied;
            }
            // Stored profiles can combine in-range values into a non-positive BMR
            Err(err) => {
                warn!(error = %err, "Profile measurements give no calorie estimate");
                defaults_applied.push(AppliedDefault::CaloriesUnavailable {
                    field: err.field().to_string(),
                });
            }
        }
    }

    Ok(HealthMetrics {
        recommendation: Some(bmi.category.recommendation().to_string()),
        bmi: Some(bmi),
        activity_description,
        defaults_applied,
        missing_field_labels: get_missing_fields_labels(&missing_fields),
        missing_fields,
    })
}
