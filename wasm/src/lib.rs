//! Health Tracker WASM Module
//!
//! WebAssembly bindings for the calculator screens. Results cross the boundary
//! as JSON strings; failures surface as `JsError`.

use healthtrack_shared::types::BmiCalculatorResponse;
use healthtrack_shared::{BmiCategory, BodyMeasurements, Sex};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn classify(weight_kg: f64, height_cm: f64) -> Result<String, String> {
    let result = healthtrack_shared::classify_bmi(weight_kg, height_cm).map_err(|e| e.to_string())?;
    to_json(&BmiCalculatorResponse {
        recommendation: result.category.recommendation().to_string(),
        result,
    })
}

fn estimate(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    sex: &str,
    activity_level: &str,
) -> Result<u32, String> {
    let sex: Sex = sex.parse()?;
    healthtrack_shared::estimate_daily_calories(weight_kg, height_cm, age_years, sex, activity_level)
        .map_err(|e| e.to_string())
}

fn recommendation(category: &str) -> Result<String, String> {
    let category: BmiCategory = category.parse()?;
    Ok(category.recommendation().to_string())
}

fn progress(goal: f64, consumed: f64, burned: f64) -> Result<String, String> {
    to_json(&healthtrack_shared::calorie_progress(goal, consumed, burned))
}

fn metrics(measurements_json: &str) -> Result<String, String> {
    let measurements: BodyMeasurements =
        serde_json::from_str(measurements_json).map_err(|e| e.to_string())?;
    let metrics =
        healthtrack_shared::compute_health_metrics(&measurements).map_err(|e| e.to_string())?;
    to_json(&metrics)
}

/// BMI and category as JSON: `{ bmi, category, daily_calories, recommendation }`
#[wasm_bindgen]
pub fn classify_bmi(weight_kg: f64, height_cm: f64) -> Result<String, JsError> {
    classify(weight_kg, height_cm).map_err(|e| JsError::new(&e))
}

/// Daily calorie estimate in kcal
///
/// `sex` is male, female or other; unknown activity levels count as sedentary.
#[wasm_bindgen]
pub fn estimate_daily_calories(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    sex: &str,
    activity_level: &str,
) -> Result<u32, JsError> {
    estimate(weight_kg, height_cm, age_years, sex, activity_level).map_err(|e| JsError::new(&e))
}

/// Recommendation text for a category label such as "Normal weight"
#[wasm_bindgen]
pub fn bmi_recommendation(category: &str) -> Result<String, JsError> {
    recommendation(category).map_err(|e| JsError::new(&e))
}

/// Combined metrics for a JSON-encoded set of measurements
#[wasm_bindgen]
pub fn health_metrics(measurements_json: &str) -> Result<String, JsError> {
    metrics(measurements_json).map_err(|e| JsError::new(&e))
}

/// Calorie progress for the day as JSON
#[wasm_bindgen]
pub fn calorie_progress(goal: f64, consumed: f64, burned: f64) -> Result<String, JsError> {
    progress(goal, consumed, burned).map_err(|e| JsError::new(&e))
}
