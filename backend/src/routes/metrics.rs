//! Health metric routes
//!
//! `GET /` reports the signed-in user's metrics. The calculator endpoints take
//! ad hoc measurements and need no account.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use healthtrack_shared::types::{
    BmiCalculatorRequest, BmiCalculatorResponse, CalorieRequest, CalorieResponse,
};
use healthtrack_shared::{classify_bmi, estimate_daily_calories_detailed, HealthMetrics};
use tracing::debug;

/// Create metrics routes
pub fn metrics_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_metrics))
        .route("/bmi", post(calculate_bmi))
        .route("/calories", post(calculate_calories))
}

/// GET /api/v1/metrics
async fn get_metrics(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<HealthMetrics>> {
    let metrics = ProfileService::get_metrics(state.db(), auth.user_id).await?;
    Ok(Json(metrics))
}

/// POST /api/v1/metrics/bmi
async fn calculate_bmi(Json(req): Json<BmiCalculatorRequest>) -> ApiResult<Json<BmiCalculatorResponse>> {
    let result = classify_bmi(req.weight_kg, req.height_cm)?;
    metrics::counter!("healthtrack_metric_computations_total", "source" => "calculator")
        .increment(1);
    debug!(bmi = result.bmi, category = %result.category, "BMI calculated");

    Ok(Json(BmiCalculatorResponse {
        recommendation: result.category.recommendation().to_string(),
        result,
    }))
}

/// POST /api/v1/metrics/calories
async fn calculate_calories(Json(req): Json<CalorieRequest>) -> ApiResult<Json<CalorieResponse>> {
    let estimate = estimate_daily_calories_detailed(
        req.weight_kg,
        req.height_cm,
        req.age,
        req.gender,
        &req.activity_level,
    )?;
    metrics::counter!("healthtrack_metric_computations_total", "source" => "calculator")
        .increment(1);

    Ok(Json(CalorieResponse {
        daily_calories: estimate.kcal,
        bmr: estimate.bmr,
        multiplier: estimate.multiplier,
        activity_level: estimate.activity_level.as_str().to_string(),
        activity_description: estimate.activity_level.description().to_string(),
        defaults_applied: estimate.defaults_applied,
    }))
}
