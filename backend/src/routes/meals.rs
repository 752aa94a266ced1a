//! Meal log API routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::MealService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use healthtrack_shared::types::{
    CreateMealRequest, DailySummaryResponse, DateQuery, MealListResponse,
};
use healthtrack_shared::Meal;
use uuid::Uuid;

/// Create meal routes
pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_meals).post(create_meal))
        .route("/summary", get(daily_summary))
        .route("/:id", delete(delete_meal))
}

/// GET /api/v1/meals - Newest first, up to the configured limit
async fn list_meals(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MealListResponse>> {
    let limit = state.config().meals.list_limit;
    let meals = MealService::list_meals(state.db(), auth.user_id, limit).await?;
    Ok(Json(meals))
}

/// POST /api/v1/meals
async fn create_meal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateMealRequest>,
) -> ApiResult<(StatusCode, Json<Meal>)> {
    let meal = MealService::create_meal(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

/// DELETE /api/v1/meals/:id
async fn delete_meal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(meal_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    MealService::delete_meal(state.db(), auth.user_id, meal_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/meals/summary?date=YYYY-MM-DD
async fn daily_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<DailySummaryResponse>> {
    let summary = MealService::daily_summary(state.db(), auth.user_id, query.date).await?;
    Ok(Json(summary))
}
