//! Meal service - meal logging and daily summaries

use crate::error::ApiError;
use crate::repositories::{CreateMeal, MealRecord, MealRepository};
use crate::services::ProfileService;
use chrono::{NaiveDate, Utc};
use healthtrack_shared::types::{CreateMealRequest, DailySummaryResponse, MealListResponse};
use healthtrack_shared::validation::{
    check, validate_calories, validate_macro_grams, validate_meal_name, validate_meal_type,
    validate_notes,
};
use healthtrack_shared::{calorie_progress, Meal};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Meal service
pub struct MealService;

impl MealService {
    /// Most recent meals, newest first
    pub async fn list_meals(
        db: &PgPool,
        user_id: Uuid,
        limit: i64,
    ) -> Result<MealListResponse, ApiError> {
        let records = MealRepository::list_recent(db, user_id, limit)
            .await
            .map_err(ApiError::Internal)?;
        let data = to_meals(records)?;

        Ok(MealListResponse {
            count: data.len(),
            data,
        })
    }

    /// Log a meal
    pub async fn create_meal(
        db: &PgPool,
        user_id: Uuid,
        req: CreateMealRequest,
    ) -> Result<Meal, ApiError> {
        let input = Self::build_meal(user_id, req)?;
        let record = MealRepository::create(db, input)
            .await
            .map_err(ApiError::Internal)?;

        info!(
            user_id = %user_id,
            meal_id = %record.id,
            meal_type = %record.meal_type,
            "Meal logged"
        );
        metrics::counter!("healthtrack_meals_logged_total", "meal_type" => record.meal_type.clone())
            .increment(1);

        Meal::try_from(record).map_err(ApiError::Internal)
    }

    /// Delete a meal owned by the user
    pub async fn delete_meal(db: &PgPool, user_id: Uuid, meal_id: Uuid) -> Result<(), ApiError> {
        let deleted = MealRepository::delete(db, user_id, meal_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Meal not found".to_string()));
        }
        info!(user_id = %user_id, meal_id = %meal_id, "Meal deleted");
        Ok(())
    }

    /// Day totals against the profile's estimated daily calories
    pub async fn daily_summary(
        db: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<DailySummaryResponse, ApiError> {
        let totals = MealRepository::get_daily_totals(db, user_id, date)
            .await
            .map_err(ApiError::Internal)?;
        let meals = to_meals(
            MealRepository::get_by_date(db, user_id, date)
                .await
                .map_err(ApiError::Internal)?,
        )?;

        let profile = ProfileService::load(db, user_id).await?;
        let goal = ProfileService::metrics_for(&profile)?
            .bmi
            .map(|bmi| bmi.daily_calories)
            .unwrap_or(0);

        Ok(DailySummaryResponse {
            date,
            progress: calorie_progress(f64::from(goal), totals.calories, 0.0),
            totals,
            meals,
        })
    }

    /// Validate a meal request and normalize its text fields
    fn build_meal(user_id: Uuid, req: CreateMealRequest) -> Result<CreateMeal, ApiError> {
        check("meal_name", validate_meal_name(&req.meal_name))?;
        check("meal_type", validate_meal_type(&req.meal_type))?;
        check("calories", validate_calories(req.calories))?;
        for (field, value) in [
            ("protein_g", req.protein_g),
            ("carbs_g", req.carbs_g),
            ("fats_g", req.fats_g),
        ] {
            if let Some(grams) = value {
                check(field, validate_macro_grams(grams))?;
            }
        }
        if let Some(ref notes) = req.notes {
            check("notes", validate_notes(notes))?;
        }

        Ok(CreateMeal {
            user_id,
            meal_name: req.meal_name.trim().to_string(),
            meal_type: req.meal_type,
            calories: to_decimal("calories", req.calories)?,
            protein_g: req.protein_g.map(|v| to_decimal("protein_g", v)).transpose()?,
            carbs_g: req.carbs_g.map(|v| to_decimal("carbs_g", v)).transpose()?,
            fats_g: req.fats_g.map(|v| to_decimal("fats_g", v)).transpose()?,
            image_url: non_blank(req.image_url),
            notes: non_blank(req.notes),
            eaten_at: req.date.unwrap_or_else(Utc::now),
        })
    }
}

fn to_meals(records: Vec<MealRecord>) -> Result<Vec<Meal>, ApiError> {
    records
        .into_iter()
        .map(Meal::try_from)
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(ApiError::Internal)
}

/// Trimmed text, `None` when blank
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn to_decimal(field: &str, value: f64) -> Result<Decimal, ApiError> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| ApiError::Validation(format!("{}: cannot store value {}", field, value)))
}
