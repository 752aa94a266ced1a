//! Meal repository - database operations for logged meals

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use healthtrack_shared::{Meal, NutritionTotals};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Meal row from the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MealRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meal_name: String,
    pub meal_type: String,
    pub calories: Decimal,
    pub protein_g: Option<Decimal>,
    pub carbs_g: Option<Decimal>,
    pub fats_g: Option<Decimal>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub eaten_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<MealRecord> for Meal {
    type Error = anyhow::Error;

    fn try_from(record: MealRecord) -> Result<Self> {
        let meal_type = record
            .meal_type
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .with_context(|| format!("meal {} has an invalid type", record.id))?;

        Ok(Meal {
            id: record.id,
            user_id: record.user_id,
            meal_name: record.meal_name,
            meal_type,
            calories: record.calories.to_f64().unwrap_or(0.0),
            protein_g: record.protein_g.and_then(|v| v.to_f64()),
            carbs_g: record.carbs_g.and_then(|v| v.to_f64()),
            fats_g: record.fats_g.and_then(|v| v.to_f64()),
            image_url: record.image_url,
            notes: record.notes,
            date: record.eaten_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Input for logging a meal; text fields already trimmed
#[derive(Debug, Clone)]
pub struct CreateMeal {
    pub user_id: Uuid,
    pub meal_name: String,
    pub meal_type: String,
    pub calories: Decimal,
    pub protein_g: Option<Decimal>,
    pub carbs_g: Option<Decimal>,
    pub fats_g: Option<Decimal>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub eaten_at: DateTime<Utc>,
}

/// Meal repository
pub struct MealRepository;

impl MealRepository {
    /// Log a meal
    pub async fn create(db: &PgPool, input: CreateMeal) -> Result<MealRecord> {
        let meal = sqlx::query_as::<_, MealRecord>(
            r#"
            INSERT INTO meals (
                user_id, meal_name, meal_type, calories,
                protein_g, carbs_g, fats_g, image_url, notes, eaten_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, user_id, meal_name, meal_type, calories,
                      protein_g, carbs_g, fats_g, image_url, notes,
                      eaten_at, created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.meal_name)
        .bind(&input.meal_type)
        .bind(input.calories)
        .bind(input.protein_g)
        .bind(input.carbs_g)
        .bind(input.fats_g)
        .bind(&input.image_url)
        .bind(&input.notes)
        .bind(input.eaten_at)
        .fetch_one(db)
        .await?;

        Ok(meal)
    }

    /// Most recent meals for a user, newest first
    pub async fn list_recent(db: &PgPool, user_id: Uuid, limit: i64) -> Result<Vec<MealRecord>> {
        let meals = sqlx::query_as::<_, MealRecord>(
            r#"
            SELECT id, user_id, meal_name, meal_type, calories,
                   protein_g, carbs_g, fats_g, image_url, notes,
                   eaten_at, created_at, updated_at
            FROM meals
            WHERE user_id = $1
            ORDER BY eaten_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(meals)
    }

    /// Meals eaten on a given (UTC) day, in order
    pub async fn get_by_date(db: &PgPool, user_id: Uuid, date: NaiveDate) -> Result<Vec<MealRecord>> {
        let meals = sqlx::query_as::<_, MealRecord>(
            r#"
            SELECT id, user_id, meal_name, meal_type, calories,
                   protein_g, carbs_g, fats_g, image_url, notes,
                   eaten_at, created_at, updated_at
            FROM meals
            WHERE user_id = $1 AND DATE(eaten_at AT TIME ZONE 'UTC') = $2
            ORDER BY eaten_at ASC
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(db)
        .await?;

        Ok(meals)
    }

    /// Delete a meal owned by the user
    pub async fn delete(db: &PgPool, user_id: Uuid, meal_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
            .bind(meal_id)
            .bind(user_id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Summed calories and macros for one day
    pub async fn get_daily_totals(
        db: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<NutritionTotals> {
        let row = sqlx::query_as::<_, (Decimal, Decimal, Decimal, Decimal, i64)>(
            r#"
            SELECT
                COALESCE(SUM(calories), 0) as total_calories,
                COALESCE(SUM(protein_g), 0) as total_protein,
                COALESCE(SUM(carbs_g), 0) as total_carbs,
                COALESCE(SUM(fats_g), 0) as total_fats,
                COUNT(*) as meal_count
            FROM meals
            WHERE user_id = $1 AND DATE(eaten_at AT TIME ZONE 'UTC') = $2
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(db)
        .await?;

        Ok(NutritionTotals {
            calories: row.0.to_f64().unwrap_or(0.0),
            protein_g: row.1.to_f64().unwrap_or(0.0),
            carbs_g: row.2.to_f64().unwrap_or(0.0),
            fats_g: row.3.to_f64().unwrap_or(0.0),
            meal_count: row.4,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use healthtrack_shared::MealType;
    use rust_decimal::prelude::FromPrimitive;

    fn record(meal_type: &str) -> MealRecord {
        let now = Utc::now();
        MealRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            meal_name: "Greek yogurt".to_string(),
            meal_type: meal_type.to_string(),
            calories: Decimal::from_f64(180.5).unwrap(),
            protein_g: Decimal::from_f64(17.0),
            carbs_g: None,
            fats_g: None,
            image_url: None,
            notes: Some("with honey".to_string()),
            eaten_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_record_to_meal() {
        let meal = Meal::try_from(record("breakfast")).unwrap();
        assert_eq!(meal.meal_type, MealType::Breakfast);
        assert_eq!(meal.calories, 180.5);
        assert_eq!(meal.protein_g, Some(17.0));
        assert_eq!(meal.carbs_g, None);
    }

    #[test]
    fn test_invalid_meal_type_is_an_error() {
        assert!(Meal::try_from(record("brunch")).is_err());
    }
}
