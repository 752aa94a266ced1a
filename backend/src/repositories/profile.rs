//! Profile repository - one row per user in `user_profiles`

use anyhow::Result;
use chrono::{DateTime, Utc};
use healthtrack_shared::UserProfile;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

/// Profile joined with the owning account's email
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub user_id: Uuid,
    pub email: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub weight_kg: Option<Decimal>,
    pub height_cm: Option<Decimal>,
    pub activity_level: Option<String>,
    pub dietary_preferences: Vec<String>,
    pub health_goals: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRecord> for UserProfile {
    fn from(record: ProfileRecord) -> Self {
        let gender = record.gender.as_deref().and_then(|g| match g.parse() {
            Ok(sex) => Some(sex),
            Err(_) => {
                warn!(user_id = %record.user_id, gender = g, "Ignoring unknown stored gender");
                None
            }
        });

        UserProfile {
            uid: record.user_id,
            email: record.email,
            age: record.age,
            gender,
            weight_kg: record.weight_kg.and_then(|w| w.to_f64()),
            height_cm: record.height_cm.and_then(|h| h.to_f64()),
            dietary_preferences: record.dietary_preferences,
            health_goals: record.health_goals,
            activity_level: record.activity_level,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Partial profile update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub weight_kg: Option<Decimal>,
    pub height_cm: Option<Decimal>,
    pub activity_level: Option<String>,
    pub dietary_preferences: Option<Vec<String>>,
    pub health_goals: Option<Vec<String>>,
}

/// Profile repository for database operations
pub struct ProfileRepository;

impl ProfileRepository {
    /// Get a user's profile
    pub async fn find_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRecord>> {
        let profile = sqlx::query_as::<_, ProfileRecord>(
            r#"
            SELECT p.user_id, u.email, p.age, p.gender, p.weight_kg, p.height_cm,
                   p.activity_level, p.dietary_preferences, p.health_goals,
                   p.created_at, p.updated_at
            FROM user_profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Merge the given fields into the stored profile
    ///
    /// Returns `None` when the user has no profile row.
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        updates: UpdateProfile,
    ) -> Result<Option<ProfileRecord>> {
        let profile = sqlx::query_as::<_, ProfileRecord>(
            r#"
            WITH updated AS (
                UPDATE user_profiles SET
                    age = COALESCE($2, age),
                    gender = COALESCE($3, gender),
                    weight_kg = COALESCE($4, weight_kg),
                    height_cm = COALESCE($5, height_cm),
                    activity_level = COALESCE($6, activity_level),
                    dietary_preferences = COALESCE($7, dietary_preferences),
                    health_goals = COALESCE($8, health_goals),
                    updated_at = NOW()
                WHERE user_id = $1
                RETURNING *
            )
            SELECT updated.user_id, u.email, updated.age, updated.gender,
                   updated.weight_kg, updated.height_cm, updated.activity_level,
                   updated.dietary_preferences, updated.health_goals,
                   updated.created_at, updated.updated_at
            FROM updated
            JOIN users u ON u.id = updated.user_id
            "#,
        )
        .bind(user_id)
        .bind(updates.age)
        .bind(updates.gender)
        .bind(updates.weight_kg)
        .bind(updates.height_cm)
        .bind(updates.activity_level)
        .bind(updates.dietary_preferences)
        .bind(updates.health_goals)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }
}
