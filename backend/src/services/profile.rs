//! Profile service - profile reads, partial updates and derived metrics

use crate::error::ApiError;
use crate::repositories::{ProfileRepository, UpdateProfile};
use healthtrack_shared::types::{ProfileResponse, UpdateProfileRequest};
use healthtrack_shared::validation::{
    check, validate_activity_level, validate_age, validate_height_cm, validate_sex,
    validate_tags, validate_weight,
};
use healthtrack_shared::{compute_health_metrics, HealthMetrics, UserProfile};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

/// Profile service for user profile operations
pub struct ProfileService;

impl ProfileService {
    /// Load the stored profile
    pub async fn load(db: &PgPool, user_id: Uuid) -> Result<UserProfile, ApiError> {
        ProfileRepository::find_by_user(db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .map(UserProfile::from)
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))
    }

    /// Get the profile with its derived metrics
    pub async fn get_profile(db: &PgPool, user_id: Uuid) -> Result<ProfileResponse, ApiError> {
        let profile = Self::load(db, user_id).await?;
        let metrics = Self::metrics_for(&profile)?;
        Ok(ProfileResponse { profile, metrics })
    }

    /// BMI and calorie snapshot of the stored profile
    pub async fn get_metrics(db: &PgPool, user_id: Uuid) -> Result<HealthMetrics, ApiError> {
        let profile = Self::load(db, user_id).await?;
        Self::metrics_for(&profile)
    }

    /// Compute the metrics for a profile
    pub fn metrics_for(profile: &UserProfile) -> Result<HealthMetrics, ApiError> {
        let metrics = compute_health_metrics(&profile.measurements())?;
        metrics::counter!("healthtrack_metric_computations_total", "source" => "profile")
            .increment(1);
        if !metrics.missing_fields.is_empty() {
            debug!(
                user_id = %profile.uid,
                missing = ?metrics.missing_fields,
                "Profile incomplete for full metrics"
            );
        }
        Ok(metrics)
    }

    /// Merge validated fields into the profile
    pub async fn update_profile(
        db: &PgPool,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<ProfileResponse, ApiError> {
        let updates = Self::build_update(req)?;

        let profile = ProfileRepository::update(db, user_id, updates)
            .await
            .map_err(ApiError::Internal)?
            .map(UserProfile::from)
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

        info!(user_id = %user_id, "Profile updated");

        let metrics = Self::metrics_for(&profile)?;
        Ok(ProfileResponse { profile, metrics })
    }

    /// Validate an update request and convert it for storage
    fn build_update(req: UpdateProfileRequest) -> Result<UpdateProfile, ApiError> {
        if let Some(age) = req.age {
            check("age", validate_age(age))?;
        }
        if let Some(ref gender) = req.gender {
            check("gender", validate_sex(gender))?;
        }
        if let Some(weight) = req.weight_kg {
            check("weight_kg", validate_weight(weight))?;
        }
        if let Some(height) = req.height_cm {
            check("height_cm", validate_height_cm(height))?;
        }
        if let Some(ref level) = req.activity_level {
            check("activity_level", validate_activity_level(level))?;
        }

        let dietary_preferences = req.dietary_preferences.map(trim_all);
        if let Some(ref tags) = dietary_preferences {
            check("dietary_preferences", validate_tags(tags))?;
        }
        let health_goals = req.health_goals.map(trim_all);
        if let Some(ref tags) = health_goals {
            check("health_goals", validate_tags(tags))?;
        }

        Ok(UpdateProfile {
            age: req.age,
            gender: req.gender,
            weight_kg: req.weight_kg.map(to_decimal).transpose()?,
            height_cm: req.height_cm.map(to_decimal).transpose()?,
            activity_level: req.activity_level,
            dietary_preferences,
            health_goals,
        })
    }
}

fn trim_all(tags: Vec<String>) -> Vec<String> {
    tags.into_iter().map(|tag| tag.trim().to_string()).collect()
}

/// Stored with two decimal places
fn to_decimal(value: f64) -> Result<Decimal, ApiError> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| ApiError::Validation(format!("Cannot store value {}", value)))
}
