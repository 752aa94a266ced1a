//! User service for registration, login and token refresh
//!
//! Password hashing and verification run on the blocking thread pool.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use healthtrack_shared::types::{AccountSummary, AuthTokens};
use healthtrack_shared::validation::{check, validate_email, validate_password};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// User service for authentication operations
pub struct UserService;

/// Emails are compared case-insensitively
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

impl UserService {
    /// Register a new user with an empty profile
    pub async fn register(
        pool: &PgPool,
        jwt_service: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let email = normalize_email(email);
        check("email", validate_email(&email))?;
        check("password", validate_password(password))?;

        if UserRepository::email_exists(pool, &email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        // A concurrent registration can still win the unique constraint
        let user = UserRepository::create(pool, &email, &password_hash)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::Conflict("Email already registered".to_string())
                } else {
                    ApiError::Internal(e)
                }
            })?;

        info!(user_id = %user.id, "User registered");
        metrics::counter!("healthtrack_registrations_total").increment(1);

        jwt_service.issue_tokens(user.id).map_err(ApiError::Internal)
    }

    /// Login with email and password
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let user = UserRepository::find_by_email(pool, &normalize_email(email))
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = PasswordService::verify_async(password.to_string(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            metrics::counter!("healthtrack_login_failures_total").increment(1);
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        jwt_service.issue_tokens(user.id).map_err(ApiError::Internal)
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh_token(
        pool: &PgPool,
        jwt_service: &JwtService,
        refresh_token: &str,
    ) -> Result<AuthTokens, ApiError> {
        let claims = jwt_service
            .validate_refresh_token(refresh_token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let user_id = claims
            .user_id()
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        // The account may have been removed since the token was issued
        UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        jwt_service.issue_tokens(user_id).map_err(ApiError::Internal)
    }

    /// Get the signed-in account
    pub async fn get_account(pool: &PgPool, user_id: Uuid) -> Result<AccountSummary, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(AccountSummary {
            id: user.id.to_string(),
            email: user.email,
            created_at: user.created_at,
        })
    }
}
