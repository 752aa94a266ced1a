//! Session route
//!
//! Reports the caller's session as one of the three session states. A missing,
//! invalid or orphaned token is an unauthenticated session rather than an error.

use crate::auth::MaybeAuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use healthtrack_shared::{SessionEvent, SessionState};
use tracing::debug;

/// Create session routes
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/", get(get_session))
}

/// GET /api/v1/session
async fn get_session(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> ApiResult<Json<SessionState>> {
    let event = match user {
        None => SessionEvent::SignedOut,
        Some(user) => match ProfileService::load(state.db(), user.user_id).await {
            Ok(profile) => SessionEvent::SignedIn(profile),
            Err(ApiError::NotFound(_)) => {
                debug!(user_id = %user.user_id, "Token for unknown user");
                SessionEvent::SignedOut
            }
            Err(e) => return Err(e),
        },
    };

    Ok(Json(SessionState::default().apply(event)))
}
