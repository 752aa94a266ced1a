//! Session state shared by every screen that depends on the signed-in user
//!
//! The state is an explicit value handed to consumers; there is no global
//! session. Screens ask [`SessionState::route_decision`] what to show instead
//! of inferring it from nullable fields.

use crate::models::UserProfile;
use serde::{Deserialize, Serialize};

/// Where the session currently stands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "state", content = "profile", rename_all = "snake_case")]
pub enum SessionState {
    /// Waiting for the first answer from the session provider
    #[default]
    Loading,
    Authenticated(UserProfile),
    Unauthenticated,
}

/// Notification from the session provider
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn(UserProfile),
    SignedOut,
    /// Profile re-read after an update
    ProfileRefreshed(UserProfile),
}

/// What a protected screen should do for the current state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteDecision<'a> {
    ShowLoading,
    Render(&'a UserProfile),
    RedirectToAuth,
}

impl SessionState {
    /// Apply an event and return the next state
    ///
    /// A refresh only replaces the profile of the user already signed in.
    pub fn apply(self, event: SessionEvent) -> SessionState {
        match (self, event) {
            (_, SessionEvent::SignedIn(profile)) => SessionState::Authenticated(profile),
            (_, SessionEvent::SignedOut) => SessionState::Unauthenticated,
            (SessionState::Authenticated(current), SessionEvent::ProfileRefreshed(profile)) => {
                if current.uid == profile.uid {
                    SessionState::Authenticated(profile)
                } else {
                    SessionState::Authenticated(current)
                }
            }
            (state, SessionEvent::ProfileRefreshed(_)) => state,
        }
    }

    pub fn route_decision(&self) -> RouteDecision<'_> {
        match self {
            SessionState::Loading => RouteDecision::ShowLoading,
            SessionState::Authenticated(profile) => RouteDecision::Render(profile),
            SessionState::Unauthenticated => RouteDecision::RedirectToAuth,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            SessionState::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn profile() -> UserProfile {
        UserProfile::new(Uuid::new_v4(), "session@example.com")
    }

    #[test]
    fn test_starts_loading() {
        let state = SessionState::default();
        assert!(state.is_loading());
        assert_eq!(state.route_decision(), RouteDecision::ShowLoading);
    }

    #[test]
    fn test_sign_in_then_out() {
        let user = profile();
        let state = SessionState::Loading.apply(SessionEvent::SignedIn(user.clone()));
        assert_eq!(state.route_decision(), RouteDecision::Render(&user));

        let state = state.apply(SessionEvent::SignedOut);
        assert_eq!(state.route_decision(), RouteDecision::RedirectToAuth);
    }

    #[test]
    fn test_refresh_replaces_profile_of_same_user() {
        let user = profile();
        let mut updated = user.clone();
        updated.age = Some(31);

        let state = SessionState::Authenticated(user)
            .apply(SessionEvent::ProfileRefreshed(updated.clone()));
        assert_eq!(state.profile(), Some(&updated));
    }

    #[test]
    fn test_refresh_for_other_user_is_ignored() {
        let user = profile();
        let state = SessionState::Authenticated(user.clone())
            .apply(SessionEvent::ProfileRefreshed(profile()));
        assert_eq!(state.profile(), Some(&user));
    }

    #[test]
    fn test_refresh_without_user_keeps_state() {
        let state = SessionState::Loading.apply(SessionEvent::ProfileRefreshed(profile()));
        assert!(state.is_loading());

        let state = SessionState::Unauthenticated.apply(SessionEvent::ProfileRefreshed(profile()));
        assert_eq!(state, SessionState::Unauthenticated);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(SessionState::Unauthenticated).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "unauthenticated" }));

        let json = serde_json::to_value(SessionState::Authenticated(profile())).unwrap();
        assert_eq!(json["state"], "authenticated");
        assert_eq!(json["profile"]["email"], "session@example.com");
    }
}
