//! Integration tests for profile and metrics endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_get_profile_requires_auth() {
    let app = common::TestApp::new().await;

    let (status, _) = app.get("/api/v1/profile").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_complete_profile_has_metrics() {
    let app = common::TestApp::new().await;
    let user = app.create_profiled_user().await;

    let (status, response) = app.get_auth("/api/v1/profile", user.token()).await;
    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["profile"]["weight_kg"], 70.0);
    assert_eq!(response["profile"]["gender"], "male");
    assert_eq!(response["metrics"]["bmi"]["bmi"], 22.9);
    assert_eq!(response["metrics"]["bmi"]["category"], "Normal weight");
    assert_eq!(response["metrics"]["bmi"]["daily_calories"], 2594);
    assert_eq!(response["metrics"]["missing_fields"], json!([]));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_partial_update_keeps_other_fields() {
    let app = common::TestApp::new().await;
    let user = app.create_profiled_user().await;

    let body = json!({ "weight_kg": 85.0 });
    let (status, response) = app
        .put_auth("/api/v1/profile", &body.to_string(), user.token())
        .await;
    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["profile"]["weight_kg"], 85.0);
    assert_eq!(response["profile"]["height_cm"], 175.0);
    assert_eq!(response["profile"]["activity_level"], "moderate");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_profile_invalid_height() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let body = json!({ "height_cm": 30.0 });
    let (status, response) = app
        .put_auth("/api/v1/profile", &body.to_string(), user.token())
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["error"]["field"], "height_cm");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_profile_invalid_activity_level() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let body = json!({ "activity_level": "lightly_active" });
    let (status, _) = app
        .put_auth("/api/v1/profile", &body.to_string(), user.token())
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_profile_without_activity_reports_missing_field() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let body = json!({
        "age": 30,
        "gender": "female",
        "weight_kg": 60.0,
        "height_cm": 165.0
    });
    app.put_auth("/api/v1/profile", &body.to_string(), user.token())
        .await;

    let (status, response) = app.get_auth("/api/v1/metrics", user.token()).await;
    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["bmi"]["bmi"], 22.0);
    assert_eq!(response["bmi"]["daily_calories"], 0);
    assert_eq!(response["missing_fields"], json!(["activity_level"]));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_other_gender_flags_formula_default() {
    let app = common::TestApp::new().await;
    let user = app.create_profiled_user().await;

    let body = json!({ "gender": "other" });
    app.put_auth("/api/v1/profile", &body.to_string(), user.token())
        .await;

    let (status, response) = app.get_auth("/api/v1/metrics", user.token()).await;
    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["defaults_applied"][0]["kind"], "sex_formula");
    assert_eq!(response["defaults_applied"][0]["formula"], "female");
}
