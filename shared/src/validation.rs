//! Input validation functions
//!
//! Profile and meal input is validated here before it reaches storage. The
//! health-metric engine does its own positivity checks; these ranges are the
//! stricter bounds the profile accepts.

use crate::health_metrics::{ActivityLevel, Sex};
use crate::models::MealType;

/// Longest meal note accepted
pub const MAX_NOTES_LEN: usize = 500;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if !email.contains('@') || !email.contains('.') {
        return Err("Invalid email format".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map_err(|e| format!("Email pattern error: {}", e))?;
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

// ============================================================================
// Profile Validation
// ============================================================================

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm (covers infants to tallest recorded humans)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate age in whole years (1-150)
pub fn validate_age(age_years: i32) -> Result<(), String> {
    if age_years < 1 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age_years > 150 {
        return Err("Age cannot exceed 150 years".to_string());
    }
    Ok(())
}

/// Validate activity level
pub fn validate_activity_level(level: &str) -> Result<(), String> {
    level.parse::<ActivityLevel>().map(|_| ()).map_err(|_| {
        let valid: Vec<&str> = ActivityLevel::ALL.iter().map(|l| l.as_str()).collect();
        format!("Invalid activity level. Must be one of: {}", valid.join(", "))
    })
}

/// Validate gender
pub fn validate_sex(sex: &str) -> Result<(), String> {
    sex.parse::<Sex>().map(|_| ()).map_err(|_| {
        let valid: Vec<&str> = Sex::ALL.iter().map(|s| s.as_str()).collect();
        format!("Invalid gender. Must be one of: {}", valid.join(", "))
    })
}

/// Validate a list of free-text tags (dietary preferences, health goals)
pub fn validate_tags(tags: &[String]) -> Result<(), String> {
    if tags.len() > 50 {
        return Err("Too many entries (maximum 50)".to_string());
    }
    if tags.iter().any(|tag| tag.trim().is_empty()) {
        return Err("Entries cannot be blank".to_string());
    }
    if tags.iter().any(|tag| tag.len() > 100) {
        return Err("Entries must be at most 100 characters".to_string());
    }
    Ok(())
}

// ============================================================================
// Meal Validation
// ============================================================================

/// Validate meal name (after trimming)
pub fn validate_meal_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Meal name is required".to_string());
    }
    if trimmed.len() > 200 {
        return Err("Meal name must be at most 200 characters".to_string());
    }
    Ok(())
}

/// Validate meal type
pub fn validate_meal_type(meal_type: &str) -> Result<(), String> {
    meal_type.parse::<MealType>().map(|_| ()).map_err(|_| {
        let valid: Vec<&str> = MealType::ALL.iter().map(|m| m.as_str()).collect();
        format!("Invalid meal type. Must be one of: {}", valid.join(", "))
    })
}

/// Validate calorie value
pub fn validate_calories(calories: f64) -> Result<(), String> {
    if calories.is_nan() || calories.is_infinite() {
        return Err("Calories must be a valid number".to_string());
    }
    if calories < 0.0 {
        return Err("Calories cannot be negative".to_string());
    }
    if calories > 50000.0 {
        return Err("Calorie value unreasonably high".to_string());
    }
    Ok(())
}

/// Validate a macronutrient amount in grams
pub fn validate_macro_grams(grams: f64) -> Result<(), String> {
    if grams.is_nan() || grams.is_infinite() {
        return Err("Amount must be a valid number".to_string());
    }
    if grams < 0.0 {
        return Err("Amount cannot be negative".to_string());
    }
    if grams > 10000.0 {
        return Err("Amount unreasonably high".to_string());
    }
    Ok(())
}

/// Validate meal notes (after trimming)
pub fn validate_notes(notes: &str) -> Result<(), String> {
    if notes.trim().chars().count() > MAX_NOTES_LEN {
        return Err(format!("Notes cannot exceed {} characters", MAX_NOTES_LEN));
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight" | "weight_kg" => "Weight",
        "height" | "height_cm" => "Height",
        "age" | "age_years" => "Age",
        "gender" => "Gender",
        "activity_level" => "Activity Level",
        "dietary_preferences" => "Dietary Preferences",
        "health_goals" => "Health Goals",
        "meal_name" => "Meal Name",
        "meal_type" => "Meal Type",
        "calories" => "Calories",
        "protein_g" => "Protein",
        "carbs_g" => "Carbs",
        "fats_g" => "Fats",
        "notes" => "Notes",
        "bmr" => "Basal Metabolic Rate",
        _ => field_name,
    }
}

/// Convert a list of technical field names to user-friendly labels
pub fn get_missing_fields_labels(fields: &[String]) -> Vec<String> {
    fields
        .iter()
        .map(|f| get_field_display_label(f).to_string())
        .collect()
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Attach a field name to a validator result
pub fn check(field: &str, result: Result<(), String>) -> Result<(), ValidationError> {
    result.map_err(|message| ValidationError::new(field, &message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;
    use proptest::prelude::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("user.name@domain.co.uk").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@dot").is_err());
        assert!(validate_email("spaces in@email.com").is_err());
    }

    #[test]
    fn test_generated_emails_are_valid() {
        for _ in 0..20 {
            let email: String = SafeEmail().fake();
            assert!(validate_email(&email).is_ok(), "{} should be valid", email);
        }
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"a".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight(70.0).is_ok());
        assert!(validate_weight(20.0).is_ok());
        assert!(validate_weight(500.0).is_ok());
        assert!(validate_weight(10.0).is_err());
        assert!(validate_weight(600.0).is_err());
        assert!(validate_weight(f64::NAN).is_err());
        assert!(validate_weight(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_height_cm() {
        assert!(validate_height_cm(170.0).is_ok());
        assert!(validate_height_cm(50.0).is_ok());
        assert!(validate_height_cm(300.0).is_ok());

        assert!(validate_height_cm(49.9).is_err());
        assert!(validate_height_cm(300.1).is_err());
        assert!(validate_height_cm(-10.0).is_err());
        assert!(validate_height_cm(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_age() {
        assert!(validate_age(1).is_ok());
        assert!(validate_age(150).is_ok());
        assert!(validate_age(0).is_err());
        assert!(validate_age(-5).is_err());
        assert!(validate_age(151).is_err());
    }

    #[test]
    fn test_validate_activity_level() {
        for level in ["sedentary", "light", "moderate", "active", "very_active"] {
            assert!(validate_activity_level(level).is_ok(), "{} should be valid", level);
        }
        assert!(validate_activity_level("lightly_active").is_err());
        assert!(validate_activity_level("").is_err());
        let err = validate_activity_level("extreme").unwrap_err();
        assert!(err.contains("very_active"));
    }

    #[test]
    fn test_validate_sex() {
        assert!(validate_sex("male").is_ok());
        assert!(validate_sex("female").is_ok());
        assert!(validate_sex("other").is_ok());
        assert!(validate_sex("MALE").is_err());
        assert!(validate_sex("").is_err());
    }

    #[test]
    fn test_validate_tags() {
        assert!(validate_tags(&["vegetarian".to_string(), "gluten-free".to_string()]).is_ok());
        assert!(validate_tags(&[]).is_ok());
        assert!(validate_tags(&["  ".to_string()]).is_err());
        assert!(validate_tags(&vec!["x".to_string(); 51]).is_err());
    }

    #[test]
    fn test_validate_meal_fields() {
        assert!(validate_meal_name("  Oatmeal ").is_ok());
        assert!(validate_meal_name("   ").is_err());
        assert!(validate_meal_type("dinner").is_ok());
        assert!(validate_meal_type("brunch").is_err());
        assert!(validate_calories(0.0).is_ok());
        assert!(validate_calories(-1.0).is_err());
        assert!(validate_macro_grams(12.5).is_ok());
        assert!(validate_macro_grams(-0.1).is_err());
        assert!(validate_notes(&"n".repeat(500)).is_ok());
        assert!(validate_notes(&"n".repeat(501)).is_err());
        assert!(validate_notes(&format!("  {}  ", "n".repeat(500))).is_ok());
    }

    #[test]
    fn test_field_display_labels() {
        assert_eq!(get_field_display_label("height_cm"), "Height");
        assert_eq!(get_field_display_label("activity_level"), "Activity Level");
        assert_eq!(get_field_display_label("unknown_field"), "unknown_field");
        assert_eq!(
            get_missing_fields_labels(&["weight".to_string(), "gender".to_string()]),
            vec!["Weight".to_string(), "Gender".to_string()]
        );
    }

    #[test]
    fn test_validation_error() {
        let err = check("height_cm", validate_height_cm(10.0)).unwrap_err();
        assert_eq!(err.field, "height_cm");
        assert_eq!(err.display_label, "Height");
        assert_eq!(err.user_message(), "Height: Height must be at least 50 cm");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_weight_range(weight in 20.0f64..=500.0) {
            prop_assert!(validate_weight(weight).is_ok());
        }

        #[test]
        fn prop_invalid_weight_below_min(weight in 0.0f64..20.0) {
            prop_assert!(validate_weight(weight).is_err());
        }

        #[test]
        fn prop_valid_height_range(height in 50.0f64..=300.0) {
            prop_assert!(validate_height_cm(height).is_ok(),
                "Height {} should be valid", height);
        }

        #[test]
        fn prop_valid_age_range(age in 1i32..=150) {
            prop_assert!(validate_age(age).is_ok());
        }

        #[test]
        fn prop_negative_calories_rejected(calories in -10000.0f64..-0.001) {
            prop_assert!(validate_calories(calories).is_err());
        }

        #[test]
        fn prop_password_length_valid(len in 8usize..=128) {
            let password: String = (0..len).map(|_| 'a').collect();
            prop_assert!(validate_password(&password).is_ok());
        }
    }
}
