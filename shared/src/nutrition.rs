//! Daily calorie intake against the estimated requirement

use serde::{Deserialize, Serialize};

/// Share of the goal above which intake counts as on track
const ON_TRACK_PERCENT: f64 = 80.0;

/// Intake status relative to the daily goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    UnderGoal,
    OnTrack,
    OverGoal,
}

impl ProgressStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProgressStatus::UnderGoal => "Under Goal",
            ProgressStatus::OnTrack => "On Track",
            ProgressStatus::OverGoal => "Over Goal",
        }
    }
}

/// Calorie progress for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieProgress {
    pub goal: f64,
    pub consumed: f64,
    pub burned: f64,
    /// goal - consumed + burned; negative when over
    pub remaining: f64,
    /// consumed as a percentage of the goal
    pub percent: f64,
    pub status: ProgressStatus,
    /// Display text for `status`
    pub status_label: String,
}

/// Compare intake with a daily goal
///
/// A zero goal (no estimate available) reports 0% and `UnderGoal`.
pub fn calorie_progress(goal: f64, consumed: f64, burned: f64) -> CalorieProgress {
    let percent = if goal > 0.0 {
        consumed / goal * 100.0
    } else {
        0.0
    };

    let status = if percent > 100.0 {
        ProgressStatus::OverGoal
    } else if percent > ON_TRACK_PERCENT {
        ProgressStatus::OnTrack
    } else {
        ProgressStatus::UnderGoal
    };

    CalorieProgress {
        goal,
        consumed,
        burned,
        remaining: goal - consumed + burned,
        percent,
        status,
        status_label: status.label().to_string(),
    }
}

/// Summed macros for a set of meals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    pub meal_count: i64,
}
