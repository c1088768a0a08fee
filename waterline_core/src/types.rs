//! Core domain types for the Waterline assistant.
//!
//! This module defines the fundamental types used throughout the system:
//! - The per-user profile with its cached goals and running daily totals
//! - Food and workout log entries
//! - Gender and the partial profile update

use crate::catalog::WorkoutKind;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Gender
// ============================================================================

/// Gender used by the calorie-goal formula (Mifflin-St Jeor offset)
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl Gender {
    /// Parse free-text gender input ("m"/"male"/"м", "f"/"female"/"ж").
    ///
    /// Anything else maps to `Unspecified`.
    pub fn parse(raw: &str) -> Gender {
        let lowered = raw.trim().to_lowercase();
        if lowered.starts_with('m') || lowered == "м" {
            Gender::Male
        } else if lowered.starts_with('f') || lowered == "ж" {
            Gender::Female
        } else {
            Gender::Unspecified
        }
    }
}

// ============================================================================
// Log Entries
// ============================================================================

/// A recorded food intake for the current day
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: Uuid,
    pub name: String,
    pub grams: f64,
    pub calories: f64,
    pub logged_at: DateTime<Local>,
}

/// A recorded workout for the current day
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub id: Uuid,
    pub kind: WorkoutKind,
    pub minutes: f64,
    pub calories: f64,
    pub water_bonus: i32,
    pub logged_at: DateTime<Local>,
}

// ============================================================================
// Profile
// ============================================================================

/// Per-user record: identity attributes, cached goals and the running daily
/// logs. Owned exclusively by the [`Ledger`](crate::ledger::Ledger); the
/// cached goals are written only by `ledger::recalc_goals`.
///
/// Both logs are append-only until the daily reset clears them together
/// with the running totals.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: i64,

    // Physical attributes
    pub weight: f64,
    pub height: f64,
    pub age: u32,
    /// Minutes per day of non-workout activity
    pub activity: f64,
    pub gender: Gender,

    /// Weather-lookup key only
    pub city: String,

    /// Manual calorie goal; when set (and non-zero) it supersedes the formula
    pub calorie_goal_manual: Option<f64>,
    /// Last known ambient temperature (°C); absent means no thermal adjustment
    pub temperature: Option<f64>,

    // Derived goals, recomputed by the ledger
    pub water_goal: i32,
    pub calorie_goal: i32,
    /// Extra hydration (mL) earned by today's workouts; feeds the water goal
    pub workout_water_bonus: i32,

    // Running daily totals
    pub logged_water: f64,
    pub logged_calories: f64,
    pub burned_calories: f64,

    pub food_log: Vec<FoodEntry>,
    pub workout_log: Vec<WorkoutEntry>,

    /// Calendar date of the last daily reset
    pub last_reset: NaiveDate,
}

impl Profile {
    /// Create a profile with default attributes, dated `today`.
    ///
    /// The cached goals start from placeholder values; the ledger recomputes
    /// them immediately on creation.
    pub fn new(user_id: i64, today: NaiveDate) -> Self {
        Self {
            user_id,
            weight: 70.0,
            height: 170.0,
            age: 30,
            activity: 30.0,
            gender: Gender::Unspecified,
            city: "Moscow".to_string(),
            calorie_goal_manual: None,
            temperature: None,
            water_goal: 2100,
            calorie_goal: 2000,
            workout_water_bonus: 0,
            logged_water: 0.0,
            logged_calories: 0.0,
            burned_calories: 0.0,
            food_log: Vec::new(),
            workout_log: Vec::new(),
            last_reset: today,
        }
    }

    /// Millilitres still to drink today (never negative)
    pub fn water_remaining(&self) -> f64 {
        (f64::from(self.water_goal) - self.logged_water).max(0.0)
    }

    /// Net calories: consumed minus burned
    pub fn calorie_balance(&self) -> f64 {
        self.logged_calories - self.burned_calories
    }

    /// Calories left before today's goal is met (never negative)
    pub fn calories_remaining(&self) -> f64 {
        (f64::from(self.calorie_goal) - self.calorie_balance()).max(0.0)
    }
}

// ============================================================================
// Profile Update
// ============================================================================

/// Tri-state calorie override carried by a profile update
#[derive(Clone, Debug, Default, PartialEq)]
pub enum GoalOverride {
    /// Leave the current override untouched
    #[default]
    Keep,
    /// Clear the override, back to the formula-derived goal
    Auto,
    /// Set a manual daily calorie goal (kcal)
    Manual(f64),
}

/// Partial profile edit; `None` fields are left unchanged.
///
/// Applied by [`log::apply_profile_update`](crate::log::apply_profile_update).
#[derive(Clone, Debug, Default)]
pub struct ProfileUpdate {
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub age: Option<u32>,
    pub activity: Option<f64>,
    pub city: Option<String>,
    pub gender: Option<Gender>,
    pub calorie_goal_manual: GoalOverride,
}
