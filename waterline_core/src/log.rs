//! Log mutators: append a measurement to a profile and keep the aggregate
//! counters consistent.
//!
//! Every mutator validates before it writes; a rejected call leaves the
//! profile untouched. The workout path is the one mutator that moves a goal
//! (its hydration bonus feeds the water goal), so it ends with a recompute.

use crate::catalog::WorkoutKind;
use crate::error::{Error, Result};
use crate::formulas;
use crate::ledger;
use crate::types::{FoodEntry, GoalOverride, Profile, ProfileUpdate, WorkoutEntry};
use chrono::Local;
use uuid::Uuid;

/// Record drunk water in millilitres.
///
/// The water goal is independent of intake, so no goals change here.
pub fn log_water(profile: &mut Profile, amount_ml: f64) -> Result<()> {
    if !amount_ml.is_finite() || amount_ml <= 0.0 {
        return Err(Error::InvalidInput(
            "water amount must be a positive number of millilitres".into(),
        ));
    }

    profile.logged_water += amount_ml;
    tracing::debug!(
        "User {}: logged {} mL water ({} total)",
        profile.user_id,
        amount_ml,
        profile.logged_water
    );
    Ok(())
}

/// Record eaten food from a resolved (name, kcal per 100 g) pair.
///
/// Returns the calories credited to today's intake.
pub fn log_food(
    profile: &mut Profile,
    name: &str,
    grams: f64,
    calories_per_100g: f64,
) -> Result<f64> {
    if !grams.is_finite() || grams <= 0.0 {
        return Err(Error::InvalidInput(
            "food mass must be a positive number of grams".into(),
        ));
    }
    // Missing name or non-positive calorie density means the lookup gave us
    // nothing usable
    if name.trim().is_empty() || !(calories_per_100g > 0.0) {
        return Err(Error::NotFound(format!(
            "no usable calorie data for '{}'",
            name.trim()
        )));
    }

    let calories = calories_per_100g * grams / 100.0;
    profile.food_log.push(FoodEntry {
        id: Uuid::new_v4(),
        name: name.trim().to_string(),
        grams,
        calories,
        logged_at: Local::now(),
    });
    profile.logged_calories += calories;

    tracing::debug!(
        "User {}: logged {} ({} g, {:.0} kcal)",
        profile.user_id,
        name.trim(),
        grams,
        calories
    );
    Ok(calories)
}

/// Record a workout: estimate calories and the hydration bonus, append the
/// entry, then recompute goals because the bonus moved the water goal.
///
/// Returns `(calories_burned, water_bonus_ml)`.
pub fn log_workout(profile: &mut Profile, kind: WorkoutKind, minutes: f64) -> Result<(f64, i32)> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(Error::InvalidInput(
            "workout duration must be a positive number of minutes".into(),
        ));
    }

    let (calories, water_bonus) = formulas::estimate_workout(&kind, minutes, profile.weight);
    profile.workout_log.push(WorkoutEntry {
        id: Uuid::new_v4(),
        kind,
        minutes,
        calories,
        water_bonus,
        logged_at: Local::now(),
    });
    profile.burned_calories += calories;
    profile.workout_water_bonus += water_bonus;
    ledger::recalc_goals(profile);

    tracing::debug!(
        "User {}: workout {:.0} min, {:.0} kcal, +{} mL water",
        profile.user_id,
        minutes,
        calories,
        water_bonus
    );
    Ok((calories, water_bonus))
}

/// Apply a partial profile edit. All fields are validated before any of them
/// is written, so a rejected update leaves the profile untouched.
///
/// The caller is expected to follow up with a temperature assignment from
/// the weather collaborator and a `ledger::recalc_goals` call.
pub fn apply_profile_update(profile: &mut Profile, update: ProfileUpdate) -> Result<()> {
    if let Some(weight) = update.weight {
        check_range(weight, 20.0, 400.0, "weight (kg)")?;
    }
    if let Some(height) = update.height {
        check_range(height, 100.0, 250.0, "height (cm)")?;
    }
    if let Some(age) = update.age {
        if !(10..=100).contains(&age) {
            return Err(Error::InvalidInput(
                "age must be between 10 and 100".into(),
            ));
        }
    }
    if let Some(activity) = update.activity {
        check_range(activity, 0.0, 720.0, "activity (minutes per day)")?;
    }
    if let Some(ref city) = update.city {
        if city.trim().is_empty() {
            return Err(Error::InvalidInput("city must not be empty".into()));
        }
    }
    if let GoalOverride::Manual(goal) = update.calorie_goal_manual {
        check_range(goal, 1000.0, 6000.0, "calorie goal (kcal)")?;
    }

    if let Some(weight) = update.weight {
        profile.weight = weight;
    }
    if let Some(height) = update.height {
        profile.height = height;
    }
    if let Some(age) = update.age {
        profile.age = age;
    }
    if let Some(activity) = update.activity {
        profile.activity = activity;
    }
    if let Some(city) = update.city {
        profile.city = city.trim().to_string();
    }
    if let Some(gender) = update.gender {
        profile.gender = gender;
    }
    match update.calorie_goal_manual {
        GoalOverride::Keep => {}
        GoalOverride::Auto => profile.calorie_goal_manual = None,
        GoalOverride::Manual(goal) => profile.calorie_goal_manual = Some(goal),
    }

    tracing::debug!("User {}: profile updated", profile.user_id);
    Ok(())
}

fn check_range(value: f64, min: f64, max: f64, what: &str) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(Error::InvalidInput(format!(
            "{} must be between {} and {}",
            what, min, max
        )));
    }
    Ok(())
}
