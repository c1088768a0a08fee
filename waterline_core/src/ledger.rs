//! Daily ledger: owns the per-user profile collection, applies the lazy
//! daily reset and recomputes cached goals.
//!
//! The reset is access-triggered, never timer-driven: every profile lookup
//! passes through `reset_if_new_day`, so a profile untouched for several
//! days performs a single reset on its next access instead of replaying the
//! missed days.

use crate::formulas;
use crate::types::Profile;
use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared handle to one user's profile; at most one in-flight mutation at a
/// time per user
pub type ProfileHandle = Arc<Mutex<Profile>>;

/// Owns all profiles, keyed by user id. One instance per process.
#[derive(Default)]
pub struct Ledger {
    profiles: Mutex<HashMap<i64, ProfileHandle>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of known users
    pub fn user_count(&self) -> usize {
        self.profiles.lock().len()
    }

    /// Look up the profile for `user_id`, creating it on first sight, and
    /// apply the daily reset when the local calendar date rolled over.
    pub fn get_or_create(&self, user_id: i64) -> ProfileHandle {
        self.get_or_create_at(user_id, Local::now().date_naive())
    }

    /// Same as [`get_or_create`](Self::get_or_create) with `today` injected,
    /// so the reset boundary is testable without touching the wall clock.
    pub fn get_or_create_at(&self, user_id: i64, today: NaiveDate) -> ProfileHandle {
        let handle = {
            // Check-then-insert is a single critical section: concurrent
            // first access yields exactly one profile instance.
            let mut profiles = self.profiles.lock();
            profiles
                .entry(user_id)
                .or_insert_with(|| {
                    let mut profile = Profile::new(user_id, today);
                    recalc_goals(&mut profile);
                    tracing::info!("Created profile for user {}", user_id);
                    Arc::new(Mutex::new(profile))
                })
                .clone()
        };

        reset_if_new_day(&mut handle.lock(), today);
        handle
    }
}

/// Apply the daily reset when `last_reset` is not `today`: zero the running
/// totals and the workout bonus, clear both logs, stamp the date and
/// recompute goals, all in one step. A no-op for the rest of the day.
pub fn reset_if_new_day(profile: &mut Profile, today: NaiveDate) {
    if profile.last_reset == today {
        return;
    }

    profile.logged_water = 0.0;
    profile.logged_calories = 0.0;
    profile.burned_calories = 0.0;
    profile.workout_water_bonus = 0;
    profile.food_log.clear();
    profile.workout_log.clear();
    profile.last_reset = today;
    recalc_goals(profile);

    tracing::info!("Daily reset applied for user {}", profile.user_id);
}

/// Recompute the cached goals from the profile's current inputs.
///
/// This is the only writer of `water_goal` and `calorie_goal`; it must run
/// after any change to weight, height, age, activity, gender, temperature,
/// the workout bonus or the manual override. A manual override that is set
/// and non-zero wins as-is (deliberately not floored, a sub-1200 manual
/// target stands); the formula path is floored at 1200 kcal.
pub fn recalc_goals(profile: &mut Profile) {
    profile.water_goal = formulas::water_goal(
        profile.weight,
        profile.activity,
        profile.temperature,
        profile.workout_water_bonus,
    );

    profile.calorie_goal = match profile.calorie_goal_manual {
        Some(manual) if manual != 0.0 => manual as i32,
        _ => formulas::calorie_goal(
            profile.weight,
            profile.height,
            profile.age,
            profile.gender,
            profile.activity,
        )
        .max(1200),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Gender;
    use std::thread;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, n).unwrap()
    }

    #[test]
    fn test_create_computes_goals_immediately() {
        let ledger = Ledger::new();
        let handle = ledger.get_or_create_at(1, day(1));
        let profile = handle.lock();

        // Defaults: 70 kg, 30 min activity -> 2600 mL; BMR 1612.5 + 200
        assert_eq!(profile.water_goal, 2600);
        assert_eq!(profile.calorie_goal, 1812);
    }

    #[test]
    fn test_get_or_create_returns_same_instance() {
        let ledger = Ledger::new();
        let first = ledger.get_or_create_at(7, day(1));
        let second = ledger.get_or_create_at(7, day(1));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(ledger.user_count(), 1);
    }

    #[test]
    fn test_concurrent_first_access_creates_one_profile() {
        let ledger = Arc::new(Ledger::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || ledger.get_or_create_at(99, day(1)))
            })
            .map(|t| t.join().expect("thread panicked"))
            .collect();

        for handle in &handles[1..] {
            assert!(Arc::ptr_eq(&handles[0], handle));
        }
        assert_eq!(ledger.user_count(), 1);
    }

    #[test]
    fn test_reset_on_date_rollover() {
        let ledger = Ledger::new();
        let handle = ledger.get_or_create_at(1, day(1));

        {
            let mut profile = handle.lock();
            profile.logged_water = 900.0;
            profile.logged_calories = 750.0;
            profile.burned_calories = 120.0;
            profile.workout_water_bonus = 400;
            recalc_goals(&mut profile);
            assert_eq!(profile.water_goal, 3000);
        }

        let handle = ledger.get_or_create_at(1, day(2));
        let profile = handle.lock();
        assert_eq!(profile.logged_water, 0.0);
        assert_eq!(profile.logged_calories, 0.0);
        assert_eq!(profile.burned_calories, 0.0);
        assert_eq!(profile.workout_water_bonus, 0);
        assert!(profile.food_log.is_empty());
        assert!(profile.workout_log.is_empty());
        assert_eq!(profile.last_reset, day(2));
        // Goal recomputed without the workout bonus
        assert_eq!(profile.water_goal, 2600);
    }

    #[test]
    fn test_reset_is_idempotent_within_a_day() {
        let ledger = Ledger::new();
        let handle = ledger.get_or_create_at(1, day(1));

        handle.lock().logged_water = 500.0;

        let mut profile = handle.lock();
        reset_if_new_day(&mut profile, day(1));
        reset_if_new_day(&mut profile, day(1));
        assert_eq!(profile.logged_water, 500.0);
        assert_eq!(profile.last_reset, day(1));
    }

    #[test]
    fn test_skipped_days_reset_once() {
        let ledger = Ledger::new();
        let handle = ledger.get_or_create_at(1, day(1));
        handle.lock().logged_water = 1000.0;

        // Untouched for a week; next access jumps straight to a single reset
        let handle = ledger.get_or_create_at(1, day(8));
        let profile = handle.lock();
        assert_eq!(profile.logged_water, 0.0);
        assert_eq!(profile.last_reset, day(8));
    }

    #[test]
    fn test_manual_override_wins_over_formula() {
        let ledger = Ledger::new();
        let handle = ledger.get_or_create_at(1, day(1));
        let mut profile = handle.lock();

        profile.calorie_goal_manual = Some(1800.0);
        recalc_goals(&mut profile);
        assert_eq!(profile.calorie_goal, 1800);

        // Override survives changes to the formula inputs
        profile.weight = 120.0;
        profile.gender = Gender::Male;
        recalc_goals(&mut profile);
        assert_eq!(profile.calorie_goal, 1800);

        profile.calorie_goal_manual = None;
        recalc_goals(&mut profile);
        assert!(profile.calorie_goal > 1800);
    }

    #[test]
    fn test_manual_override_below_floor_stands() {
        let ledger = Ledger::new();
        let handle = ledger.get_or_create_at(1, day(1));
        let mut profile = handle.lock();

        profile.calorie_goal_manual = Some(1100.0);
        recalc_goals(&mut profile);
        assert_eq!(profile.calorie_goal, 1100);
    }

    #[test]
    fn test_zero_override_behaves_as_unset() {
        let ledger = Ledger::new();
        let handle = ledger.get_or_create_at(1, day(1));
        let mut profile = handle.lock();

        profile.calorie_goal_manual = Some(0.0);
        recalc_goals(&mut profile);
        assert_eq!(profile.calorie_goal, 1812);
    }

    #[test]
    fn test_formula_path_floored_at_1200() {
        let ledger = Ledger::new();
        let handle = ledger.get_or_create_at(1, day(1));
        let mut profile = handle.lock();

        profile.weight = 30.0;
        profile.height = 140.0;
        profile.age = 90;
        profile.gender = Gender::Female;
        profile.activity = 0.0;
        recalc_goals(&mut profile);
        assert_eq!(profile.calorie_goal, 1200);
    }

    #[test]
    fn test_temperature_feeds_water_goal() {
        let ledger = Ledger::new();
        let handle = ledger.get_or_create_at(1, day(1));
        let mut profile = handle.lock();

        profile.temperature = Some(31.0);
        recalc_goals(&mut profile);
        assert_eq!(profile.water_goal, 3600);
    }
}
