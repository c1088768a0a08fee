//! Pure goal formulas: daily water goal, daily calorie goal, and per-workout
//! estimates.
//!
//! All functions here are stateless arithmetic over already-validated input;
//! they never fail. Validation of amounts and durations happens in the log
//! mutators, clamping of the final goals happens here or in the ledger as
//! noted per function.

use crate::catalog::WorkoutKind;
use crate::types::Gender;

/// Daily activity is capped to a sane range before feeding the formulas
const ACTIVITY_CAP_MINUTES: f64 = 720.0;

/// Hard band for the daily water goal (mL)
const WATER_GOAL_MIN: i32 = 1500;
const WATER_GOAL_MAX: i32 = 5000;

fn cap_activity(minutes: f64) -> f64 {
    minutes.clamp(0.0, ACTIVITY_CAP_MINUTES)
}

/// Daily water goal in millilitres.
///
/// `weight * 30` base, plus 500 mL per 30 min of daily activity, plus a heat
/// bonus (500 mL above 25 °C, 1000 mL above 30 °C) when the temperature is
/// known, plus the hydration bonus earned by today's workouts. The raw total
/// may land far outside the sane band; clamping to [1500, 5000] is the final
/// step.
pub fn water_goal(
    weight: f64,
    activity: f64,
    temperature: Option<f64>,
    workout_water_bonus: i32,
) -> i32 {
    let base = weight * 30.0;
    let activity_bonus = (cap_activity(activity) / 30.0) * 500.0;
    let temp_bonus = match temperature {
        Some(t) if t > 30.0 => 1000.0,
        Some(t) if t > 25.0 => 500.0,
        _ => 0.0,
    };
    let total = base + activity_bonus + temp_bonus + f64::from(workout_water_bonus);
    (total.floor() as i32).clamp(WATER_GOAL_MIN, WATER_GOAL_MAX)
}

/// Daily calorie goal in kilocalories, Mifflin-St Jeor BMR plus an activity
/// bonus capped at 400 kcal.
///
/// No floor is applied here: the 1200 kcal minimum belongs to the ledger's
/// non-manual path, since a manual override bypasses this function entirely.
pub fn calorie_goal(weight: f64, height: f64, age: u32, gender: Gender, activity: f64) -> i32 {
    let mut bmr = 10.0 * weight + 6.25 * height - 5.0 * f64::from(age);
    bmr += match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
        Gender::Unspecified => 0.0,
    };
    let activity_bonus = ((cap_activity(activity) / 30.0) * 200.0).min(400.0);
    (bmr + activity_bonus).floor() as i32
}

/// Estimate calories burned and the hydration bonus for one workout.
///
/// Calories follow the MET model: `0.0175 * MET * weight * minutes`. The
/// water bonus is a step function of duration, not proportional: every
/// started 30-minute block earns 200 mL, so 1 minute and 30 minutes both
/// earn 200 mL while 31 minutes earns 400 mL.
pub fn estimate_workout(kind: &WorkoutKind, minutes: f64, weight: f64) -> (f64, i32) {
    let calories = 0.0175 * kind.met() * weight * minutes;
    let water_bonus = if minutes > 0.0 {
        ((minutes / 30.0).ceil() as i32) * 200
    } else {
        0
    };
    (calories, water_bonus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_goal_baseline() {
        // 70 kg, 30 min activity, no temperature, no workouts
        assert_eq!(water_goal(70.0, 30.0, None, 0), 2600);
    }

    #[test]
    fn test_water_goal_temperature_thresholds() {
        let cool = water_goal(70.0, 30.0, Some(20.0), 0);
        let warm = water_goal(70.0, 30.0, Some(26.0), 0);
        let hot = water_goal(70.0, 30.0, Some(31.0), 0);
        assert_eq!(cool, 2600);
        assert_eq!(warm, 3100);
        assert_eq!(hot, 3600);

        // Boundary values do not trigger the next band
        assert_eq!(water_goal(70.0, 30.0, Some(25.0), 0), 2600);
        assert_eq!(water_goal(70.0, 30.0, Some(30.0), 0), 3100);
    }

    #[test]
    fn test_water_goal_clamped_to_band() {
        // Tiny body, no activity: raw total far below the floor
        assert_eq!(water_goal(20.0, 0.0, None, 0), 1500);
        // Heavy body, max activity, hot day, big workout bonus: ceiling
        assert_eq!(water_goal(400.0, 720.0, Some(35.0), 4000), 5000);
    }

    #[test]
    fn test_water_goal_monotonic_in_activity_and_bonus() {
        let mut previous = 0;
        for activity in [0.0, 60.0, 120.0, 240.0, 480.0, 720.0] {
            let goal = water_goal(70.0, activity, None, 0);
            assert!(goal >= previous);
            previous = goal;
        }

        let without = water_goal(70.0, 30.0, None, 0);
        let with = water_goal(70.0, 30.0, None, 400);
        assert!(with >= without);
    }

    #[test]
    fn test_water_goal_activity_capped() {
        // Beyond 720 minutes the activity bonus stops growing
        assert_eq!(
            water_goal(70.0, 720.0, None, 0),
            water_goal(70.0, 10_000.0, None, 0)
        );
    }

    #[test]
    fn test_calorie_goal_gender_offsets() {
        // BMR for 70 kg / 170 cm / 30 y: 700 + 1062.5 - 150 = 1612.5
        // Activity 30 min adds 200 kcal
        assert_eq!(
            calorie_goal(70.0, 170.0, 30, Gender::Unspecified, 30.0),
            1812
        );
        assert_eq!(calorie_goal(70.0, 170.0, 30, Gender::Male, 30.0), 1817);
        assert_eq!(calorie_goal(70.0, 170.0, 30, Gender::Female, 30.0), 1651);
    }

    #[test]
    fn test_calorie_goal_activity_bonus_capped_at_400() {
        let base = calorie_goal(70.0, 170.0, 30, Gender::Unspecified, 0.0);
        let capped = calorie_goal(70.0, 170.0, 30, Gender::Unspecified, 720.0);
        assert_eq!(capped - base, 400);
    }

    #[test]
    fn test_calorie_goal_no_floor_here() {
        // The formula may legitimately go below 1200; the ledger floors it
        let goal = calorie_goal(30.0, 140.0, 90, Gender::Female, 0.0);
        assert!(goal < 1200);
    }

    #[test]
    fn test_estimate_workout_running_reference() {
        let (calories, water_bonus) =
            estimate_workout(&WorkoutKind::parse("бег"), 30.0, 70.0);
        assert!((calories - 360.15).abs() < 1e-9);
        assert_eq!(water_bonus, 200);
    }

    #[test]
    fn test_water_bonus_step_boundary() {
        let (_, at_30) = estimate_workout(&WorkoutKind::Running, 30.0, 70.0);
        let (_, at_31) = estimate_workout(&WorkoutKind::Running, 31.0, 70.0);
        let (_, at_1) = estimate_workout(&WorkoutKind::Running, 1.0, 70.0);
        assert_eq!(at_30, 200);
        assert_eq!(at_31, 400);
        assert_eq!(at_1, 200);
    }

    #[test]
    fn test_zero_minutes_earns_no_bonus() {
        let (calories, water_bonus) = estimate_workout(&WorkoutKind::Yoga, 0.0, 70.0);
        assert_eq!(calories, 0.0);
        assert_eq!(water_bonus, 0);
    }

    #[test]
    fn test_unknown_kind_uses_default_met() {
        let (calories, _) =
            estimate_workout(&WorkoutKind::Other("dance".into()), 30.0, 70.0);
        assert!((calories - 0.0175 * 6.0 * 70.0 * 30.0).abs() < 1e-9);
    }
}
