//! Terminal rendering of a profile's daily state.

use waterline_core::Profile;

const BAR_WIDTH: usize = 24;

/// Text summary of today's water and calorie state
pub fn format_progress(profile: &Profile) -> String {
    let mut lines = vec![
        "Progress:".to_string(),
        "Water:".to_string(),
        format!(
            "- Drunk: {:.0} mL of {} mL.",
            profile.logged_water, profile.water_goal
        ),
        format!("- Remaining: {:.0} mL.", profile.water_remaining()),
        "Calories:".to_string(),
        format!(
            "- Consumed: {:.0} kcal of {} kcal.",
            profile.logged_calories, profile.calorie_goal
        ),
        format!("- Burned: {:.0} kcal.", profile.burned_calories),
        format!(
            "- Balance: {:.0} kcal. Remaining to goal: {:.0} kcal.",
            profile.calorie_balance(),
            profile.calories_remaining()
        ),
    ];
    if let Some(temperature) = profile.temperature {
        lines.push(format!(
            "Temperature in {}: {:.1} °C.",
            profile.city, temperature
        ));
    }
    lines.join("\n")
}

/// Bar-chart view: one panel for water, one for calories
pub fn render_chart(profile: &Profile) -> String {
    let water_goal = f64::from(profile.water_goal.max(1));
    let calorie_goal = f64::from(profile.calorie_goal.max(1));
    let water_scale = profile.logged_water.max(water_goal);
    let calorie_scale = profile
        .logged_calories
        .max(profile.burned_calories)
        .max(calorie_goal);

    let lines = vec![
        "Today's progress".to_string(),
        "Water (mL)".to_string(),
        format!(
            "  Drunk  {} {:>6.0}",
            bar(profile.logged_water, water_scale),
            profile.logged_water
        ),
        format!(
            "  Goal   {} {:>6}",
            bar(water_goal, water_scale),
            profile.water_goal
        ),
        "Calories (kcal)".to_string(),
        format!(
            "  Eaten  {} {:>6.0}",
            bar(profile.logged_calories, calorie_scale),
            profile.logged_calories
        ),
        format!(
            "  Burned {} {:>6.0}",
            bar(profile.burned_calories, calorie_scale),
            profile.burned_calories
        ),
        format!(
            "  Goal   {} {:>6}",
            bar(calorie_goal, calorie_scale),
            profile.calorie_goal
        ),
    ];
    lines.join("\n")
}

fn bar(value: f64, scale: f64) -> String {
    let filled = if scale > 0.0 {
        ((value / scale) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    let filled = filled.min(BAR_WIDTH);
    format!("|{}{}|", "█".repeat(filled), "·".repeat(BAR_WIDTH - filled))
}
