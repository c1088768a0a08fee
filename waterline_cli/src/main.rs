use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use waterline_core::ledger;
use waterline_core::log as daylog;
use waterline_core::{
    Config, FoodClient, Gender, GoalOverride, Ledger, ProfileUpdate, WeatherClient, WorkoutKind,
};

mod render;

#[derive(Parser)]
#[command(name = "waterline")]
#[command(about = "Daily water and calorie balance assistant", long_about = None)]
struct Cli {
    /// Numeric user identifier for this session
    #[arg(long, default_value_t = 1)]
    user: i64,

    /// Override config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip weather and food lookups (no network access)
    #[arg(long)]
    offline: bool,
}

fn main() -> waterline_core::Result<()> {
    // Initialize logging
    waterline_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let app = App::new(&config, cli.offline)?;
    app.run(cli.user)
}

enum Outcome {
    Continue,
    Quit,
}

struct App {
    ledger: Ledger,
    weather: WeatherClient,
    food: FoodClient,
    offline: bool,
}

impl App {
    fn new(config: &Config, offline: bool) -> waterline_core::Result<Self> {
        Ok(Self {
            ledger: Ledger::new(),
            weather: WeatherClient::new(&config.weather)?,
            food: FoodClient::new(&config.food)?,
            offline,
        })
    }

    /// Interactive session loop: one command per line until quit or EOF
    fn run(&self, initial_user: i64) -> waterline_core::Result<()> {
        let mut user = initial_user;

        {
            let handle = self.ledger.get_or_create(user);
            let profile = handle.lock();
            println!("Hi! I track daily water and calories.");
            println!(
                "Water goal: {} mL. Calorie goal: {} kcal.",
                profile.water_goal, profile.calorie_goal
            );
            println!("Type 'help' for the command list, 'quit' to leave.");
        }

        let stdin = io::stdin();
        let mut input = stdin.lock();
        loop {
            print!("> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break; // EOF
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            tracing::debug!("command: {}", line);

            match self.dispatch(&mut user, line) {
                Outcome::Continue => {}
                Outcome::Quit => break,
            }
        }

        println!("Bye! Totals live for this session only.");
        Ok(())
    }

    fn dispatch(&self, user: &mut i64, line: &str) -> Outcome {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens[0].to_lowercase().as_str() {
            "water" => self.cmd_water(*user, &tokens[1..]),
            "food" => self.cmd_food(*user, &tokens[1..]),
            "workout" => self.cmd_workout(*user, &tokens[1..]),
            "profile" => self.cmd_profile(*user, &tokens[1..]),
            "progress" => {
                let handle = self.ledger.get_or_create(*user);
                println!("{}", render::format_progress(&handle.lock()));
            }
            "chart" => {
                let handle = self.ledger.get_or_create(*user);
                println!("{}", render::render_chart(&handle.lock()));
            }
            "user" => self.cmd_user(user, &tokens[1..]),
            "help" => print_help(),
            "quit" | "exit" => return Outcome::Quit,
            other => {
                println!("Unknown command '{}'. Type 'help' for the list.", other);
            }
        }
        Outcome::Continue
    }

    fn cmd_water(&self, user: i64, args: &[&str]) {
        let Some(amount) = args.first().and_then(|raw| parse_number(raw)) else {
            println!("Usage: water <millilitres>, e.g. water 300");
            return;
        };

        let handle = self.ledger.get_or_create(user);
        let mut profile = handle.lock();
        match daylog::log_water(&mut profile, amount) {
            Ok(()) => println!(
                "Logged {:.0} mL. {:.0} mL left to the {} mL goal.",
                amount,
                profile.water_remaining(),
                profile.water_goal
            ),
            Err(err) => println!("{}", err),
        }
    }

    fn cmd_food(&self, user: i64, args: &[&str]) {
        if args.len() < 2 {
            println!("Usage: food <grams> <name...> [kcal=<per 100 g>]");
            return;
        }
        let Some(grams) = parse_number(args[0]) else {
            println!("Enter the mass in grams first, e.g. food 150 apple");
            return;
        };
        if grams <= 0.0 {
            println!("Food mass must be a positive number of grams.");
            return;
        }

        // A trailing kcal=<v> token is the caller-resolved path: no lookup
        let mut manual_kcal = None;
        let mut name_parts = Vec::new();
        for token in &args[1..] {
            if let Some(value) = token.strip_prefix("kcal=") {
                manual_kcal = parse_number(value);
            } else {
                name_parts.push(*token);
            }
        }
        let name = name_parts.join(" ");
        if name.is_empty() {
            println!("Usage: food <grams> <name...> [kcal=<per 100 g>]");
            return;
        }

        let resolved = match manual_kcal {
            Some(kcal) => Some((name.clone(), kcal)),
            None if self.offline => {
                println!(
                    "Food lookup needs the network; rerun without --offline \
                     or pass kcal=<per 100 g>."
                );
                return;
            }
            None => match self.food.search(&name) {
                Some(info) => {
                    println!(
                        "{} — {:.0} kcal per 100 g.",
                        info.name, info.calories_per_100g
                    );
                    Some((info.name, info.calories_per_100g))
                }
                None => None,
            },
        };

        let Some((resolved_name, kcal_per_100g)) = resolved else {
            println!("No food found for '{}'. Try a different name.", name);
            return;
        };

        let handle = self.ledger.get_or_create(user);
        let mut profile = handle.lock();
        match daylog::log_food(&mut profile, &resolved_name, grams, kcal_per_100g) {
            Ok(calories) => println!(
                "Logged: {} — {:.0} kcal ({:.0} g).",
                resolved_name, calories, grams
            ),
            Err(err) => println!("{}", err),
        }
    }

    fn cmd_workout(&self, user: i64, args: &[&str]) {
        if args.len() < 2 {
            println!(
                "Usage: workout <type> <minutes>. Types: running, walking, \
                 cycling, yoga, strength, swimming."
            );
            return;
        }

        // The last token is the duration, everything before it is the type
        let Some((minutes_raw, kind_parts)) = args.split_last() else {
            return;
        };
        let Some(minutes) = parse_number(minutes_raw) else {
            println!("Enter the duration in minutes, e.g. workout running 30");
            return;
        };
        let kind = WorkoutKind::parse(&kind_parts.join(" "));

        let handle = self.ledger.get_or_create(user);
        let mut profile = handle.lock();
        match daylog::log_workout(&mut profile, kind.clone(), minutes) {
            Ok((calories, water_bonus)) => {
                println!(
                    "Logged {}: {:.0} min, {:.0} kcal burned, +{} mL to drink.",
                    kind, minutes, calories, water_bonus
                );
                println!("Water goal is now {} mL.", profile.water_goal);
            }
            Err(err) => println!("{}", err),
        }
    }

    fn cmd_profile(&self, user: i64, args: &[&str]) {
        if args.is_empty() {
            println!(
                "Usage: profile key=value ... Keys: weight, height, age, \
                 activity, city, gender, calories (number or 'auto')."
            );
            return;
        }

        let mut update = ProfileUpdate::default();
        for token in args {
            let Some((key, value)) = token.split_once('=') else {
                println!("Expected key=value, got '{}'.", token);
                return;
            };
            match key.to_lowercase().as_str() {
                "weight" => match numeric_value("weight", value) {
                    Some(v) => update.weight = Some(v),
                    None => return,
                },
                "height" => match numeric_value("height", value) {
                    Some(v) => update.height = Some(v),
                    None => return,
                },
                "age" => match value.parse::<u32>() {
                    Ok(v) => update.age = Some(v),
                    Err(_) => {
                        println!("age takes a whole number, got '{}'.", value);
                        return;
                    }
                },
                "activity" => match numeric_value("activity", value) {
                    Some(v) => update.activity = Some(v),
                    None => return,
                },
                "city" => update.city = Some(value.to_string()),
                "gender" => update.gender = Some(Gender::parse(value)),
                "calories" => {
                    update.calorie_goal_manual = match value.to_lowercase().as_str() {
                        "auto" | "skip" | "авто" => GoalOverride::Auto,
                        raw => match parse_number(raw) {
                            Some(goal) => GoalOverride::Manual(goal),
                            None => {
                                println!("calories takes a number or 'auto'.");
                                return;
                            }
                        },
                    }
                }
                other => {
                    println!("Unknown profile key '{}'.", other);
                    return;
                }
            }
        }

        let handle = self.ledger.get_or_create(user);
        let mut profile = handle.lock();
        if let Err(err) = daylog::apply_profile_update(&mut profile, update) {
            println!("{}", err);
            return;
        }

        if !self.offline {
            if let Some(temperature) = self.weather.fetch_temperature(&profile.city) {
                profile.temperature = Some(temperature);
            }
        }
        ledger::recalc_goals(&mut profile);

        println!("Profile updated.");
        println!(
            "Water goal: {} mL. Calorie goal: {} kcal.",
            profile.water_goal, profile.calorie_goal
        );
        if let Some(temperature) = profile.temperature {
            println!("Temperature in {}: {:.1} °C.", profile.city, temperature);
        }
    }

    fn cmd_user(&self, user: &mut i64, args: &[&str]) {
        let Some(id) = args.first().and_then(|raw| raw.parse::<i64>().ok()) else {
            println!("Usage: user <numeric id>");
            return;
        };

        *user = id;
        let handle = self.ledger.get_or_create(id);
        let profile = handle.lock();
        println!(
            "Switched to user {}. Water goal: {} mL. Calorie goal: {} kcal.",
            id, profile.water_goal, profile.calorie_goal
        );
    }
}

/// Parse a number, accepting a decimal comma ("82,5")
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse().ok()
}

fn numeric_value(key: &str, value: &str) -> Option<f64> {
    let parsed = parse_number(value);
    if parsed.is_none() {
        println!("{} takes a number, got '{}'.", key, value);
    }
    parsed
}

fn print_help() {
    println!("Commands:");
    println!("  water <ml>                      log drunk water");
    println!("  food <grams> <name...> [kcal=N] log eaten food (N = kcal per 100 g, skips lookup)");
    println!("  workout <type> <minutes>        log a workout and its burned calories");
    println!("  profile key=value ...           update weight, height, age, activity, city,");
    println!("                                  gender, calories (number or 'auto')");
    println!("  progress                        show today's totals");
    println!("  chart                           show progress bars");
    println!("  user <id>                       switch the active user");
    println!("  quit                            leave");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_accepts_decimal_comma() {
        assert_eq!(parse_number("82,5"), Some(82.5));
        assert_eq!(parse_number(" 300 "), Some(300.0));
        assert_eq!(parse_number("300.5"), Some(300.5));
        assert_eq!(parse_number("abc"), None);
    }
}
