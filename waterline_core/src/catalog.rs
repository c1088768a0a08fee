//! Workout catalog: canonical workout kinds, MET values and synonym lookup.
//!
//! The free-text workout type is resolved here, once, at the boundary; the
//! formula layer only ever sees a canonical kind.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// MET used when the workout type is not recognized
const DEFAULT_MET: f64 = 6.0;

/// Canonical workout kind with a fixed MET intensity value
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutKind {
    Running,
    Walking,
    Cycling,
    Yoga,
    Strength,
    Swimming,
    /// Unrecognized type; keeps what the user typed
    Other(String),
}

/// Synonym table, built once and reused across all lookups
static SYNONYMS: Lazy<HashMap<&'static str, WorkoutKind>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("бег", WorkoutKind::Running);
    map.insert("run", WorkoutKind::Running);
    map.insert("running", WorkoutKind::Running);
    map.insert("ходьба", WorkoutKind::Walking);
    map.insert("walk", WorkoutKind::Walking);
    map.insert("walking", WorkoutKind::Walking);
    map.insert("вело", WorkoutKind::Cycling);
    map.insert("велосипед", WorkoutKind::Cycling);
    map.insert("bike", WorkoutKind::Cycling);
    map.insert("cycling", WorkoutKind::Cycling);
    map.insert("йога", WorkoutKind::Yoga);
    map.insert("yoga", WorkoutKind::Yoga);
    map.insert("силовая", WorkoutKind::Strength);
    map.insert("сила", WorkoutKind::Strength);
    map.insert("strength", WorkoutKind::Strength);
    map.insert("плавание", WorkoutKind::Swimming);
    map.insert("swim", WorkoutKind::Swimming);
    map.insert("swimming", WorkoutKind::Swimming);
    map
});

impl WorkoutKind {
    /// Resolve free-text input into a canonical kind.
    ///
    /// Matching is case-insensitive over the fixed synonym set; anything
    /// else becomes `Other` with the trimmed input preserved.
    pub fn parse(raw: &str) -> WorkoutKind {
        let trimmed = raw.trim();
        SYNONYMS
            .get(trimmed.to_lowercase().as_str())
            .cloned()
            .unwrap_or_else(|| WorkoutKind::Other(trimmed.to_string()))
    }

    /// Metabolic equivalent of task for this kind
    pub fn met(&self) -> f64 {
        match self {
            WorkoutKind::Running => 9.8,
            WorkoutKind::Walking => 3.5,
            WorkoutKind::Cycling => 7.5,
            WorkoutKind::Yoga => 3.0,
            WorkoutKind::Strength => 6.0,
            WorkoutKind::Swimming => 8.0,
            WorkoutKind::Other(_) => DEFAULT_MET,
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutKind::Running => write!(f, "running"),
            WorkoutKind::Walking => write!(f, "walking"),
            WorkoutKind::Cycling => write!(f, "cycling"),
            WorkoutKind::Yoga => write!(f, "yoga"),
            WorkoutKind::Strength => write!(f, "strength"),
            WorkoutKind::Swimming => write!(f, "swimming"),
            WorkoutKind::Other(name) => write!(f, "{}", name),
        }
    }
}
