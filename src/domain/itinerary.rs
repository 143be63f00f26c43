//! Localized activities and the three-day itinerary built from them

use serde::{Deserialize, Serialize};
use crate::shared::utils::capitalize;

pub const ITINERARY_DAYS: usize = 3;

const DAY_FALLBACKS: [&str; ITINERARY_DAYS] = ["Arrival & explore", "Local highlights", "Relax & departure"];

/// A suggested activity with a free-text clock label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedActivity {
    pub title: String,
    pub time: String,
}

impl LocalizedActivity {
    pub fn new(title: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            time: time.into(),
        }
    }
}

/// Curated activities, matched by case-insensitive substring of the destination
const CURATED: &[(&str, &[(&str, &str)])] = &[
    (
        "goa",
        &[
            ("Sunrise yoga at Palolem", "6:30 AM"),
            ("Beachside seafood crawl", "8:00 PM"),
            ("Flea market at Anjuna", "3:00 PM"),
        ],
    ),
    (
        "paris",
        &[
            ("Seine river sunset cruise", "7:30 PM"),
            ("Eiffel Tower night visit", "9:00 PM"),
        ],
    ),
];

/// Activities for a destination: curated when known, templated otherwise
pub fn localized_activities(destination: &str) -> Vec<LocalizedActivity> {
    let needle = destination.to_lowercase();
    if needle.trim().is_empty() {
        return vec![
            LocalizedActivity::new("Local walking tour", "10:00 AM"),
            LocalizedActivity::new("Popular food market", "7:00 PM"),
        ];
    }

    if let Some((_, activities)) = CURATED.iter().find(|(key, _)| needle.contains(*key)) {
        return activities
            .iter()
            .map(|(title, time)| LocalizedActivity::new(*title, *time))
            .collect();
    }

    let place = capitalize(destination);
    vec![
        LocalizedActivity::new(format!("{} cultural walking tour", place), "10:00 AM"),
        LocalizedActivity::new(format!("{} local cuisine tasting", place), "7:00 PM"),
    ]
}

/// Fixed three-line day plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub days: Vec<String>,
}

impl Itinerary {
    /// Day `i` takes activity `i`; missing activities fall back to a generic phrase
    pub fn from_activities(activities: &[LocalizedActivity]) -> Self {
        let days = DAY_FALLBACKS
            .iter()
            .enumerate()
            .map(|(i, fallback)| {
                let title = activities.get(i).map(|a| a.title.as_str()).unwrap_or(*fallback);
                format!("Day {} — {}", i + 1, title)
            })
            .collect();
        Self { days }
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }
}

impl Default for Itinerary {
    fn default() -> Self {
        Self {
            days: vec![
                "Day 1 — Beach walk and local market".to_string(),
                "Day 2 — Nature trip and spice plantation".to_string(),
                "Day 3 — Cultural tour and food crawl".to_string(),
            ],
        }
    }
}

/// Activities shown before any destination has been applied
pub fn default_activities() -> Vec<LocalizedActivity> {
    vec![
        LocalizedActivity::new("Sunrise yoga", "6:30 AM"),
        LocalizedActivity::new("Flea market at Anjuna", "3:00 PM"),
        LocalizedActivity::new("Live music at Baga", "9:00 PM"),
    ]
}
