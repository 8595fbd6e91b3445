//! The immutable `Intent` record loaded from the corpus file.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// An hour-of-day window, inclusive of `start_hour`, exclusive of `end_hour`.
///
/// Wraps around midnight when `start_hour > end_hour` (e.g. `22..6` covers
/// 22:00 through 05:59).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl TimeWindow {
    pub fn new(start_hour: u8, end_hour: u8) -> Self {
        Self {
            start_hour: start_hour % 24,
            end_hour: end_hour % 24,
        }
    }

    /// Whether `hour` (0..24) falls inside this window.
    pub fn contains_hour(&self, hour: u8) -> bool {
        if self.start_hour == self.end_hour {
            return true;
        }
        if self.start_hour < self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

/// Static catalogue entry. Loaded once at startup; never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub id: String,
    pub pure_text: String,
    /// Ordered example phrases; must be non-empty.
    pub examples: Vec<String>,
    pub required_location: Option<String>,
    pub helpful_location: Option<String>,
    pub required_purpose: Option<String>,
    pub required_situation: Option<String>,
    #[serde(default)]
    pub associated_intents: BTreeSet<String>,
    #[serde(default)]
    pub forbidden_when_conflicts: BTreeSet<String>,
    /// Preference consulted by the `linguistic_indicators` CRM factor.
    #[serde(default)]
    pub preferred_linguistic_indicator: Option<String>,
    /// Preference consulted by the `temporal_context` CRM factor.
    #[serde(default)]
    pub valid_time_window: Option<TimeWindow>,
    /// Hard-stop guard consulted by the `user_profile` CRM factor.
    #[serde(default)]
    pub required_user_profile: Option<String>,
    /// Boost guard consulted by the `user_profile` CRM factor.
    #[serde(default)]
    pub preferred_user_profiles: BTreeSet<String>,
    /// Preference consulted by the `prosodic_features` CRM factor.
    #[serde(default)]
    pub preferred_prosodic_feature: Option<String>,
}

impl Intent {
    /// Basic shape validation independent of other intents in the corpus
    /// (cross-intent checks like `associated_intents` referencing a known id
    /// happen in `intent-corpus` at load time, since they need the full set).
    pub fn validate_shape(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("intent id must not be empty".into());
        }
        if self.examples.is_empty() {
            return Err(format!("intent '{}' must declare at least one example", self.id));
        }
        Ok(())
    }
}
