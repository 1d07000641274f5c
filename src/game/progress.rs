//! The persisted progression record
//!
//! One record per user, serialized as JSON with the same field names the
//! browser build of the app stored, so records move between the two.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::badges::BadgeId;
use super::levels::level_for_xp;

/// How often the user wants a practice reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFrequency {
    #[default]
    None,
    Daily,
    Weekly,
}

impl ReminderFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            _ => None,
        }
    }
}

/// Desktop-notification permission state carried with the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifPermission {
    #[default]
    Default,
    Granted,
    Denied,
}

/// Reminder configuration, preserved across progress resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    pub freq: ReminderFrequency,
    /// Next reminder time in ms since epoch; 0 when no reminder is scheduled.
    pub next_at: i64,
    pub notifs: NotifPermission,
}

/// The complete gamification state for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressRecord {
    /// Sum of all choice deltas ever applied; may go negative.
    pub score: i64,
    /// Monotonically non-decreasing.
    pub xp: u64,
    /// Always `floor(xp / 100) + 1`; recomputed, never trusted from storage.
    pub level: u32,
    /// Consecutive calendar days with at least one completion.
    pub streak: u32,
    /// Timestamp of the most recent completion, ms since epoch.
    pub last_play_date: Option<i64>,
    /// Scenario ids completed at least once.
    pub played: BTreeSet<String>,
    /// Unlocked badges, append-only, in unlock order.
    pub badges: Vec<BadgeId>,
    pub reminders: ReminderSettings,
    /// Consecutive completions with the scenario's best choice.
    pub perfect_streak: u32,
    /// Distinct calendar days with at least one completion.
    pub days_played: u32,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            score: 0,
            xp: 0,
            level: 1,
            streak: 0,
            last_play_date: None,
            played: BTreeSet::new(),
            badges: Vec::new(),
            reminders: ReminderSettings::default(),
            perfect_streak: 0,
            days_played: 0,
        }
    }
}

impl ProgressRecord {
    /// Re-derive the level from XP. Call after loading a record from storage;
    /// a stored level is never authoritative.
    pub fn normalize(mut self) -> Self {
        self.level = level_for_xp(self.xp);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names_match_browser_records() {
        let record = ProgressRecord::default();
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "score",
            "xp",
            "level",
            "streak",
            "lastPlayDate",
            "played",
            "badges",
            "reminders",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(json["reminders"]["freq"], "none");
        assert_eq!(json["reminders"]["nextAt"], 0);
        assert_eq!(json["reminders"]["notifs"], "default");
    }

    #[test]
    fn test_browser_record_without_new_counters_loads() {
        let json = r#"{
            "score": 4, "xp": 40, "level": 9, "streak": 2,
            "lastPlayDate": 1700000000000,
            "played": ["s1", "s2"],
            "badges": ["first_steps"],
            "reminders": {"freq": "daily", "nextAt": 1700086400000, "notifs": "granted"}
        }"#;
        let record: ProgressRecord = serde_json::from_str(json).unwrap();
        let record = record.normalize();
        // Stored level 9 is bogus; xp 40 means level 1
        assert_eq!(record.level, 1);
        assert_eq!(record.perfect_streak, 0);
        assert_eq!(record.days_played, 0);
        assert_eq!(record.badges, vec![BadgeId::FirstSteps]);
        assert_eq!(record.reminders.freq, ReminderFrequency::Daily);
    }
}
