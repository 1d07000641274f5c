//! Badge definitions and unlock checks
//!
//! All badges are defined here with their unlock requirements. Unlocks are
//! permanent: a badge id is appended to the record once and never removed.

use serde::{Deserialize, Serialize};

use super::progress::ProgressRecord;
use super::scenarios::Scenario;

/// Unique identifier for each badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeId {
    FirstSteps,
    GettingStronger,
    Advocate,
    Unstoppable,
    Warrior,
    Perfectionist,
    Dedicated,
    Master,
}

impl BadgeId {
    /// String id used in the persisted record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstSteps => "first_steps",
            Self::GettingStronger => "getting_stronger",
            Self::Advocate => "advocate",
            Self::Unstoppable => "unstoppable",
            Self::Warrior => "warrior",
            Self::Perfectionist => "perfectionist",
            Self::Dedicated => "dedicated",
            Self::Master => "master",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_steps" => Some(Self::FirstSteps),
            "getting_stronger" => Some(Self::GettingStronger),
            "advocate" => Some(Self::Advocate),
            "unstoppable" => Some(Self::Unstoppable),
            "warrior" => Some(Self::Warrior),
            "perfectionist" => Some(Self::Perfectionist),
            "dedicated" => Some(Self::Dedicated),
            "master" => Some(Self::Master),
            _ => None,
        }
    }
}

/// What a badge requires, with its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Scenarios completed at least once.
    Scenarios(u32),
    /// Total score reached.
    Score(i64),
    /// Consecutive-day streak reached.
    Streak(u32),
    /// Level reached.
    Level(u32),
    /// Consecutive best-answer choices.
    PerfectStreak(u32),
    /// Distinct days with at least one completion.
    TotalDays(u32),
    /// Every scenario in the catalog completed.
    AllScenarios,
}

/// Badge definition with all metadata.
#[derive(Debug, Clone)]
pub struct Badge {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub requirement: Requirement,
}

/// All badge definitions, in unlock-evaluation order.
pub static BADGES: &[Badge] = &[
    Badge {
        id: BadgeId::FirstSteps,
        name: "First Steps",
        description: "Complete your first scenario",
        icon: "👶",
        requirement: Requirement::Scenarios(1),
    },
    Badge {
        id: BadgeId::GettingStronger,
        name: "Getting Stronger",
        description: "Complete 5 scenarios",
        icon: "💪",
        requirement: Requirement::Scenarios(5),
    },
    Badge {
        id: BadgeId::Advocate,
        name: "Advocate",
        description: "Score 20+ points",
        icon: "⚡",
        requirement: Requirement::Score(20),
    },
    Badge {
        id: BadgeId::Unstoppable,
        name: "Unstoppable",
        description: "Get a 3-day streak",
        icon: "🔥",
        requirement: Requirement::Streak(3),
    },
    Badge {
        id: BadgeId::Warrior,
        name: "Warrior",
        description: "Reach level 5",
        icon: "⚔️",
        requirement: Requirement::Level(5),
    },
    Badge {
        id: BadgeId::Perfectionist,
        name: "Perfectionist",
        description: "Get 5 perfect scores in a row",
        icon: "✨",
        requirement: Requirement::PerfectStreak(5),
    },
    Badge {
        id: BadgeId::Dedicated,
        name: "Dedicated",
        description: "Practice for 7 days",
        icon: "🎯",
        requirement: Requirement::TotalDays(7),
    },
    Badge {
        id: BadgeId::Master,
        name: "Master",
        description: "Complete all scenarios",
        icon: "👑",
        requirement: Requirement::AllScenarios,
    },
];

impl Badge {
    /// Get badge definition by id.
    pub fn get(id: BadgeId) -> &'static Badge {
        BADGES
            .iter()
            .find(|b| b.id == id)
            .expect("all badges are defined")
    }

    /// Whether the record satisfies this badge's requirement.
    pub fn is_met(&self, record: &ProgressRecord) -> bool {
        match self.requirement {
            Requirement::Scenarios(n) => record.played.len() >= n as usize,
            Requirement::Score(n) => record.score >= n,
            Requirement::Streak(n) => record.streak >= n,
            Requirement::Level(n) => record.level >= n,
            Requirement::PerfectStreak(n) => record.perfect_streak >= n,
            Requirement::TotalDays(n) => record.days_played >= n,
            Requirement::AllScenarios => record.played.len() >= Scenario::total_count(),
        }
    }
}

/// Evaluate the catalog against a record and return badges newly earned, in
/// catalog order. Already-unlocked badges are never re-reported.
pub fn newly_earned(record: &ProgressRecord) -> Vec<&'static Badge> {
    BADGES
        .iter()
        .filter(|b| !record.badges.contains(&b.id) && b.is_met(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_id_round_trip() {
        for badge in BADGES {
            assert_eq!(BadgeId::from_str(badge.id.as_str()), Some(badge.id));
        }
        assert_eq!(BadgeId::from_str("no_such_badge"), None);
    }

    #[test]
    fn test_first_steps_fires_on_zero_to_one_only() {
        let mut record = ProgressRecord::default();
        assert!(newly_earned(&record).is_empty());

        record.played.insert("s1".to_string());
        let earned = newly_earned(&record);
        assert_eq!(earned.len(), 1);
        assert_eq!(earned[0].id, BadgeId::FirstSteps);

        // Once recorded as unlocked, it never fires again
        record.badges.push(BadgeId::FirstSteps);
        record.played.insert("s2".to_string());
        assert!(newly_earned(&record).is_empty());
    }

    #[test]
    fn test_master_requires_full_catalog() {
        let mut record = ProgressRecord::default();
        for s in super::super::scenarios::SCENARIOS.iter().take(5) {
            record.played.insert(s.id.to_string());
        }
        assert!(!Badge::get(BadgeId::Master).is_met(&record));
        record.played.insert("s6".to_string());
        assert!(Badge::get(BadgeId::Master).is_met(&record));
    }

    #[test]
    fn test_earned_in_catalog_order() {
        let mut record = ProgressRecord::default();
        record.score = 25;
        for s in super::super::scenarios::SCENARIOS {
            record.played.insert(s.id.to_string());
        }
        let ids: Vec<BadgeId> = newly_earned(&record).iter().map(|b| b.id).collect();
        assert_eq!(
            ids,
            vec![
                BadgeId::FirstSteps,
                BadgeId::GettingStronger,
                BadgeId::Advocate,
                BadgeId::Master
            ]
        );
    }
}
