//! Progression engine
//!
//! Pure transitions over a [`ProgressRecord`]. Every operation takes the
//! current record plus the current time and returns a new record; the caller
//! owns persistence and event presentation. Unlockables surface as an ordered
//! event list, never as calls into presentation code.

use thiserror::Error;

use super::badges::{newly_earned, Badge};
use super::levels::{level_for_xp, xp_gain};
use super::progress::ProgressRecord;
use super::scenarios::Scenario;
use super::streak::{relate, DayRelation};

/// Contract violations. The catalogs are compiled in, so any of these means
/// a caller bug, not a runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown scenario id: {0}")]
    UnknownScenario(String),
    #[error("scenario {scenario} has no choice index {index}")]
    UnknownChoice { scenario: String, index: usize },
}

/// Events produced while applying a choice, in the order they occurred.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    LevelUp { level: u32 },
    StreakExtended { days: u32 },
    BadgeUnlocked { badge: &'static Badge },
}

impl ProgressEvent {
    pub fn title(&self) -> &'static str {
        match self {
            Self::LevelUp { .. } => "Level Up!",
            Self::StreakExtended { .. } => "Streak!",
            Self::BadgeUnlocked { .. } => "Badge Earned!",
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Self::LevelUp { level } => format!("Welcome to Level {level}!"),
            Self::StreakExtended { days } => format!("+{days} day streak!"),
            Self::BadgeUnlocked { badge } => format!("{} {}", badge.icon, badge.name),
        }
    }
}

/// Result of applying a choice: the next record, the choice's feedback text,
/// and the events to show.
#[derive(Debug, Clone)]
pub struct ChoiceOutcome {
    pub record: ProgressRecord,
    pub feedback: &'static str,
    pub events: Vec<ProgressEvent>,
}

/// Apply one completed scenario choice to the record.
///
/// The delta and feedback come from the compiled-in catalog; an id or index
/// outside it is rejected. Persisting the returned record and rescheduling
/// reminders are the caller's follow-up steps.
pub fn apply_choice(
    record: &ProgressRecord,
    scenario_id: &str,
    choice_index: usize,
    now_ms: i64,
) -> Result<ChoiceOutcome, EngineError> {
    let scenario = Scenario::get(scenario_id)
        .ok_or_else(|| EngineError::UnknownScenario(scenario_id.to_string()))?;
    let choice = scenario
        .choices
        .get(choice_index)
        .ok_or_else(|| EngineError::UnknownChoice {
            scenario: scenario_id.to_string(),
            index: choice_index,
        })?;

    let mut next = record.clone();
    let mut events = Vec::new();

    next.score += i64::from(choice.delta);

    next.xp += xp_gain(choice.delta);
    next.level = level_for_xp(next.xp);
    if next.level > record.level {
        events.push(ProgressEvent::LevelUp { level: next.level });
    }

    // Streak counts calendar days, so a second completion the same day is a
    // no-op here while score, XP and badges still advance.
    match relate(next.last_play_date, now_ms) {
        DayRelation::SameDay => {}
        DayRelation::NextDay => {
            next.streak += 1;
            next.days_played += 1;
            next.last_play_date = Some(now_ms);
            events.push(ProgressEvent::StreakExtended { days: next.streak });
        }
        DayRelation::FirstPlay | DayRelation::Gap => {
            next.streak = 1;
            next.days_played += 1;
            next.last_play_date = Some(now_ms);
            events.push(ProgressEvent::StreakExtended { days: next.streak });
        }
    }

    next.played.insert(scenario_id.to_string());

    if choice.delta == scenario.best_delta() {
        next.perfect_streak += 1;
    } else {
        next.perfect_streak = 0;
    }

    for badge in newly_earned(&next) {
        next.badges.push(badge.id);
        events.push(ProgressEvent::BadgeUnlocked { badge });
    }

    Ok(ChoiceOutcome {
        record: next,
        feedback: choice.feedback,
        events,
    })
}

/// Start over: zeroed progress, reminder configuration carried forward.
pub fn reset(record: &ProgressRecord) -> ProgressRecord {
    ProgressRecord {
        reminders: record.reminders,
        ..ProgressRecord::default()
    }
}

#[cfg(test)]
mod tests {
    use super::super::progress::{ReminderFrequency, ReminderSettings};
    use super::super::streak::DAY_MS;
    use super::*;

    fn day(n: i64) -> i64 {
        // Mid-morning on day n, away from day boundaries
        n * DAY_MS + 9 * 60 * 60 * 1000
    }

    /// First choice of s1 carries delta 2.
    fn play_best(record: &ProgressRecord, scenario: &str, now: i64) -> ChoiceOutcome {
        apply_choice(record, scenario, 0, now).unwrap()
    }

    #[test]
    fn test_two_day_walkthrough() {
        let outcome = play_best(&ProgressRecord::default(), "s1", day(1));
        let r = &outcome.record;
        assert_eq!((r.xp, r.score, r.level, r.streak), (20, 2, 1, 1));
        assert!(r.played.contains("s1"));
        assert_eq!(r.played.len(), 1);

        let outcome = play_best(r, "s2", day(2));
        let r = &outcome.record;
        assert_eq!((r.xp, r.score, r.streak), (40, 4, 2));
    }

    #[test]
    fn test_streak_resets_after_skipped_day() {
        let r = play_best(&ProgressRecord::default(), "s1", day(1)).record;
        assert_eq!(r.streak, 1);
        let r = play_best(&r, "s2", day(2)).record;
        assert_eq!(r.streak, 2);
        let r = play_best(&r, "s3", day(4)).record;
        assert_eq!(r.streak, 1);
    }

    #[test]
    fn test_second_play_same_day_keeps_streak() {
        let r = play_best(&ProgressRecord::default(), "s1", day(1)).record;
        let first_play_date = r.last_play_date;

        let outcome = play_best(&r, "s2", day(1) + 3_600_000);
        let r = &outcome.record;
        assert_eq!(r.streak, 1);
        assert_eq!(r.last_play_date, first_play_date);
        // Score and XP still advance
        assert_eq!(r.score, 4);
        assert_eq!(r.xp, 40);
        assert!(!outcome
            .events
            .iter()
            .any(|e| matches!(e, ProgressEvent::StreakExtended { .. })));
    }

    #[test]
    fn test_replay_does_not_duplicate_played_set() {
        let r = play_best(&ProgressRecord::default(), "s1", day(1)).record;
        let r = play_best(&r, "s1", day(1)).record;
        assert_eq!(r.played.len(), 1);
        assert_eq!(r.streak, 1);
    }

    #[test]
    fn test_worst_choice_still_gains_xp() {
        // Second choice of s1 carries delta -1
        let outcome = apply_choice(&ProgressRecord::default(), "s1", 1, day(1)).unwrap();
        assert_eq!(outcome.record.score, -1);
        assert_eq!(outcome.record.xp, 5);
    }

    #[test]
    fn test_level_is_always_derived_from_xp() {
        let mut record = ProgressRecord::default();
        for n in 0..12 {
            let scenario = super::super::scenarios::SCENARIOS[n % 6].id;
            record = play_best(&record, scenario, day(n as i64 + 1)).record;
            assert_eq!(record.level, level_for_xp(record.xp));
        }
    }

    #[test]
    fn test_level_up_event_fires_on_threshold() {
        let mut record = ProgressRecord::default();
        // Four best plays: 80 XP, still level 1
        for n in 0..4 {
            let outcome = play_best(&record, "s1", day(n + 1));
            assert!(!outcome
                .events
                .iter()
                .any(|e| matches!(e, ProgressEvent::LevelUp { .. })));
            record = outcome.record;
        }
        // Fifth reaches 100 XP
        let outcome = play_best(&record, "s1", day(5));
        assert_eq!(outcome.record.level, 2);
        assert!(outcome
            .events
            .iter()
            .any(|e| matches!(e, ProgressEvent::LevelUp { level: 2 })));
    }

    #[test]
    fn test_first_steps_unlocks_with_first_play_only() {
        let outcome = play_best(&ProgressRecord::default(), "s1", day(1));
        let unlocked: Vec<&str> = outcome
            .events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::BadgeUnlocked { badge } => Some(badge.id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(unlocked, vec!["first_steps"]);

        let outcome = play_best(&outcome.record, "s2", day(1));
        assert!(!outcome
            .events
            .iter()
            .any(|e| matches!(e, ProgressEvent::BadgeUnlocked { badge } if badge.id.as_str() == "first_steps")));
    }

    #[test]
    fn test_perfect_streak_counts_best_choices_only() {
        let mut record = ProgressRecord::default();
        for n in 0..4 {
            record = play_best(&record, "s1", day(n + 1)).record;
        }
        assert_eq!(record.perfect_streak, 4);

        // A non-best choice resets the run
        record = apply_choice(&record, "s1", 2, day(5)).unwrap().record;
        assert_eq!(record.perfect_streak, 0);
    }

    #[test]
    fn test_dedicated_unlocks_after_seven_days() {
        let mut record = ProgressRecord::default();
        for n in 0..7 {
            record = play_best(&record, "s1", day(n + 1)).record;
        }
        assert_eq!(record.days_played, 7);
        assert!(record
            .badges
            .iter()
            .any(|b| b.as_str() == "dedicated"));
    }

    #[test]
    fn test_reset_preserves_reminders() {
        let mut record = play_best(&ProgressRecord::default(), "s1", day(1)).record;
        record.reminders = ReminderSettings {
            freq: ReminderFrequency::Weekly,
            next_at: 123_456,
            notifs: Default::default(),
        };

        let fresh = reset(&record);
        assert_eq!(fresh.score, 0);
        assert_eq!(fresh.xp, 0);
        assert_eq!(fresh.level, 1);
        assert_eq!(fresh.streak, 0);
        assert!(fresh.played.is_empty());
        assert!(fresh.badges.is_empty());
        assert_eq!(fresh.reminders, record.reminders);
    }

    #[test]
    fn test_contract_violations_are_errors() {
        let record = ProgressRecord::default();
        assert_eq!(
            apply_choice(&record, "s99", 0, day(1)).unwrap_err(),
            EngineError::UnknownScenario("s99".to_string())
        );
        assert_eq!(
            apply_choice(&record, "s1", 3, day(1)).unwrap_err(),
            EngineError::UnknownChoice {
                scenario: "s1".to_string(),
                index: 3
            }
        );
    }
}
