//! Gamified practice simulator
//!
//! The progression engine: scoring, XP and levels, daily streaks, badge
//! unlocks and reminder scheduling, all as pure functions over one
//! [`ProgressRecord`]. Callers load the record, apply an operation, persist
//! the returned record, and render the returned events.

mod badges;
mod engine;
mod levels;
mod progress;
mod reminders;
mod scenarios;
mod streak;

pub use badges::{newly_earned, Badge, BadgeId, Requirement, BADGES};
pub use engine::{apply_choice, reset, ChoiceOutcome, EngineError, ProgressEvent};
pub use levels::{level_for_xp, xp_gain, xp_into_level, xp_to_next_level, XP_PER_LEVEL};
pub use progress::{NotifPermission, ProgressRecord, ReminderFrequency, ReminderSettings};
pub use reminders::{check_due, period_ms, reschedule_if_needed, set_frequency, snooze};
pub use scenarios::{next_scenario, Choice, Scenario, SCENARIOS};
pub use streak::{epoch_day, relate, DayRelation, DAY_MS};
