//! Calendar-day arithmetic for streak tracking
//!
//! Days are compared as whole UTC days since the Unix epoch, so two plays on
//! the same calendar date never extend a streak regardless of the hours
//! between them, and a play at 23:59 followed by 00:01 counts as consecutive
//! days.

/// Milliseconds in one UTC day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Whole UTC days since the Unix epoch for a millisecond timestamp.
pub fn epoch_day(ts_ms: i64) -> i64 {
    ts_ms.div_euclid(DAY_MS)
}

/// How "now" relates to the last recorded play, by calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRelation {
    /// No play recorded yet.
    FirstPlay,
    /// Same calendar day as the last play.
    SameDay,
    /// Exactly one calendar day after the last play.
    NextDay,
    /// Two or more days later, or earlier than the last play (clock skew).
    Gap,
}

/// Classify `now_ms` against an optional last-play timestamp.
pub fn relate(last_play_ms: Option<i64>, now_ms: i64) -> DayRelation {
    let Some(last) = last_play_ms else {
        return DayRelation::FirstPlay;
    };

    match epoch_day(now_ms) - epoch_day(last) {
        0 => DayRelation::SameDay,
        1 => DayRelation::NextDay,
        _ => DayRelation::Gap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_day_boundaries() {
        assert_eq!(epoch_day(0), 0);
        assert_eq!(epoch_day(DAY_MS - 1), 0);
        assert_eq!(epoch_day(DAY_MS), 1);
        // Pre-epoch timestamps still bucket into whole days
        assert_eq!(epoch_day(-1), -1);
    }

    #[test]
    fn test_two_minutes_across_midnight_is_next_day() {
        let just_before = DAY_MS - 60_000; // 23:59 UTC
        let just_after = DAY_MS + 60_000; // 00:01 UTC the next day
        assert_eq!(relate(Some(just_before), just_after), DayRelation::NextDay);
    }

    #[test]
    fn test_twenty_hours_same_date_is_same_day() {
        let morning = 2 * 60 * 60 * 1000; // 02:00
        let evening = 22 * 60 * 60 * 1000; // 22:00 same date
        assert_eq!(relate(Some(morning), evening), DayRelation::SameDay);
    }

    #[test]
    fn test_gap_and_skew() {
        assert_eq!(relate(Some(0), 2 * DAY_MS), DayRelation::Gap);
        // Last play in the future relative to now
        assert_eq!(relate(Some(3 * DAY_MS), DAY_MS), DayRelation::Gap);
        assert_eq!(relate(None, DAY_MS), DayRelation::FirstPlay);
    }
}
