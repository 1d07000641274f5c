//! Reminder scheduling
//!
//! Pure transitions on the record's reminder settings. Rescheduling is always
//! anchored to the time of the call, so late checks never accumulate a
//! backlog of past-due reminders.

use super::progress::{ProgressRecord, ReminderFrequency};
use super::streak::DAY_MS;

/// Reminder period for a frequency, in milliseconds.
pub fn period_ms(freq: ReminderFrequency) -> Option<i64> {
    match freq {
        ReminderFrequency::None => None,
        ReminderFrequency::Daily => Some(DAY_MS),
        ReminderFrequency::Weekly => Some(7 * DAY_MS),
    }
}

/// Set the reminder frequency and schedule the next reminder from `now_ms`.
///
/// Idempotent: the same frequency at the same time yields the same schedule.
pub fn set_frequency(
    record: &ProgressRecord,
    freq: ReminderFrequency,
    now_ms: i64,
) -> ProgressRecord {
    let mut next = record.clone();
    next.reminders.freq = freq;
    next.reminders.next_at = match period_ms(freq) {
        Some(period) => now_ms + period,
        None => 0,
    };
    next
}

/// Check whether a reminder is due and, if so, schedule the next one.
///
/// Returns `(due, record')`. A second check at the same `now_ms` reports not
/// due, because the first check already moved `next_at` one period ahead.
pub fn check_due(record: &ProgressRecord, now_ms: i64) -> (bool, ProgressRecord) {
    let r = record.reminders;
    let Some(period) = period_ms(r.freq) else {
        return (false, record.clone());
    };
    if r.next_at == 0 || now_ms < r.next_at {
        return (false, record.clone());
    }
    let mut next = record.clone();
    next.reminders.next_at = now_ms + period;
    (true, next)
}

/// Push the next reminder out to one day from now.
pub fn snooze(record: &ProgressRecord, now_ms: i64) -> ProgressRecord {
    let mut next = record.clone();
    next.reminders.next_at = now_ms + DAY_MS;
    next
}

/// Ensure an active reminder has a future schedule, e.g. after a completed
/// scenario. No-op when reminders are off or the schedule is already ahead.
pub fn reschedule_if_needed(record: &ProgressRecord, now_ms: i64) -> ProgressRecord {
    let r = record.reminders;
    let Some(period) = period_ms(r.freq) else {
        return record.clone();
    };
    if r.next_at != 0 && r.next_at >= now_ms {
        return record.clone();
    }
    let mut next = record.clone();
    next.reminders.next_at = now_ms + period;
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_frequency() {
        let record = ProgressRecord::default();
        let now = 1_000_000;

        let daily = set_frequency(&record, ReminderFrequency::Daily, now);
        assert_eq!(daily.reminders.next_at, now + DAY_MS);

        let weekly = set_frequency(&record, ReminderFrequency::Weekly, now);
        assert_eq!(weekly.reminders.next_at, now + 7 * DAY_MS);

        let off = set_frequency(&daily, ReminderFrequency::None, now);
        assert_eq!(off.reminders.next_at, 0);

        // Idempotent for equal inputs
        let again = set_frequency(&record, ReminderFrequency::Daily, now);
        assert_eq!(again.reminders, daily.reminders);
    }

    #[test]
    fn test_check_due_fires_once() {
        let record = set_frequency(&ProgressRecord::default(), ReminderFrequency::Daily, 0);
        let now = record.reminders.next_at + 5_000;

        let (due, record) = check_due(&record, now);
        assert!(due);
        assert_eq!(record.reminders.next_at, now + DAY_MS);

        let (due_again, _) = check_due(&record, now);
        assert!(!due_again);
    }

    #[test]
    fn test_check_due_ignores_unscheduled() {
        let record = ProgressRecord::default();
        let (due, _) = check_due(&record, i64::MAX);
        assert!(!due);
    }

    #[test]
    fn test_late_check_reschedules_from_now_not_from_missed_slot() {
        let record = set_frequency(&ProgressRecord::default(), ReminderFrequency::Daily, 0);
        // Three days late
        let now = record.reminders.next_at + 3 * DAY_MS;
        let (due, record) = check_due(&record, now);
        assert!(due);
        assert_eq!(record.reminders.next_at, now + DAY_MS);
    }

    #[test]
    fn test_snooze() {
        let record = set_frequency(&ProgressRecord::default(), ReminderFrequency::Weekly, 0);
        let snoozed = snooze(&record, 10_000);
        assert_eq!(snoozed.reminders.next_at, 10_000 + DAY_MS);
        assert_eq!(snoozed.reminders.freq, ReminderFrequency::Weekly);
    }

    #[test]
    fn test_reschedule_if_needed() {
        let now = 50 * DAY_MS;
        // Off: untouched
        let off = reschedule_if_needed(&ProgressRecord::default(), now);
        assert_eq!(off.reminders.next_at, 0);

        // Stale schedule moves ahead
        let mut stale = set_frequency(&ProgressRecord::default(), ReminderFrequency::Daily, 0);
        stale.reminders.next_at = now - DAY_MS;
        let fresh = reschedule_if_needed(&stale, now);
        assert_eq!(fresh.reminders.next_at, now + DAY_MS);

        // Future schedule untouched
        let ahead = reschedule_if_needed(&fresh, now);
        assert_eq!(ahead.reminders.next_at, fresh.reminders.next_at);
    }
}
