//! Symptom journal
//!
//! Dated symptom entries with a 1-10 severity and optional vitals, plus the
//! CSV export used to bring logs into clinical appointments.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One journal entry. Timestamps are UTC midnight of the entry date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomEntry {
    pub id: String,
    pub date_ts: i64,
    pub name: String,
    pub severity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hr: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dia: Option<u32>,
    #[serde(default)]
    pub notes: String,
}

impl SymptomEntry {
    /// Build an entry for a calendar date. Severity clamps into 1..=10.
    pub fn new(
        date: NaiveDate,
        name: String,
        severity: u8,
        hr: Option<u32>,
        sys: Option<u32>,
        dia: Option<u32>,
        notes: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date_ts: start_of_day_ms(date),
            name,
            severity: severity.clamp(1, 10),
            hr,
            sys,
            dia,
            notes,
        }
    }

    /// Entry date as YYYY-MM-DD.
    pub fn date_string(&self) -> String {
        match DateTime::from_timestamp_millis(self.date_ts) {
            Some(dt) => dt.format("%Y-%m-%d").to_string(),
            None => String::new(),
        }
    }
}

/// UTC midnight of a date, in ms since epoch.
pub fn start_of_day_ms(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

/// Entries inside the inclusive [from, to] date range, newest first. The
/// upper bound extends to the end of its day.
pub fn in_range<'a>(
    entries: &'a [SymptomEntry],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<&'a SymptomEntry> {
    let from_ms = from.map(start_of_day_ms).unwrap_or(i64::MIN);
    let to_ms = to
        .map(|d| start_of_day_ms(d) + 24 * 3600 * 1000 - 1)
        .unwrap_or(i64::MAX);

    let mut matching: Vec<&SymptomEntry> = entries
        .iter()
        .filter(|e| e.date_ts >= from_ms && e.date_ts <= to_ms)
        .collect();
    matching.sort_by_key(|e| std::cmp::Reverse(e.date_ts));
    matching
}

/// Render entries as CSV, every field double-quoted, newlines in notes
/// flattened to spaces.
pub fn to_csv(entries: &[SymptomEntry]) -> String {
    let header = [
        "Date",
        "Symptom",
        "Severity",
        "HeartRate",
        "Systolic",
        "Diastolic",
        "Notes",
    ];

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(csv_row(header.iter().map(|s| s.to_string())));

    for e in entries {
        lines.push(csv_row(
            [
                e.date_string(),
                e.name.clone(),
                e.severity.to_string(),
                e.hr.map(|v| v.to_string()).unwrap_or_default(),
                e.sys.map(|v| v.to_string()).unwrap_or_default(),
                e.dia.map(|v| v.to_string()).unwrap_or_default(),
                e.notes.replace('\n', " "),
            ]
            .into_iter(),
        ));
    }

    lines.join("\n")
}

fn csv_row(fields: impl Iterator<Item = String>) -> String {
    fields
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(day: &str, name: &str) -> SymptomEntry {
        SymptomEntry::new(date(day), name.to_string(), 5, None, None, None, String::new())
    }

    #[test]
    fn test_severity_clamps() {
        let low = SymptomEntry::new(date("2025-06-01"), "x".into(), 0, None, None, None, "".into());
        let high =
            SymptomEntry::new(date("2025-06-01"), "x".into(), 99, None, None, None, "".into());
        assert_eq!(low.severity, 1);
        assert_eq!(high.severity, 10);
    }

    #[test]
    fn test_range_is_inclusive_of_both_ends() {
        let entries = vec![
            entry("2025-06-01", "a"),
            entry("2025-06-02", "b"),
            entry("2025-06-03", "c"),
        ];

        let hits = in_range(&entries, Some(date("2025-06-01")), Some(date("2025-06-02")));
        let names: Vec<&str> = hits.iter().map(|e| e.name.as_str()).collect();
        // Newest first, both boundary days included
        assert_eq!(names, vec!["b", "a"]);

        let open_ended = in_range(&entries, Some(date("2025-06-02")), None);
        assert_eq!(open_ended.len(), 2);
    }

    #[test]
    fn test_csv_quoting_and_newline_flattening() {
        let mut e = SymptomEntry::new(
            date("2025-06-01"),
            "Chest \"pain\"".to_string(),
            7,
            Some(95),
            Some(130),
            Some(85),
            "line one\nline two".to_string(),
        );
        e.id = "fixed".to_string();

        let csv = to_csv(&[e]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\"Date\",\"Symptom\",\"Severity\",\"HeartRate\",\"Systolic\",\"Diastolic\",\"Notes\""
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"2025-06-01\",\"Chest \"\"pain\"\"\",\"7\",\"95\",\"130\",\"85\",\"line one line two\""
        );
    }

    #[test]
    fn test_csv_blank_vitals() {
        let e = entry("2025-06-01", "Fatigue");
        let csv = to_csv(&[e]);
        assert!(csv.lines().nth(1).unwrap().contains("\"\",\"\",\"\""));
    }
}
