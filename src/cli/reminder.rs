//! Reminder commands and calendar export

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::Subcommand;
use uuid::Uuid;

use advoca::game::{self, NotifPermission, ReminderFrequency};

use super::AppContext;

#[derive(Subcommand)]
pub enum ReminderCommand {
    /// Set how often to be reminded to practice
    Set {
        /// none, daily or weekly
        freq: String,
    },

    /// Show the current reminder schedule
    Status,

    /// Check whether a reminder is due right now
    Check,

    /// Push the next reminder out by one day
    Snooze,

    /// Record the desktop-notification permission
    Notifs {
        /// default, granted or denied
        state: String,
    },

    /// Export the reminder as a recurring calendar event
    Ics {
        /// Output file
        #[arg(long, default_value = "advoca-training.ics")]
        output: PathBuf,
    },
}

pub fn run(ctx: &AppContext, command: ReminderCommand) -> Result<()> {
    match command {
        ReminderCommand::Set { freq } => set_command(ctx, &freq),
        ReminderCommand::Status => status_command(ctx),
        ReminderCommand::Check => check_command(ctx),
        ReminderCommand::Snooze => snooze_command(ctx),
        ReminderCommand::Notifs { state } => notifs_command(ctx, &state),
        ReminderCommand::Ics { output } => ics_command(ctx, output),
    }
}

fn set_command(ctx: &AppContext, freq: &str) -> Result<()> {
    let freq = ReminderFrequency::from_str(freq)
        .with_context(|| format!("Unknown frequency '{freq}' (use none, daily or weekly)"))?;

    let record = ctx.load_progress();
    let record = game::set_frequency(&record, freq, ctx.now_ms());
    ctx.save_progress(&record)?;

    match freq {
        ReminderFrequency::None => println!("Reminders off"),
        _ => println!(
            "Next reminder scheduled: {}",
            format_ms(record.reminders.next_at)
        ),
    }
    Ok(())
}

fn status_command(ctx: &AppContext) -> Result<()> {
    let record = ctx.load_progress();
    let r = record.reminders;

    if r.freq == ReminderFrequency::None {
        println!("Reminders off");
    } else if r.next_at == 0 {
        println!("Reminders {}: not scheduled", r.freq.as_str());
    } else {
        println!(
            "Reminders {}: next at {}",
            r.freq.as_str(),
            format_ms(r.next_at)
        );
    }
    Ok(())
}

fn check_command(ctx: &AppContext) -> Result<()> {
    let record = ctx.load_progress();
    let (due, _) = super::check_due_reminder(ctx, record)?;
    if !due {
        println!("No reminder due.");
    }
    Ok(())
}

fn snooze_command(ctx: &AppContext) -> Result<()> {
    let record = ctx.load_progress();
    let record = game::snooze(&record, ctx.now_ms());
    ctx.save_progress(&record)?;
    println!(
        "Snoozed. Next reminder: {}",
        format_ms(record.reminders.next_at)
    );
    Ok(())
}

fn notifs_command(ctx: &AppContext, state: &str) -> Result<()> {
    let notifs = match state {
        "default" => NotifPermission::Default,
        "granted" => NotifPermission::Granted,
        "denied" => NotifPermission::Denied,
        other => anyhow::bail!("Unknown permission '{other}' (use default, granted or denied)"),
    };

    let mut record = ctx.load_progress();
    record.reminders.notifs = notifs;
    ctx.save_progress(&record)?;
    println!("Notification permission: {state}");
    Ok(())
}

fn ics_command(ctx: &AppContext, output: PathBuf) -> Result<()> {
    let record = ctx.load_progress();
    let freq = record.reminders.freq;
    anyhow::ensure!(
        freq != ReminderFrequency::None,
        "Select a frequency first (advoca reminder set daily|weekly)"
    );

    let start = Utc::now() + Duration::minutes(5);
    let uid = format!("{}@advoca.local", Uuid::new_v4());
    let ics = render_ics(freq, start, &uid);

    std::fs::write(&output, ics)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Calendar event written to {}", output.display());
    Ok(())
}

/// One recurring VEVENT, CRLF line endings per RFC 5545.
fn render_ics(freq: ReminderFrequency, start: DateTime<Utc>, uid: &str) -> String {
    let dt = start.format("%Y%m%dT%H%M%SZ").to_string();
    let rule = match freq {
        ReminderFrequency::Weekly => "FREQ=WEEKLY;BYDAY=MO",
        _ => "FREQ=DAILY",
    };
    [
        "BEGIN:VCALENDAR",
        "VERSION:2.0",
        "PRODID:-//Advoca//EN",
        "CALSCALE:GREGORIAN",
        "BEGIN:VEVENT",
        &format!("UID:{uid}"),
        &format!("DTSTAMP:{dt}"),
        &format!("DTSTART:{dt}"),
        "SUMMARY:Advoca training reminder",
        "DESCRIPTION:Practice a scenario and build your self-advocacy skills.",
        &format!("RRULE:{rule}"),
        "END:VEVENT",
        "END:VCALENDAR",
    ]
    .join("\r\n")
}

fn format_ms(ts_ms: i64) -> String {
    DateTime::from_timestamp_millis(ts_ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
