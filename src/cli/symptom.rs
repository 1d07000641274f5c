//! Symptom journal commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Subcommand;

use advoca::store::StateKey;
use advoca::symptoms::{self, SymptomEntry};

use super::AppContext;

#[derive(Subcommand)]
pub enum SymptomCommand {
    /// Log a symptom entry
    Add {
        /// Symptom name, e.g. "Chest pain"
        name: String,
        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Severity 1-10
        #[arg(long, default_value_t = 5)]
        severity: u8,
        /// Heart rate (bpm)
        #[arg(long)]
        hr: Option<u32>,
        /// Systolic blood pressure (mmHg)
        #[arg(long)]
        sys: Option<u32>,
        /// Diastolic blood pressure (mmHg)
        #[arg(long)]
        dia: Option<u32>,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List entries, newest first
    List {
        /// Start of the date range (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// End of the date range (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Export entries as CSV
    Export {
        /// Output file
        #[arg(long, default_value = "advoca-symptoms.csv")]
        output: PathBuf,
    },
}

pub fn run(ctx: &AppContext, command: SymptomCommand) -> Result<()> {
    match command {
        SymptomCommand::Add {
            name,
            date,
            severity,
            hr,
            sys,
            dia,
            notes,
        } => add_command(ctx, name, date, severity, hr, sys, dia, notes),
        SymptomCommand::List { from, to } => list_command(ctx, from, to),
        SymptomCommand::Export { output } => export_command(ctx, output),
    }
}

fn load_entries(ctx: &AppContext) -> Result<Vec<SymptomEntry>> {
    match ctx.remote() {
        Some(client) if client.session().is_some() => {
            client.list_symptoms().context("Failed to load symptoms")
        }
        _ => Ok(ctx.store.load_or(StateKey::Symptoms, Vec::new())),
    }
}

#[allow(clippy::too_many_arguments)]
fn add_command(
    ctx: &AppContext,
    name: String,
    date: Option<NaiveDate>,
    severity: u8,
    hr: Option<u32>,
    sys: Option<u32>,
    dia: Option<u32>,
    notes: String,
) -> Result<()> {
    let name = name.trim().to_string();
    anyhow::ensure!(!name.is_empty(), "Symptom name is required");

    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let entry = SymptomEntry::new(date, name, severity, hr, sys, dia, notes.trim().to_string());

    if let Some(client) = ctx.remote() {
        if client.session().is_some() {
            client
                .insert_symptom(&entry)
                .context("Remote save failed; nothing was saved")?;
            println!("Symptom logged");
            return Ok(());
        }
    }

    let mut entries: Vec<SymptomEntry> = ctx.store.load_or(StateKey::Symptoms, Vec::new());
    entries.push(entry);
    ctx.store.save(StateKey::Symptoms, &entries)?;
    println!("Symptom logged");
    Ok(())
}

fn list_command(ctx: &AppContext, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<()> {
    let entries = load_entries(ctx)?;
    let matching = symptoms::in_range(&entries, from, to);

    if matching.is_empty() {
        println!("No entries yet for this range.");
        return Ok(());
    }

    for e in matching {
        let mut vitals = Vec::new();
        if let Some(hr) = e.hr {
            vitals.push(format!("{hr} bpm"));
        }
        if let (Some(sys), Some(dia)) = (e.sys, e.dia) {
            vitals.push(format!("{sys}/{dia} mmHg"));
        }
        let vitals = if vitals.is_empty() {
            String::new()
        } else {
            format!(" • {}", vitals.join(" • "))
        };

        println!("{} • Severity {}{}", e.date_string(), e.severity, vitals);
        if e.notes.is_empty() {
            println!("  {}\n", e.name);
        } else {
            println!("  {}: {}\n", e.name, e.notes);
        }
    }

    Ok(())
}

fn export_command(ctx: &AppContext, output: PathBuf) -> Result<()> {
    let entries = load_entries(ctx)?;
    let csv = symptoms::to_csv(&entries);
    std::fs::write(&output, csv)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Exported {} entries to {}", entries.len(), output.display());
    Ok(())
}
