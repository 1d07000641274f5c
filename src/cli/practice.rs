//! Practice simulator commands

use std::io::Write;

use anyhow::{Context, Result};
use clap::Subcommand;

use advoca::game::{
    self, next_scenario, xp_into_level, xp_to_next_level, ProgressEvent, BADGES,
};

use super::{check_due_reminder, print_events, AppContext};

#[derive(Subcommand)]
pub enum PracticeCommand {
    /// Play a scenario you have not completed yet
    Play {
        /// Answer with this choice (1-3) instead of being prompted
        #[arg(long)]
        choice: Option<usize>,
    },

    /// Show score, level, streak and reminder status
    Status,

    /// Show earned and locked badges
    Badges,

    /// Start over (keeps reminder settings)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(ctx: &AppContext, command: PracticeCommand) -> Result<()> {
    match command {
        PracticeCommand::Play { choice } => play_command(ctx, choice),
        PracticeCommand::Status => status_command(ctx),
        PracticeCommand::Badges => badges_command(ctx),
        PracticeCommand::Reset { yes } => reset_command(ctx, yes),
    }
}

fn play_command(ctx: &AppContext, preset_choice: Option<usize>) -> Result<()> {
    let record = ctx.load_progress();
    let (_, record) = check_due_reminder(ctx, record)?;

    let mut rng = rand::thread_rng();
    let Some(scenario) = next_scenario(&record.played, &mut rng) else {
        println!("Congratulations! You've completed all scenarios. Reset to practice again!");
        return Ok(());
    };

    println!("\n{}\n", scenario.prompt);
    for (i, choice) in scenario.choices.iter().enumerate() {
        println!("  {}. {}", i + 1, choice.text);
    }

    let picked = match preset_choice {
        Some(n) => n,
        None => prompt_choice(scenario.choices.len())?,
    };
    anyhow::ensure!(
        (1..=scenario.choices.len()).contains(&picked),
        "choice must be between 1 and {}",
        scenario.choices.len()
    );

    let now = ctx.now_ms();
    let outcome = game::apply_choice(&record, scenario.id, picked - 1, now)?;

    let streak_note = outcome
        .events
        .iter()
        .find_map(|e| match e {
            ProgressEvent::StreakExtended { .. } => Some(format!(" {}", e.detail())),
            _ => None,
        })
        .unwrap_or_default();
    println!("\n{}{}", outcome.feedback, streak_note);
    print_events(&outcome.events);

    // Persist, then keep the reminder schedule ahead of the play
    let record = game::reschedule_if_needed(&outcome.record, now);
    ctx.save_progress(&record)?;

    Ok(())
}

fn prompt_choice(count: usize) -> Result<usize> {
    print!("\nChoose 1-{count}: ");
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read choice")?;
    line.trim()
        .parse::<usize>()
        .context("Enter a choice number")
}

fn status_command(ctx: &AppContext) -> Result<()> {
    let record = ctx.load_progress();
    let (_, record) = check_due_reminder(ctx, record)?;

    println!("Score:   {}", record.score);
    println!(
        "Level:   {} ({} XP, {} to next level)",
        record.level,
        xp_into_level(record.xp),
        xp_to_next_level(record.xp)
    );
    println!("Streak:  {} day(s)", record.streak);
    println!(
        "Played:  {}/{} scenarios",
        record.played.len(),
        game::Scenario::total_count()
    );
    println!(
        "Badges:  {}/{}",
        record.badges.len(),
        BADGES.len()
    );

    let r = record.reminders;
    match game::period_ms(r.freq) {
        None => println!("Reminders off"),
        Some(_) if r.next_at == 0 => println!("Reminders {}: not scheduled", r.freq.as_str()),
        Some(_) => {
            let when = chrono::DateTime::from_timestamp_millis(r.next_at)
                .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!("Reminders {}: next at {}", r.freq.as_str(), when);
        }
    }

    Ok(())
}

fn badges_command(ctx: &AppContext) -> Result<()> {
    let record = ctx.load_progress();

    for badge in BADGES {
        let mark = if record.badges.contains(&badge.id) {
            badge.icon
        } else {
            "🔒"
        };
        println!("{} {} - {}", mark, badge.name, badge.description);
    }

    Ok(())
}

fn reset_command(ctx: &AppContext, yes: bool) -> Result<()> {
    if !yes {
        println!("This resets score, XP, streak, played scenarios and badges.");
        println!("Reminder settings are kept. Re-run with --yes to confirm.");
        return Ok(());
    }

    let record = ctx.load_progress();
    let fresh = game::reset(&record);
    ctx.save_progress(&fresh)?;
    println!("Progress reset.");
    Ok(())
}
