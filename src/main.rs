use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "advoca")]
#[command(about = "Self-advocacy training companion - practice scenarios, log symptoms, share with peers")]
#[command(version)]
struct Cli {
    /// Path to the state directory (defaults to ~/.advoca)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Practice clinical-encounter scenarios and track progress
    Practice {
        #[command(subcommand)]
        command: cli::practice::PracticeCommand,
    },

    /// Read and write the community feed
    Feed {
        #[command(subcommand)]
        command: cli::feed::FeedCommand,
    },

    /// Log symptoms and export them for appointments
    Symptom {
        #[command(subcommand)]
        command: cli::symptom::SymptomCommand,
    },

    /// Manage practice reminders
    Reminder {
        #[command(subcommand)]
        command: cli::reminder::ReminderCommand,
    },

    /// Sign in to the configured remote backend
    Login {
        /// Account email
        email: String,
    },

    /// Create an account on the configured remote backend
    Signup {
        /// Account email
        email: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Home location shown on posts
        #[arg(long, default_value = "")]
        location: String,
    },

    /// Drop the stored remote session
    Logout,

    /// Seed sample data for a quick look around
    Demo,

    /// Delete all locally stored data
    ResetAll {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let ctx = cli::AppContext::init(cli.data_dir)?;

    match cli.command {
        Commands::Practice { command } => cli::practice::run(&ctx, command)?,
        Commands::Feed { command } => cli::feed::run(&ctx, command)?,
        Commands::Symptom { command } => cli::symptom::run(&ctx, command)?,
        Commands::Reminder { command } => cli::reminder::run(&ctx, command)?,
        Commands::Login { email } => cli::auth::login_command(&ctx, &email)?,
        Commands::Signup {
            email,
            name,
            location,
        } => cli::auth::signup_command(&ctx, &email, &name, &location)?,
        Commands::Logout => cli::auth::logout_command(&ctx)?,
        Commands::Demo => cli::demo::demo_command(&ctx)?,
        Commands::ResetAll { yes } => cli::reset_all_command(&ctx, yes)?,
    }

    Ok(())
}
