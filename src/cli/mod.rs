//! CLI command implementations

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use advoca::config::Config;
use advoca::game::{self, ProgressEvent, ProgressRecord};
use advoca::remote::{self, RemoteClient};
use advoca::store::{StateKey, StateStore};

pub mod auth;
pub mod demo;
pub mod feed;
pub mod practice;
pub mod reminder;
pub mod symptom;

/// Shared command context: loaded config plus the state store it points at.
pub struct AppContext {
    pub config: Config,
    pub store: StateStore,
}

impl AppContext {
    /// Load config and resolve the state directory. A `--data-dir` flag wins
    /// over the config file, which wins over ~/.advoca.
    pub fn init(data_dir_flag: Option<PathBuf>) -> Result<Self> {
        let config = Config::load()?;
        let dir = data_dir_flag.unwrap_or_else(|| config.data_dir());
        Ok(Self {
            config,
            store: StateStore::new(dir),
        })
    }

    /// Remote client when the config names a backend, with any stored
    /// session attached.
    pub fn remote(&self) -> Option<RemoteClient> {
        let session = remote::load_session(self.store.dir());
        RemoteClient::from_config(&self.config.remote, session)
    }

    pub fn load_progress(&self) -> ProgressRecord {
        self.store
            .load_or(StateKey::Progress, ProgressRecord::default())
            .normalize()
    }

    pub fn save_progress(&self, record: &ProgressRecord) -> Result<()> {
        self.store.save(StateKey::Progress, record)
    }

    pub fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Render level-up and badge events as transient terminal banners.
pub fn print_events(events: &[ProgressEvent]) {
    for event in events {
        match event {
            ProgressEvent::LevelUp { .. } | ProgressEvent::BadgeUnlocked { .. } => {
                println!("🎉 {} {}", event.title(), event.detail());
            }
            // Streak news rides along with the choice feedback instead
            ProgressEvent::StreakExtended { .. } => {}
        }
    }
}

/// Page-load style due check: print the banner and persist the advanced
/// schedule when a reminder fired. Returns the (possibly updated) record.
pub fn check_due_reminder(ctx: &AppContext, record: ProgressRecord) -> Result<(bool, ProgressRecord)> {
    let (due, updated) = game::check_due(&record, ctx.now_ms());
    if due {
        println!("⏰ Training reminder - ready to practice? (`advoca reminder snooze` to delay a day)");
        ctx.save_progress(&updated)?;
    }
    Ok((due, updated))
}

/// Delete every local state file after confirmation.
pub fn reset_all_command(ctx: &AppContext, yes: bool) -> Result<()> {
    if !yes {
        println!("This clears all local data (progress, posts, topics, symptoms).");
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }
    ctx.store.reset_all()?;
    println!("All local data cleared.");
    Ok(())
}
