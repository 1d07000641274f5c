//! Local JSON state
//!
//! One file per state key under the data directory, mirroring the browser
//! build's localStorage keys. Reads fall back to a default on any failure;
//! writes are atomic (temp file + rename) under an exclusive lock so a crash
//! never leaves a half-written record.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The persisted state files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKey {
    Progress,
    Posts,
    Topics,
    Symptoms,
}

impl StateKey {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Progress => "progress.json",
            Self::Posts => "posts.json",
            Self::Topics => "topics.json",
            Self::Symptoms => "symptoms.json",
        }
    }

    pub fn all() -> &'static [StateKey] {
        &[Self::Progress, Self::Posts, Self::Topics, Self::Symptoms]
    }
}

/// Handle to the on-disk state directory.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Default state directory (~/.advoca/).
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".advoca")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: StateKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Load a state value, falling back to the provided default when the file
    /// is missing or unreadable. A corrupt file is logged, never fatal.
    pub fn load_or<T: DeserializeOwned>(&self, key: StateKey, fallback: T) -> T {
        let path = self.path(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return fallback,
        };
        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Ignoring corrupt state file {}: {}", path.display(), e);
                fallback
            }
        }
    }

    /// Persist a state value with an atomic locked write.
    pub fn save<T: Serialize>(&self, key: StateKey, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create state directory: {}", self.dir.display())
        })?;

        let path = self.path(key);
        let content = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {}", key.file_name()))?;

        // Lock file is separate from the state file to survive the rename
        let lock_path = path.with_extension("json.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

        lock_file
            .lock_exclusive()
            .with_context(|| "Failed to acquire state lock")?;

        let temp_path = path.with_extension("json.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        temp_file
            .write_all(content.as_bytes())
            .with_context(|| "Failed to write state content")?;

        temp_file
            .sync_all()
            .with_context(|| "Failed to sync state file")?;

        std::fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to rename state file: {}", path.display()))?;

        Ok(())
    }

    /// Remove every state file. Missing files are fine.
    pub fn reset_all(&self) -> Result<()> {
        for key in StateKey::all() {
            let path = self.path(*key);
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to remove {}", path.display()));
                }
            }
        }
        Ok(())
    }
}
