//! Remote backend client
//!
//! Optional sync against a Supabase-style REST backend: password auth plus
//! row list/insert for posts and symptom entries. All calls are blocking and
//! best-effort; a failure here never touches local state.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RemoteConfig;
use crate::feed::Post;
use crate::symptoms::SymptomEntry;

/// A signed-in user's token, persisted under the data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_id: String,
    pub email: String,
}

const SESSION_FILE: &str = "session.json";

pub fn load_session(data_dir: &Path) -> Option<Session> {
    let content = std::fs::read_to_string(data_dir.join(SESSION_FILE)).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn save_session(data_dir: &Path, session: &Session) -> Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create state directory: {}", data_dir.display()))?;
    let content = serde_json::to_string_pretty(session)?;
    std::fs::write(data_dir.join(SESSION_FILE), content)
        .with_context(|| "Failed to write session file")
}

pub fn clear_session(data_dir: &Path) -> Result<()> {
    match std::fs::remove_file(data_dir.join(SESSION_FILE)) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| "Failed to remove session file"),
    }
}

/// Post row as the backend stores it; timestamps are ISO-8601 strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PostRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    text: String,
    topic: String,
    location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
}

impl PostRow {
    fn into_post(self) -> Post {
        let ts = self
            .ts
            .as_deref()
            .and_then(parse_ts_ms)
            .or_else(|| self.created_at.as_deref().and_then(parse_ts_ms))
            .unwrap_or_else(|| Utc::now().timestamp_millis());
        Post {
            id: self.id.unwrap_or_default(),
            text: self.text,
            topic: self.topic,
            location: self.location,
            ts,
            author: None,
            user_id: self.user_id,
        }
    }
}

fn parse_ts_ms(s: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.timestamp_millis())
        .ok()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SymptomRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    date_ts: i64,
    name: String,
    severity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hr: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sys: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dia: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
}

impl SymptomRow {
    fn into_entry(self) -> SymptomEntry {
        SymptomEntry {
            id: self.id.unwrap_or_default(),
            date_ts: self.date_ts,
            name: self.name,
            severity: self.severity,
            hr: self.hr,
            sys: self.sys,
            dia: self.dia,
            notes: self.notes.unwrap_or_default(),
        }
    }
}

/// Blocking client for the configured backend.
pub struct RemoteClient {
    base_url: String,
    anon_key: String,
    session: Option<Session>,
}

impl RemoteClient {
    /// Build a client when the config carries a backend; `None` otherwise.
    pub fn from_config(config: &RemoteConfig, session: Option<Session>) -> Option<Self> {
        if !config.is_enabled() {
            return None;
        }
        Some(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            session,
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn bearer(&self) -> String {
        let token = self
            .session
            .as_ref()
            .map(|s| s.access_token.as_str())
            .unwrap_or(self.anon_key.as_str());
        format!("Bearer {token}")
    }

    fn get(&self, path: &str) -> ureq::Request {
        ureq::get(&format!("{}{}", self.base_url, path))
            .set("apikey", &self.anon_key)
            .set("Authorization", &self.bearer())
    }

    fn post(&self, path: &str) -> ureq::Request {
        ureq::post(&format!("{}{}", self.base_url, path))
            .set("apikey", &self.anon_key)
            .set("Authorization", &self.bearer())
    }

    /// Exchange credentials for a session token.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        #[derive(Serialize)]
        struct Credentials<'a> {
            email: &'a str,
            password: &'a str,
        }

        #[derive(Deserialize)]
        struct TokenUser {
            id: String,
            #[serde(default)]
            email: Option<String>,
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            user: TokenUser,
        }

        let response: TokenResponse = self
            .post("/auth/v1/token?grant_type=password")
            .send_json(Credentials { email, password })
            .context("Sign-in request failed")?
            .into_json()
            .context("Failed to parse sign-in response")?;

        Ok(Session {
            access_token: response.access_token,
            user_id: response.user.id,
            email: response.user.email.unwrap_or_else(|| email.to_string()),
        })
    }

    /// Create an account; the backend sends a confirmation email.
    pub fn sign_up(&self, name: &str, email: &str, password: &str, location: &str) -> Result<()> {
        #[derive(Serialize)]
        struct Metadata<'a> {
            name: &'a str,
            location: &'a str,
        }

        #[derive(Serialize)]
        struct SignUp<'a> {
            email: &'a str,
            password: &'a str,
            data: Metadata<'a>,
        }

        self.post("/auth/v1/signup")
            .send_json(SignUp {
                email,
                password,
                data: Metadata { name, location },
            })
            .context("Sign-up request failed")?;

        Ok(())
    }

    /// All posts, newest first.
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        let rows: Vec<PostRow> = self
            .get("/rest/v1/posts?select=*&order=ts.desc")
            .call()
            .context("Failed to load posts")?
            .into_json()
            .context("Failed to parse posts response")?;
        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    /// Insert a post and return the stored row.
    pub fn insert_post(&self, text: &str, topic: &str, location: &str) -> Result<Post> {
        let row = PostRow {
            id: None,
            text: text.to_string(),
            topic: topic.to_string(),
            location: location.to_string(),
            ts: Some(Utc::now().to_rfc3339()),
            created_at: None,
            user_id: self.session.as_ref().map(|s| s.user_id.clone()),
        };

        let stored: PostRow = self
            .post("/rest/v1/posts?select=*")
            .set("Prefer", "return=representation")
            .set("Accept", "application/vnd.pgrst.object+json")
            .send_json(&row)
            .context("Failed to post")?
            .into_json()
            .context("Failed to parse insert response")?;

        Ok(stored.into_post())
    }

    /// The signed-in user's symptom entries, newest first. Empty when no one
    /// is signed in.
    pub fn list_symptoms(&self) -> Result<Vec<SymptomEntry>> {
        let Some(session) = &self.session else {
            return Ok(Vec::new());
        };

        let path = format!(
            "/rest/v1/symptoms?select=*&user_id=eq.{}&order=date_ts.desc",
            session.user_id
        );
        let rows: Vec<SymptomRow> = self
            .get(&path)
            .call()
            .context("Failed to load symptoms")?
            .into_json()
            .context("Failed to parse symptoms response")?;
        Ok(rows.into_iter().map(SymptomRow::into_entry).collect())
    }

    /// Insert a symptom entry and return the stored row.
    pub fn insert_symptom(&self, entry: &SymptomEntry) -> Result<SymptomEntry> {
        let row = SymptomRow {
            id: None,
            date_ts: entry.date_ts,
            name: entry.name.clone(),
            severity: entry.severity,
            hr: entry.hr,
            sys: entry.sys,
            dia: entry.dia,
            notes: Some(entry.notes.clone()),
            user_id: self.session.as_ref().map(|s| s.user_id.clone()),
        };

        let stored: SymptomRow = self
            .post("/rest/v1/symptoms?select=*")
            .set("Prefer", "return=representation")
            .set("Accept", "application/vnd.pgrst.object+json")
            .send_json(&row)
            .context("Failed to save entry")?
            .into_json()
            .context("Failed to parse insert response")?;

        Ok(stored.into_entry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_row_timestamp_fallbacks() {
        let row = PostRow {
            id: Some("p1".to_string()),
            text: "t".to_string(),
            topic: "Cardio".to_string(),
            location: "Beirut".to_string(),
            ts: Some("2025-06-01T12:00:00+00:00".to_string()),
            created_at: None,
            user_id: None,
        };
        let post = row.into_post();
        assert_eq!(post.ts, 1_748_779_200_000);

        let row = PostRow {
            id: None,
            text: "t".to_string(),
            topic: "Cardio".to_string(),
            location: "Beirut".to_string(),
            ts: None,
            created_at: Some("2025-06-01T12:00:00+00:00".to_string()),
            user_id: None,
        };
        assert_eq!(row.into_post().ts, 1_748_779_200_000);
    }

    #[test]
    fn test_symptom_row_round_trip() {
        let entry = SymptomEntry {
            id: "x".to_string(),
            date_ts: 1_748_736_000_000,
            name: "Fatigue".to_string(),
            severity: 8,
            hr: Some(72),
            sys: None,
            dia: None,
            notes: "tired".to_string(),
        };
        let row = SymptomRow {
            id: Some(entry.id.clone()),
            date_ts: entry.date_ts,
            name: entry.name.clone(),
            severity: entry.severity,
            hr: entry.hr,
            sys: entry.sys,
            dia: entry.dia,
            notes: Some(entry.notes.clone()),
            user_id: None,
        };
        assert_eq!(row.into_entry(), entry);
    }

    #[test]
    fn test_session_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_session(dir.path()).is_none());

        let session = Session {
            access_token: "tok".to_string(),
            user_id: "u1".to_string(),
            email: "a@b.c".to_string(),
        };
        save_session(dir.path(), &session).unwrap();
        let loaded = load_session(dir.path()).unwrap();
        assert_eq!(loaded.user_id, "u1");

        clear_session(dir.path()).unwrap();
        assert!(load_session(dir.path()).is_none());
        clear_session(dir.path()).unwrap();
    }
}
