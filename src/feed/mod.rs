//! Community feed
//!
//! Short peer-support posts with a topic and a location. Topics start from a
//! default set and grow as users post under new ones.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Topics offered out of the box.
pub const DEFAULT_TOPICS: &[&str] = &[
    "Advocacy",
    "Diagnosis",
    "Cardio",
    "Pain",
    "Mental Health",
    "Medication",
    "Reproductive Health",
    "Research",
    "Insurance",
    "Support",
];

/// One community post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    pub topic: String,
    pub location: String,
    /// Ms since epoch.
    pub ts: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Post {
    pub fn new(text: String, topic: String, location: String, author: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            topic,
            location,
            ts: Utc::now().timestamp_millis(),
            author,
            user_id: None,
        }
    }
}

/// Topic and location restrictions for listing; an empty set means
/// unrestricted.
#[derive(Debug, Clone, Default)]
pub struct FeedFilter {
    pub topics: Vec<String>,
    pub locations: Vec<String>,
}

impl FeedFilter {
    pub fn matches(&self, post: &Post) -> bool {
        (self.topics.is_empty() || self.topics.iter().any(|t| t == &post.topic))
            && (self.locations.is_empty() || self.locations.iter().any(|l| l == &post.location))
    }
}

/// Posts matching the filter, newest first.
pub fn filtered<'a>(posts: &'a [Post], filter: &FeedFilter) -> Vec<&'a Post> {
    let mut matching: Vec<&Post> = posts.iter().filter(|p| filter.matches(p)).collect();
    matching.sort_by_key(|p| std::cmp::Reverse(p.ts));
    matching
}

/// Register a topic if it is not known yet. Returns true when added.
pub fn ensure_topic(topics: &mut Vec<String>, topic: &str) -> bool {
    if topics.iter().any(|t| t == topic) {
        return false;
    }
    topics.push(topic.to_string());
    true
}

/// The starting topic list.
pub fn default_topics() -> Vec<String> {
    DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect()
}
