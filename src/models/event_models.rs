use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub category: String,
    #[serde(default)]
    pub image: String,
    pub created_by: String,
    pub participants: Vec<String>,
    pub polls: Vec<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// Bumped on every successful replace; used as the CAS token.
    #[serde(default)]
    pub version: i64,
}

impl Event {
    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }

    pub fn has_poll(&self, poll_id: &str) -> bool {
        self.polls.iter().any(|p| p == poll_id)
    }
}
