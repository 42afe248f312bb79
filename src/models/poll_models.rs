use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Poll {
    #[serde(rename = "_id")]
    pub id: String,
    pub event: String,
    pub question: String,
    pub options: Vec<PollOption>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub version: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PollOption {
    pub text: String,
    pub votes: Vec<String>,
}

impl Poll {
    pub fn total_votes(&self) -> usize {
        self.options.iter().map(|o| o.votes.len()).sum()
    }

    /// Index of the option `user_id` has already voted for, if any.
    pub fn voted_option(&self, user_id: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o.votes.iter().any(|v| v == user_id))
    }
}

impl PollOption {
    pub fn new(text: String) -> Self {
        Self {
            text,
            votes: Vec::new(),
        }
    }
}
