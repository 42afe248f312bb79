use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::poll_models::{Poll, PollOption};
use crate::services::{NewPoll, TallyEntry};

#[derive(Deserialize, Debug)]
pub struct OptionInput {
    #[serde(default)]
    pub text: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollRequest {
    pub event_id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<OptionInput>,
}

impl From<CreatePollRequest> for NewPoll {
    fn from(req: CreatePollRequest) -> Self {
        NewPoll {
            event_id: req.event_id,
            question: req.question,
            options: req.options.into_iter().map(|opt| opt.text).collect(),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    pub poll_id: String,
    /// Signed so a negative index reaches the engine and fails as out of range.
    pub option_index: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
    pub id: String,
    pub event: String,
    pub question: String,
    pub options: Vec<PollOption>,
    pub total_votes: usize,
    pub created_at: DateTime<Utc>,
}

impl From<Poll> for PollResponse {
    fn from(poll: Poll) -> Self {
        PollResponse {
            total_votes: poll.total_votes(),
            id: poll.id,
            event: poll.event,
            question: poll.question,
            options: poll.options,
            created_at: poll.created_at,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PollResultsResponse {
    pub poll_id: String,
    pub question: String,
    pub total_votes: usize,
    pub options: Vec<TallyEntry>,
}
