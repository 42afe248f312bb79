use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{event_models::Event, poll_models::Poll};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store backend failure: {0}")]
    Backend(String),

    #[error("store call timed out")]
    Timeout,

    #[error("document {0} kept changing underneath the write")]
    Contention(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    Applied,
    Conflict,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_event(&self, event: &Event) -> StoreResult<()>;

    async fn load_event(&self, event_id: &str) -> StoreResult<Option<Event>>;

    /// Writes `event` with `version = expected_version + 1` iff the stored
    /// copy is still at `expected_version`.
    async fn replace_event(&self, event: &Event, expected_version: i64)
        -> StoreResult<CasOutcome>;

    async fn list_events(&self) -> StoreResult<Vec<Event>>;

    async fn find_events_by_participant(&self, user_id: &str) -> StoreResult<Vec<Event>>;

    async fn insert_poll(&self, poll: &Poll) -> StoreResult<()>;

    async fn load_poll(&self, poll_id: &str) -> StoreResult<Option<Poll>>;

    async fn replace_poll(&self, poll: &Poll, expected_version: i64) -> StoreResult<CasOutcome>;

    /// Polls owned by `event_id`, oldest first.
    async fn find_polls_by_event(&self, event_id: &str) -> StoreResult<Vec<Poll>>;

    /// Display names for the given user ids. Unknown ids are simply absent.
    async fn resolve_usernames(&self, user_ids: &[String]) -> StoreResult<HashMap<String, String>>;
}
