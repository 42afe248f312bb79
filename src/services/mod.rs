use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::db::{CasOutcome, DocumentStore, StoreError, StoreResult};
use crate::models::{event_models::Event, poll_models::Poll};
use crate::utils::error::{AppError, AppResult};

pub mod event_registry;
pub mod poll_engine;

pub use event_registry::{EventRegistry, NewEvent};
pub use poll_engine::{compute_tally, NewPoll, PollEngine, TallyEntry};

#[derive(Debug, Clone, Copy)]
pub struct WritePolicy {
    pub max_attempts: u32,
    pub store_timeout: Duration,
}

impl Default for WritePolicy {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            store_timeout: Duration::from_secs(5),
        }
    }
}

/// Whether a mutation closure actually changed the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mutation {
    Changed,
    Unchanged,
}

pub(crate) async fn bounded<T, F>(timeout: Duration, fut: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| StoreError::Timeout)?
}

// `mutate` runs against a freshly loaded copy on every attempt.
pub(crate) async fn update_event<F>(
    store: &Arc<dyn DocumentStore>,
    policy: WritePolicy,
    event_id: &str,
    mut mutate: F,
) -> AppResult<Event>
where
    F: FnMut(&mut Event) -> AppResult<Mutation>,
{
    for attempt in 1..=policy.max_attempts {
        let mut event = bounded(policy.store_timeout, store.load_event(event_id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;

        if mutate(&mut event)? == Mutation::Unchanged {
            return Ok(event);
        }

        let expected = event.version;
        match bounded(policy.store_timeout, store.replace_event(&event, expected)).await? {
            CasOutcome::Applied => {
                event.version = expected + 1;
                return Ok(event);
            }
            CasOutcome::Conflict => {
                debug!(event_id, attempt, "event changed concurrently, reloading")
            }
        }
    }

    Err(StoreError::Contention(event_id.to_string()).into())
}

pub(crate) async fn update_poll<F>(
    store: &Arc<dyn DocumentStore>,
    policy: WritePolicy,
    poll_id: &str,
    mut mutate: F,
) -> AppResult<Poll>
where
    F: FnMut(&mut Poll) -> AppResult<Mutation>,
{
    for attempt in 1..=policy.max_attempts {
        let mut poll = bounded(policy.store_timeout, store.load_poll(poll_id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Poll {} not found", poll_id)))?;

        if mutate(&mut poll)? == Mutation::Unchanged {
            return Ok(poll);
        }

        let expected = poll.version;
        match bounded(policy.store_timeout, store.replace_poll(&poll, expected)).await? {
            CasOutcome::Applied => {
                poll.version = expected + 1;
                return Ok(poll);
            }
            CasOutcome::Conflict => {
                debug!(poll_id, attempt, "poll changed concurrently, reloading")
            }
        }
    }

    Err(StoreError::Contention(poll_id.to_string()).into())
}
