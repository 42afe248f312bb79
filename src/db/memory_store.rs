use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use super::store::{CasOutcome, DocumentStore, StoreError, StoreResult};
use crate::models::{event_models::Event, poll_models::Poll};

#[derive(Debug, Default)]
pub struct MemoryStore {
    events: RwLock<Vec<Event>>,
    polls: RwLock<Vec<Poll>>,
    users: RwLock<HashMap<String, String>>,
}

fn poison_err<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a display name, standing in for the identity service's user table.
    pub fn register_user(&self, user_id: &str, name: &str) -> StoreResult<()> {
        self.users
            .write()
            .map_err(poison_err)?
            .insert(user_id.to_string(), name.to_string());
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_event(&self, event: &Event) -> StoreResult<()> {
        let mut events = self.events.write().map_err(poison_err)?;
        if events.iter().any(|e| e.id == event.id) {
            return Err(StoreError::Backend(format!("duplicate event id {}", event.id)));
        }
        events.push(event.clone());
        Ok(())
    }

    async fn load_event(&self, event_id: &str) -> StoreResult<Option<Event>> {
        let events = self.events.read().map_err(poison_err)?;
        Ok(events.iter().find(|e| e.id == event_id).cloned())
    }

    async fn replace_event(&self, event: &Event, expected_version: i64) -> StoreResult<CasOutcome> {
        let mut events = self.events.write().map_err(poison_err)?;
        match events.iter_mut().find(|e| e.id == event.id) {
            Some(stored) if stored.version == expected_version => {
                *stored = Event {
                    version: expected_version + 1,
                    ..event.clone()
                };
                Ok(CasOutcome::Applied)
            }
            _ => Ok(CasOutcome::Conflict),
        }
    }

    async fn list_events(&self) -> StoreResult<Vec<Event>> {
        Ok(self.events.read().map_err(poison_err)?.clone())
    }

    async fn find_events_by_participant(&self, user_id: &str) -> StoreResult<Vec<Event>> {
        let events = self.events.read().map_err(poison_err)?;
        Ok(events
            .iter()
            .filter(|e| e.has_participant(user_id))
            .cloned()
            .collect())
    }

    async fn insert_poll(&self, poll: &Poll) -> StoreResult<()> {
        let mut polls = self.polls.write().map_err(poison_err)?;
        if polls.iter().any(|p| p.id == poll.id) {
            return Err(StoreError::Backend(format!("duplicate poll id {}", poll.id)));
        }
        polls.push(poll.clone());
        Ok(())
    }

    async fn load_poll(&self, poll_id: &str) -> StoreResult<Option<Poll>> {
        let polls = self.polls.read().map_err(poison_err)?;
        Ok(polls.iter().find(|p| p.id == poll_id).cloned())
    }

    async fn replace_poll(&self, poll: &Poll, expected_version: i64) -> StoreResult<CasOutcome> {
        let mut polls = self.polls.write().map_err(poison_err)?;
        match polls.iter_mut().find(|p| p.id == poll.id) {
            Some(stored) if stored.version == expected_version => {
                *stored = Poll {
                    version: expected_version + 1,
                    ..poll.clone()
                };
                Ok(CasOutcome::Applied)
            }
            _ => Ok(CasOutcome::Conflict),
        }
    }

    async fn find_polls_by_event(&self, event_id: &str) -> StoreResult<Vec<Poll>> {
        let polls = self.polls.read().map_err(poison_err)?;
        Ok(polls
            .iter()
            .filter(|p| p.event == event_id)
            .cloned()
            .collect())
    }

    async fn resolve_usernames(&self, user_ids: &[String]) -> StoreResult<HashMap<String, String>> {
        let users = self.users.read().map_err(poison_err)?;
        Ok(user_ids
            .iter()
            .filter_map(|id| users.get(id).map(|name| (id.clone(), name.clone())))
            .collect())
    }
}
