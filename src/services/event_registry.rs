use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::{bounded, update_event, Mutation, WritePolicy};
use crate::db::DocumentStore;
use crate::models::{
    event_models::{Event, DEFAULT_CATEGORY},
    new_id,
};
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
}

/// Event creation, membership and listings.
#[derive(Clone)]
pub struct EventRegistry {
    store: Arc<dyn DocumentStore>,
    policy: WritePolicy,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl EventRegistry {
    pub fn new(store: Arc<dyn DocumentStore>, policy: WritePolicy) -> Self {
        Self { store, policy }
    }

    #[tracing::instrument(skip(self, input), fields(creator = %creator_id))]
    pub async fn create_event(&self, input: NewEvent, creator_id: &str) -> AppResult<Event> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Event title is required".to_string()));
        }

        let event = Event {
            id: new_id(),
            title: title.to_string(),
            description: non_blank(input.description),
            date: non_blank(input.date),
            location: non_blank(input.location),
            category: non_blank(input.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            image: non_blank(input.image).unwrap_or_default(),
            created_by: creator_id.to_string(),
            participants: vec![creator_id.to_string()],
            polls: Vec::new(),
            created_at: Utc::now(),
            version: 0,
        };

        bounded(self.policy.store_timeout, self.store.insert_event(&event)).await?;
        info!(event_id = %event.id, "event created");

        Ok(event)
    }

    pub async fn list_events(&self) -> AppResult<Vec<Event>> {
        Ok(bounded(self.policy.store_timeout, self.store.list_events()).await?)
    }

    pub async fn get_event(&self, event_id: &str) -> AppResult<Event> {
        bounded(self.policy.store_timeout, self.store.load_event(event_id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))
    }

    /// Adds `user_id` to the participants. Joining twice fails with
    /// [`AppError::AlreadyJoined`] carrying the unchanged event.
    #[tracing::instrument(skip(self))]
    pub async fn join_event(&self, event_id: &str, user_id: &str) -> AppResult<Event> {
        let event = update_event(&self.store, self.policy, event_id, |event| {
            if event.has_participant(user_id) {
                debug!("user already a participant");
                return Err(AppError::AlreadyJoined {
                    event: Box::new(event.clone()),
                });
            }
            event.participants.push(user_id.to_string());
            Ok(Mutation::Changed)
        })
        .await?;

        info!(participants = event.participants.len(), "user joined event");
        Ok(event)
    }

    pub async fn list_joined_events(&self, user_id: &str) -> AppResult<Vec<Event>> {
        Ok(bounded(
            self.policy.store_timeout,
            self.store.find_events_by_participant(user_id),
        )
        .await?)
    }

    /// Display names for every creator and participant in `events`.
    pub async fn display_names(&self, events: &[Event]) -> AppResult<HashMap<String, String>> {
        let mut ids: Vec<String> = events
            .iter()
            .flat_map(|e| std::iter::once(&e.created_by).chain(e.participants.iter()))
            .cloned()
            .collect();
        ids.sort();
        ids.dedup();

        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        Ok(bounded(self.policy.store_timeout, self.store.resolve_usernames(&ids)).await?)
    }
}
