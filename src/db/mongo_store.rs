use std::collections::HashMap;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    Collection, Database,
};

use super::store::{CasOutcome, DocumentStore, StoreError, StoreResult};
use crate::models::{event_models::Event, poll_models::Poll, user_models::User};

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// CAS filter. Documents written before versioning have no `version` field
/// and count as version 0.
fn version_filter(id: &str, expected_version: i64) -> Document {
    if expected_version == 0 {
        doc! { "_id": id, "version": { "$in": [0_i64, Bson::Null] } }
    } else {
        doc! { "_id": id, "version": expected_version }
    }
}

/// [`DocumentStore`] over the `events`, `polls` and `users` collections.
#[derive(Clone, Debug)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn events(&self) -> Collection<Event> {
        self.db.collection::<Event>("events")
    }

    fn polls(&self) -> Collection<Poll> {
        self.db.collection::<Poll>("polls")
    }

    fn users(&self) -> Collection<User> {
        self.db.collection::<User>("users")
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_event(&self, event: &Event) -> StoreResult<()> {
        self.events().insert_one(event).await?;
        Ok(())
    }

    async fn load_event(&self, event_id: &str) -> StoreResult<Option<Event>> {
        Ok(self.events().find_one(doc! { "_id": event_id }).await?)
    }

    async fn replace_event(&self, event: &Event, expected_version: i64) -> StoreResult<CasOutcome> {
        let next = Event {
            version: expected_version + 1,
            ..event.clone()
        };
        let result = self
            .events()
            .replace_one(version_filter(&event.id, expected_version), next)
            .await?;

        Ok(if result.matched_count == 1 {
            CasOutcome::Applied
        } else {
            CasOutcome::Conflict
        })
    }

    async fn list_events(&self) -> StoreResult<Vec<Event>> {
        let cursor = self
            .events()
            .find(doc! {})
            .sort(doc! { "created_at": 1, "_id": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_events_by_participant(&self, user_id: &str) -> StoreResult<Vec<Event>> {
        let cursor = self
            .events()
            .find(doc! { "participants": user_id })
            .sort(doc! { "created_at": 1, "_id": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_poll(&self, poll: &Poll) -> StoreResult<()> {
        self.polls().insert_one(poll).await?;
        Ok(())
    }

    async fn load_poll(&self, poll_id: &str) -> StoreResult<Option<Poll>> {
        Ok(self.polls().find_one(doc! { "_id": poll_id }).await?)
    }

    async fn replace_poll(&self, poll: &Poll, expected_version: i64) -> StoreResult<CasOutcome> {
        let next = Poll {
            version: expected_version + 1,
            ..poll.clone()
        };
        let result = self
            .polls()
            .replace_one(version_filter(&poll.id, expected_version), next)
            .await?;

        Ok(if result.matched_count == 1 {
            CasOutcome::Applied
        } else {
            CasOutcome::Conflict
        })
    }

    async fn find_polls_by_event(&self, event_id: &str) -> StoreResult<Vec<Poll>> {
        let cursor = self
            .polls()
            .find(doc! { "event": event_id })
            .sort(doc! { "created_at": 1, "_id": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn resolve_usernames(&self, user_ids: &[String]) -> StoreResult<HashMap<String, String>> {
        // Ids that are not ObjectIds cannot belong to the users collection.
        let object_ids: Vec<ObjectId> = user_ids
            .iter()
            .filter_map(|id| ObjectId::parse_str(id).ok())
            .collect();
        if object_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let cursor = self
            .users()
            .find(doc! { "_id": { "$in": object_ids } })
            .await?;
        let users: Vec<User> = cursor.try_collect().await?;

        Ok(users
            .into_iter()
            .map(|user| (user.id.to_hex(), user.name))
            .collect())
    }
}
