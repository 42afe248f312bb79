use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::event_models::Event;
use crate::services::NewEvent;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(req: CreateEventRequest) -> Self {
        NewEvent {
            title: req.title,
            description: req.description,
            date: req.date,
            location: req.location,
            category: req.category,
            image: req.image,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JoinEventRequest {
    pub event_id: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct UserRef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub category: String,
    pub image: String,
    pub created_by: UserRef,
    pub participants: Vec<UserRef>,
    pub polls: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl EventResponse {
    pub fn with_names(event: Event, names: &HashMap<String, String>) -> Self {
        let user_ref = |id: String| UserRef {
            name: names.get(&id).cloned(),
            id,
        };

        EventResponse {
            id: event.id,
            title: event.title,
            description: event.description,
            date: event.date,
            location: event.location,
            category: event.category,
            image: event.image,
            created_by: user_ref(event.created_by),
            participants: event.participants.into_iter().map(user_ref).collect(),
            polls: event.polls,
            created_at: event.created_at,
        }
    }
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        EventResponse::with_names(event, &HashMap::new())
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct JoinEventResponse {
    pub message: String,
    pub event: EventResponse,
}
