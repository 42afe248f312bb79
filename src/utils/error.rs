use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::controllers::event_controllers::models::EventResponse;
use crate::controllers::poll_controllers::models::PollResponse;
use crate::db::StoreError;
use crate::models::{event_models::Event, poll_models::Poll};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Current state of the event when the requested effect already holds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll: Option<PollResponse>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("User already joined event {}", .event.id)]
    AlreadyJoined { event: Box<Event> },

    #[error("User already voted for option {option_index} of poll {}", .poll.id)]
    DuplicateVote { poll: Box<Poll>, option_index: usize },

    #[error("Option index {index} is out of range for a poll with {len} options")]
    InvalidIndex { index: i64, len: usize },

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True when the request changed nothing because its effect already holds.
    pub fn is_idempotent_outcome(&self) -> bool {
        matches!(self, AppError::AlreadyJoined { .. } | AppError::DuplicateVote { .. })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let details = match &self {
            AppError::DuplicateVote { option_index, .. } => {
                Some(format!("optionIndex {}", option_index))
            }
            _ => None,
        };

        let mut event = None;
        let mut poll = None;

        let (status, error_type, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::AlreadyJoined { event: current } => {
                event = Some(EventResponse::from(*current));
                (
                    StatusCode::CONFLICT,
                    "ALREADY_JOINED",
                    "User already joined this event".to_string(),
                )
            }
            AppError::DuplicateVote { poll: current, .. } => {
                poll = Some(PollResponse::from(*current));
                (
                    StatusCode::CONFLICT,
                    "DUPLICATE_VOTE",
                    "User already voted in this poll".to_string(),
                )
            }
            err @ AppError::InvalidIndex { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_INDEX", err.to_string())
            }
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, "AUTHENTICATION_ERROR", msg)
            }
            AppError::Unauthorized(msg) => (StatusCode::FORBIDDEN, "UNAUTHORIZED", msg),
            AppError::Store(err) => {
                warn!(error = %err, "store operation failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_ERROR",
                    "Storage is temporarily unavailable, retry later".to_string(),
                )
            }
            AppError::Config(msg) | AppError::Internal(msg) => {
                error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
            event,
            poll,
        };

        (status, Json(error_response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Authentication(format!("Invalid or expired token: {}", err))
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
