use crate::models::event_models::Event;
use crate::utils::error::{AppError, AppResult};

pub fn is_creator(event: &Event, user_id: &str) -> bool {
    event.created_by == user_id
}

/// Creator or participant.
pub fn can_manage_polls(event: &Event, user_id: &str) -> bool {
    is_creator(event, user_id) || event.has_participant(user_id)
}

pub fn ensure_can_manage_polls(event: &Event, user_id: &str) -> AppResult<()> {
    if can_manage_polls(event, user_id) {
        Ok(())
    } else {
        Err(AppError::Unauthorized(format!(
            "Join event {} before creating or voting on its polls",
            event.id
        )))
    }
}

pub fn ensure_creator(event: &Event, user_id: &str) -> AppResult<()> {
    if is_creator(event, user_id) {
        Ok(())
    } else {
        Err(AppError::Unauthorized(format!(
            "Only the creator of event {} may do this",
            event.id
        )))
    }
}
