use axum::{
    extract::{Path, State},
    Json,
};

use crate::controllers::poll_controllers::models::PollResponse;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_polls_by_event(
    Path(event_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PollResponse>>> {
    let polls = state.polls().list_polls_for_event(&event_id).await?;

    Ok(Json(polls.into_iter().map(PollResponse::from).collect()))
}
