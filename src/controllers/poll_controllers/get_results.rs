use axum::{
    extract::{Path, State},
    Json,
};

use crate::controllers::poll_controllers::models::PollResultsResponse;
use crate::services::compute_tally;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_results(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<PollResultsResponse>> {
    let poll = state.polls().get_poll(&poll_id).await?;

    Ok(Json(PollResultsResponse {
        total_votes: poll.total_votes(),
        options: compute_tally(&poll),
        poll_id: poll.id,
        question: poll.question,
    }))
}
