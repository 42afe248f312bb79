use axum::{
    extract::{Extension, State},
    Json,
};
use axum_extra::extract::WithRejection;

use crate::controllers::poll_controllers::models::{CastVoteRequest, PollResponse};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::session::Claims;

pub async fn cast_vote(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    WithRejection(Json(payload), _): WithRejection<Json<CastVoteRequest>, AppError>,
) -> AppResult<Json<PollResponse>> {
    let poll = state
        .polls()
        .cast_vote(&payload.poll_id, payload.option_index, &claims.sub)
        .await?;

    Ok(Json(PollResponse::from(poll)))
}
