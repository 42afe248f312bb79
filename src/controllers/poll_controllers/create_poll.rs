use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::controllers::poll_controllers::models::{CreatePollRequest, PollResponse};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::session::Claims;

pub async fn create_poll(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    WithRejection(Json(payload), _): WithRejection<Json<CreatePollRequest>, AppError>,
) -> AppResult<(StatusCode, Json<PollResponse>)> {
    let poll = state.polls().create_poll(payload.into(), &claims.sub).await?;

    Ok((StatusCode::CREATED, Json(PollResponse::from(poll))))
}
