use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::controllers::event_controllers::models::{CreateEventRequest, EventResponse};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::session::Claims;

pub async fn create_event(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateEventRequest>, AppError>,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    let event = state
        .events()
        .create_event(payload.into(), &claims.sub)
        .await?;

    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}
