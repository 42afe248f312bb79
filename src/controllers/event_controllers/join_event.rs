use axum::{
    extract::{Extension, State},
    Json,
};
use axum_extra::extract::WithRejection;

use crate::controllers::event_controllers::models::{
    EventResponse, JoinEventRequest, JoinEventResponse,
};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::session::Claims;

pub async fn join_event(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    WithRejection(Json(payload), _): WithRejection<Json<JoinEventRequest>, AppError>,
) -> AppResult<Json<JoinEventResponse>> {
    let event = state
        .events()
        .join_event(&payload.event_id, &claims.sub)
        .await?;

    Ok(Json(JoinEventResponse {
        message: "Successfully joined event".to_string(),
        event: EventResponse::from(event),
    }))
}
