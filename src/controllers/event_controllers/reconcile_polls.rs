use axum::{
    extract::{Extension, Path, State},
    Json,
};

use crate::controllers::event_controllers::models::EventResponse;
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::session::Claims;

pub async fn reconcile_polls(
    Path(event_id): Path<String>,
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<EventResponse>> {
    let event = state
        .polls()
        .reconcile_event_polls(&event_id, &claims.sub)
        .await?;

    Ok(Json(EventResponse::from(event)))
}
