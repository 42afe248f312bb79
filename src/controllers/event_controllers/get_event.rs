use axum::{
    extract::{Path, State},
    Json,
};

use crate::controllers::event_controllers::models::EventResponse;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_event(
    Path(event_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<EventResponse>> {
    let registry = state.events();
    let event = registry.get_event(&event_id).await?;
    let names = registry.display_names(std::slice::from_ref(&event)).await?;

    Ok(Json(EventResponse::with_names(event, &names)))
}
