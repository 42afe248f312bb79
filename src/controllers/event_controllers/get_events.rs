use axum::{extract::State, Json};

use crate::controllers::event_controllers::models::EventResponse;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_events(State(state): State<AppState>) -> AppResult<Json<Vec<EventResponse>>> {
    let registry = state.events();
    let events = registry.list_events().await?;
    let names = registry.display_names(&events).await?;

    let event_responses: Vec<EventResponse> = events
        .into_iter()
        .map(|event| EventResponse::with_names(event, &names))
        .collect();

    Ok(Json(event_responses))
}
