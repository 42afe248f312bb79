use axum::{
    extract::{Extension, State},
    Json,
};

use crate::controllers::event_controllers::models::EventResponse;
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::session::Claims;

pub async fn get_joined_events(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<EventResponse>>> {
    let registry = state.events();
    let events = registry.list_joined_events(&claims.sub).await?;
    let names = registry.display_names(&events).await?;

    Ok(Json(
        events
            .into_iter()
            .map(|event| EventResponse::with_names(event, &names))
            .collect(),
    ))
}
