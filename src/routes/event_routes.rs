use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::controllers::event_controllers::{
    create_event, get_event, get_events, get_joined_events, join_event, reconcile_polls,
};
use crate::middleware::jwt::jwt_auth;
use crate::state::AppState;

pub fn event_routes(state: AppState) -> Router {
    let protected = Router::new()
        .route("/create", post(create_event::create_event))
        .route("/join", post(join_event::join_event))
        .route("/joined", get(get_joined_events::get_joined_events))
        .route("/:eventId/reconcile", post(reconcile_polls::reconcile_polls))
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth));

    Router::new()
        .route("/", get(get_events::get_events))
        .route("/:eventId", get(get_event::get_event))
        .merge(protected)
        .with_state(state)
}
