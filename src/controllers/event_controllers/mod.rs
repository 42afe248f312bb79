pub mod create_event;
pub mod get_event;
pub mod get_events;
pub mod get_joined_events;
pub mod join_event;
pub mod models;
pub mod reconcile_polls;
