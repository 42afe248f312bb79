pub mod cast_vote;
pub mod create_poll;
pub mod get_event_polls;
pub mod get_poll;
pub mod get_results;
pub mod models;
