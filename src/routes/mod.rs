pub mod event_routes;
pub mod poll_routes;
