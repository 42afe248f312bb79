pub mod event_controllers;
pub mod poll_controllers;
