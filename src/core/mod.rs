// dirwatcher - core/mod.rs
//
// Core logic layer: listing, reconciliation, scanning.
// Must NOT depend on: app.

pub mod listing;
pub mod model;
pub mod scanner;
pub mod watch_state;
