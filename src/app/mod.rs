// dirwatcher - app/mod.rs
//
// Application layer: the poll loop lifecycle and signal wiring.
// Dependencies: core and util layers.

pub mod poll_loop;
pub mod signal;
