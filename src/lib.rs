// dirwatcher - lib.rs
//
// Library entry point, exposing the watch loop and its building blocks for
// integration testing. The binary in `main.rs` only parses the command line,
// initialises logging and drives `app::poll_loop::PollLoop`.

pub mod app;
pub mod core;
pub mod util;
