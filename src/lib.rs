// habitui - terminal client for a habit-tracking REST backend
//
// Library surface shared by the binary and the integration tests.

pub mod api;
pub mod cli;
pub mod config;
pub mod dates;
pub mod logging;
pub mod messages;
pub mod models;
pub mod tui;
