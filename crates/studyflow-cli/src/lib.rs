mod args;
mod commands;
pub mod config;
pub mod context;
mod handlers;
pub mod types;

pub use args::{AssignmentCommand, Cli, Commands, SessionCommand};
pub use commands::run;
