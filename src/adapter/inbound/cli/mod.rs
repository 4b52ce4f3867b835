//! CLI module graph.

pub mod check;
pub mod command;
pub mod config;
pub mod console;
pub mod diagnostic;
pub mod output;
pub mod paths;
pub mod prompt;
pub mod router;
pub mod run;
