//! Application shell
//!
//! CLI surface, configuration, and the frame loop that wires the
//! detector, the gesture session, and the injector together.

pub mod cli;
pub mod config;
pub mod runner;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use runner::{run_session, RunOptions};
