// avsplice-cli/src/lib.rs
//
// Library portion of the avsplice CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, InfoArgs, MergeArgs};
pub use commands::info::run_info;
pub use commands::merge::run_merge;
pub use error::CliResult;
