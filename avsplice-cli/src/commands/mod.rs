//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `info` command.
pub mod info;

/// Module containing the implementation of the `merge` command, which also
/// runs when no subcommand is given.
pub mod merge;
