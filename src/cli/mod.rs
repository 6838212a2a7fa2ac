//! CLI module for toolboard - command-line interface and subcommands.
//!
//! With no subcommand the dashboard TUI is launched; `list` and `layout`
//! answer one question and exit.

pub mod commands;

pub use commands::Cli;
