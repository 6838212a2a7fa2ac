//! Toolboard - a terminal dashboard for the tools a gateway manager exposes
//!
//! Toolboard fetches the tool catalog from the gateway, keeps it as a list
//! that is only ever replaced wholesale, and lays it out as a grid of cards
//! whose width follows the terminal width.

pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod layout;
pub mod tui;

pub use error::{Result, ToolboardError};
