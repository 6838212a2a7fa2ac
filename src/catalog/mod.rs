//! Tool catalog - records, replacement semantics, and the controller
//!
//! This module provides:
//! - `Tool` / `Catalog`: the fetched list, replaced wholesale on every load
//! - `CatalogController`: fetch-on-activate plus the per-frame grid model

pub mod controller;
pub mod tool;

pub use controller::{
    CatalogController, CatalogUpdate, FetchError, GridItem, GridModel, LIST_TOOLS_PATH, TOGGLE_LABEL, ToggleProps,
};
pub use tool::{Catalog, Tool, parse_tools};
