//! Output formatting utilities for the lf CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by what is printed:
//!
//! - [`items`] - Visible items after filtering (list)
//! - [`catalog`] - Packages and kinds with item counts
//! - [`options`] - Persisted name filter options
//! - [`helpers`] - Common formatting utilities (truncation, widths, on/off)

mod catalog;
pub mod helpers;
mod items;
mod options;

pub use catalog::{format_counts_json, format_counts_table};
pub use items::{format_items_json, format_items_table};
pub use options::{format_options_json, format_options_table, format_toggled, OptionValue};
