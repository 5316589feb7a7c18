//! Filter criteria for listing items.
//!
//! An item is visible when it passes all three checks held by [`FilterState`]:
//!
//! - **Package**: no package selected, or the item's package is selected.
//! - **Kind**: every known kind is active, or the item's kind is active.
//! - **Name**: no [`NamePattern`], or the pattern matches the display name.
//!
//! Name patterns come in two modes. In plain mode the text is anchored at the
//! start of the name (`^` + text) without escaping, so `Al` matches `Alpha`
//! and regex metacharacters keep their meaning. In regular-expression mode the
//! text is used as is.
//!
//! # Example
//!
//! ```
//! use listing_filter::filter::{FilterOption, FilterState, NamePattern};
//! use listing_filter::ListItem;
//!
//! let mut state = FilterState::new();
//! state.set_option(FilterOption::IgnoreCase, true);
//! state.set_name_pattern(NamePattern::compile("al", false, true).unwrap());
//!
//! assert!(state.matches(&ListItem::new("Alpha", "p1", "class")));
//! assert!(!state.matches(&ListItem::new("Beta", "p2", "class")));
//! ```

mod error;
mod pattern;
mod state;

pub use error::{FilterError, FilterResult};
pub use pattern::NamePattern;
pub use state::{parse_bool, FilterOption, FilterState};
