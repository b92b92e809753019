//! Search over the option model
//!
//! Provides the pure filter used by the dropdown's search box.

pub mod filter;

pub use filter::{FilterIndex, OptgroupFilterExt, filter, is_blank};
