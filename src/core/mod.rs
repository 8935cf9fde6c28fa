//! Core model – records, the filter/sort/paginate pipeline, and the small
//! state machines behind the widgets.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod badge;
pub mod chart;
pub mod columns;
pub mod filter;
pub mod notify;
pub mod overlay;
pub mod paginate;
pub mod pipeline;
pub mod record;
pub mod reveal;
pub mod sort;
pub mod source;
pub mod validate;
