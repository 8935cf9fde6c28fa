//! Application orchestration: state, the event loop, and input handling.

pub mod event;
pub mod handler;
pub mod settings;
pub mod showcase;
pub mod state;
