//! Result formatting for terminal output.

pub mod format;

pub use format::*;
