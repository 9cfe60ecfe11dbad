//! Error handling for Tangle

pub mod context;
pub mod types;

pub use context::ErrorSink;
pub use types::{Result, TangleError};
