//! Output abstraction layer that routes to colored, plain, JSON or quiet
//! output based on mode.

pub mod context;

pub use context::{OutputContext, OutputMode};
