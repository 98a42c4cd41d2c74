//! CLI library components for the form state tool.

pub mod logging;
pub mod session;
