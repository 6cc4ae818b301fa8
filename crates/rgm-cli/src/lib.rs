//! CLI library components for the research group manager.

pub mod logging;
pub mod roster;
