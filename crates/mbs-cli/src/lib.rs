//! CLI library components for the MBS converter.

pub mod logging;
pub mod pipeline;
pub mod types;
