//! CLI command implementations.

pub mod apply;
pub mod common;
pub mod graph;
pub mod impulse;
pub mod presets;
pub mod settings;
