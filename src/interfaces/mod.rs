//! Edges that feed commands into the application layer and render results.

pub mod csv;
pub mod json;
