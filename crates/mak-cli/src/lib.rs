//! CLI library components for the catalogue viewer.

pub mod config;
pub mod logging;
pub mod render;
pub mod session;
