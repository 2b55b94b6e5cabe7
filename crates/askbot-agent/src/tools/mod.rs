//! Tools the reasoning loop can dispatch to.

pub mod base;
pub mod weather;
pub mod web;

pub use base::{Tool, ToolName, Toolbox};
pub use weather::WeatherTool;
pub use web::WebSearchTool;
