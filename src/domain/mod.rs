//! Drive-backed resource and tool integrations
//!
//! Provides the core behavior exposed over the MCP protocol: paged file
//! listings, content reads with export negotiation, and full-text search.

pub mod resources;
pub mod tools;
pub mod utils;
