//! HTTP transport layer for the Model Context Protocol
//!
//! Provides the external routing: the `/google-drive` MCP listener and the
//! liveness endpoint.

pub mod handlers;
