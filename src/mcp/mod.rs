//! Model Context Protocol engine
//!
//! JSON-RPC envelope handling and method routing for the Drive adapter.

pub mod rpc;
pub mod server;
