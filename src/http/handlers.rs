//! Axum HTTP handlers for the web server
//!
//! The MCP endpoint receives the raw request body; JSON-RPC parsing happens
//! here rather than in an axum extractor so malformed payloads can be
//! answered with proper protocol errors.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::auth::CredentialHeaders;
use crate::mcp::rpc::json_rpc_error;
use crate::mcp::server::handle_json_rpc_value;
use crate::AppState;

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn mcp_endpoint(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let credentials = CredentialHeaders::from_headers(&headers);

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::OK,
                Json(json_rpc_error(None, -32700, "Parse error")),
            )
                .into_response()
        }
    };

    if let Some(batch) = payload.as_array() {
        // An empty batch is itself one invalid request, answered with a
        // single error object rather than an array.
        if batch.is_empty() {
            return (
                StatusCode::OK,
                Json(json_rpc_error(None, -32600, "Invalid Request")),
            )
                .into_response();
        }

        let mut responses = Vec::new();
        for item in batch {
            if let Some(response) =
                handle_json_rpc_value(&state, &credentials, item.clone()).await
            {
                responses.push(response);
            }
        }

        if responses.is_empty() {
            return StatusCode::NO_CONTENT.into_response();
        }

        return (StatusCode::OK, Json(Value::Array(responses))).into_response();
    }

    match handle_json_rpc_value(&state, &credentials, payload).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
