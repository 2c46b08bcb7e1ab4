//! Interactive tools exposed via Model Context Protocol
//!
//! Provides the single `search` tool, a full-text query against the user's
//! Drive with a bounded result page.

use rust_mcp_sdk::{
    macros,
    schema::{CallToolRequestParams, CallToolResult, ContentBlock, TextContent, Tool},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::CredentialHeaders;
use crate::domain::utils::{build_full_text_query, DEFAULT_MIME_TYPE};
use crate::mcp::rpc::{
    app_error_to_json_rpc, json_rpc_error, json_rpc_error_with_data, json_rpc_result,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQueryParams {
    pub query: String,
}

#[macros::mcp_tool(name = "search", description = "Search for files in Google Drive")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct SearchTool {
    /// Search query
    pub query: String,
}

pub fn build_tools_list() -> Vec<Tool> {
    vec![SearchTool::tool()]
}

pub async fn handle_tools_call(
    state: &AppState,
    credentials: &CredentialHeaders,
    id: Option<Value>,
    params: Option<Value>,
) -> Value {
    let Some(raw_params) = params else {
        return json_rpc_error(id, -32602, "Invalid params");
    };

    let tool_call: CallToolRequestParams = match serde_json::from_value(raw_params) {
        Ok(value) => value,
        Err(_) => return json_rpc_error(id, -32602, "Invalid params"),
    };

    match tool_call.name.as_str() {
        "search" => {
            let arguments: SearchQueryParams =
                match serde_json::from_value(json!(tool_call.arguments.unwrap_or_default())) {
                    Ok(value) => value,
                    Err(_) => return json_rpc_error(id, -32602, "Invalid params"),
                };

            let credentials = match credentials.authorize() {
                Ok(value) => value,
                Err(err) => return app_error_to_json_rpc(id, err),
            };

            let query = build_full_text_query(&arguments.query);
            match state.drive.search_files(&credentials, &query).await {
                Ok(files) => {
                    let listing = files
                        .iter()
                        .map(|file| {
                            format!(
                                "{} ({})",
                                file.name,
                                file.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE)
                            )
                        })
                        .collect::<Vec<_>>()
                        .join("\n");

                    json_rpc_result(
                        id,
                        serde_json::to_value(CallToolResult {
                            content: vec![ContentBlock::from(TextContent::new(
                                format!("Found {} files:\n{listing}", files.len()),
                                None,
                                None,
                            ))],
                            is_error: Some(false),
                            meta: None,
                            structured_content: None,
                        })
                        .expect("search tool result serialization"),
                    )
                }
                Err(err) => app_error_to_json_rpc(id, err),
            }
        }
        _ => json_rpc_error_with_data(
            id,
            -32601,
            "Method not found",
            Some(json!({
                "code": "tool_not_found",
                "message": "unknown tool name",
                "details": {
                    "name": tool_call.name,
                },
            })),
        ),
    }
}
