//! Drive files exposed as MCP resources
//!
//! Every remote file is addressed by a synthesized `gdrive:///<file-id>` URI;
//! the id is opaque and passed to the Drive API verbatim.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rust_mcp_sdk::schema::{
    BlobResourceContents, ListResourcesResult, PaginatedRequestParams, ReadResourceContent,
    ReadResourceRequestParams, ReadResourceResult, Resource, TextResourceContents,
};
use serde_json::Value;

use crate::auth::CredentialHeaders;
use crate::domain::utils::{
    export_mime_for, is_google_apps_mime, is_text_mime, DEFAULT_MIME_TYPE,
};
use crate::drive_client::DriveFile;
use crate::errors::AppError;
use crate::mcp::rpc::{app_error_to_json_rpc, json_rpc_error, json_rpc_result};
use crate::AppState;

pub const RESOURCE_URI_PREFIX: &str = "gdrive:///";

pub fn resource_uri(file_id: &str) -> String {
    format!("{RESOURCE_URI_PREFIX}{file_id}")
}

pub fn file_id_from_uri(uri: &str) -> &str {
    uri.strip_prefix(RESOURCE_URI_PREFIX).unwrap_or(uri)
}

pub async fn handle_resources_list(
    state: &AppState,
    credentials: &CredentialHeaders,
    id: Option<Value>,
    params: Option<Value>,
) -> Value {
    let cursor = match parse_list_cursor(params) {
        Ok(value) => value,
        Err(err) => return app_error_to_json_rpc(id, err),
    };

    let credentials = match credentials.authorize() {
        Ok(value) => value,
        Err(err) => return app_error_to_json_rpc(id, err),
    };

    match state.drive.list_files(&credentials, cursor.as_deref()).await {
        Ok(page) => {
            let resources = page.files.iter().map(file_to_resource).collect();
            let result = serde_json::to_value(ListResourcesResult {
                meta: None,
                next_cursor: page.next_page_token,
                resources,
            })
            .expect("resources list result serialization");

            json_rpc_result(id, result)
        }
        Err(err) => app_error_to_json_rpc(id, err),
    }
}

pub async fn handle_resources_read(
    state: &AppState,
    credentials: &CredentialHeaders,
    id: Option<Value>,
    params: Option<Value>,
) -> Value {
    let Some(raw_params) = params else {
        return json_rpc_error(id, -32602, "Invalid params");
    };

    let resource_read: ReadResourceRequestParams = match serde_json::from_value(raw_params) {
        Ok(value) => value,
        Err(_) => return json_rpc_error(id, -32602, "Invalid params"),
    };

    let credentials = match credentials.authorize() {
        Ok(value) => value,
        Err(err) => return app_error_to_json_rpc(id, err),
    };

    let file_id = file_id_from_uri(&resource_read.uri);
    let mime_type = match state.drive.file_mime_type(&credentials, file_id).await {
        Ok(value) => value.unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
        Err(err) => return app_error_to_json_rpc(id, err),
    };

    // Google Docs family is never downloaded directly; it is exported to the
    // fixed interchange format for its subtype.
    if is_google_apps_mime(&mime_type) {
        let export_mime = export_mime_for(&mime_type);
        return match state
            .drive
            .export_file(&credentials, file_id, export_mime)
            .await
        {
            Ok(text) => read_result(id, text_contents(&resource_read.uri, export_mime, text)),
            Err(err) => app_error_to_json_rpc(id, err),
        };
    }

    match state.drive.download_file(&credentials, file_id).await {
        Ok(bytes) if is_text_mime(&mime_type) => read_result(
            id,
            text_contents(
                &resource_read.uri,
                &mime_type,
                String::from_utf8_lossy(&bytes).into_owned(),
            ),
        ),
        Ok(bytes) => read_result(id, blob_contents(&resource_read.uri, &mime_type, &bytes)),
        Err(err) => app_error_to_json_rpc(id, err),
    }
}

fn parse_list_cursor(params: Option<Value>) -> Result<Option<String>, AppError> {
    let Some(raw_params) = params else {
        return Ok(None);
    };

    let parsed: PaginatedRequestParams = serde_json::from_value(raw_params)
        .map_err(|_| AppError::bad_request("invalid_cursor", "cursor must be a string"))?;
    Ok(parsed.cursor)
}

fn file_to_resource(file: &DriveFile) -> Resource {
    Resource {
        annotations: None,
        description: None,
        icons: vec![],
        meta: None,
        mime_type: file.mime_type.clone(),
        name: file.name.clone(),
        size: None,
        title: None,
        uri: resource_uri(&file.id),
    }
}

fn text_contents(uri: &str, mime_type: &str, text: String) -> ReadResourceContent {
    ReadResourceContent::from(TextResourceContents {
        meta: None,
        mime_type: Some(mime_type.to_string()),
        text,
        uri: uri.to_string(),
    })
}

fn blob_contents(uri: &str, mime_type: &str, bytes: &[u8]) -> ReadResourceContent {
    ReadResourceContent::from(BlobResourceContents {
        blob: STANDARD.encode(bytes),
        meta: None,
        mime_type: Some(mime_type.to_string()),
        uri: uri.to_string(),
    })
}

fn read_result(id: Option<Value>, contents: ReadResourceContent) -> Value {
    let result = serde_json::to_value(ReadResourceResult {
        contents: vec![contents],
        meta: None,
    })
    .expect("read resource result serialization");

    json_rpc_result(id, result)
}
