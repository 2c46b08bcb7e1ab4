//! Domain-specific shared helpers: mime classification, export-format
//! negotiation, and Drive query-literal escaping.

pub const GOOGLE_APPS_MIME_PREFIX: &str = "application/vnd.google-apps";
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";
pub const DEFAULT_EXPORT_MIME: &str = "text/plain";

/// Target interchange format for a Google-apps document family member.
/// Unrecognized subtypes (Forms, Sites, ...) fall back to plain text.
pub fn export_mime_for(mime_type: &str) -> &'static str {
    match mime_type {
        "application/vnd.google-apps.document" => "text/markdown",
        "application/vnd.google-apps.spreadsheet" => "text/csv",
        "application/vnd.google-apps.presentation" => "text/plain",
        "application/vnd.google-apps.drawing" => "image/png",
        _ => DEFAULT_EXPORT_MIME,
    }
}

pub fn is_google_apps_mime(mime_type: &str) -> bool {
    mime_type.starts_with(GOOGLE_APPS_MIME_PREFIX)
}

pub fn is_text_mime(mime_type: &str) -> bool {
    mime_type.starts_with("text/") || mime_type == "application/json"
}

/// Escapes a user string for interpolation into a single-quoted Drive query
/// literal. The Drive query grammar defines exactly two specials inside
/// string literals: backslash and single quote.
pub fn escape_query_literal(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for character in input.chars() {
        if character == '\\' || character == '\'' {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

pub fn build_full_text_query(user_query: &str) -> String {
    format!("fullText contains '{}'", escape_query_literal(user_query))
}
