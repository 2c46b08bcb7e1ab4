//! Per-request Drive credential extraction
//!
//! Credentials arrive as plain headers on every request and live only for the
//! handler invocation; nothing is stored server-side.

use axum::http::HeaderMap;

use crate::errors::AppError;

pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";

/// Raw token headers captured from one HTTP request, not yet validated.
#[derive(Debug, Clone, Default)]
pub struct CredentialHeaders {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Validated credentials handed to the Drive client.
#[derive(Debug, Clone)]
pub struct DriveCredentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl CredentialHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            access_token: header_value(headers, ACCESS_TOKEN_HEADER),
            refresh_token: header_value(headers, REFRESH_TOKEN_HEADER),
        }
    }

    /// Fails closed: empty or non-printable tokens are rejected here instead
    /// of being forwarded to the Drive API.
    pub fn authorize(&self) -> Result<DriveCredentials, AppError> {
        let Some(access_token) = self
            .access_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
        else {
            return Err(AppError::unauthorized(
                "missing_token",
                "x-access-token header required",
            ));
        };

        if !is_well_formed_token(access_token) {
            return Err(AppError::unauthorized(
                "invalid_token",
                "x-access-token header is malformed",
            ));
        }

        let refresh_token = self
            .refresh_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty());
        if let Some(token) = refresh_token {
            if !is_well_formed_token(token) {
                return Err(AppError::unauthorized(
                    "invalid_token",
                    "x-refresh-token header is malformed",
                ));
            }
        }

        Ok(DriveCredentials {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.map(str::to_string),
        })
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn is_well_formed_token(token: &str) -> bool {
    token.chars().all(|character| character.is_ascii_graphic())
}
