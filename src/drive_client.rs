//! Google Drive v3 REST client
//!
//! Thin wrapper over the documented `files` endpoints: list, metadata get,
//! export, and media download. Every call authenticates with the bearer token
//! supplied on the originating MCP request; when a refresh token and OAuth
//! client configuration are available, a 401 triggers exactly one token
//! refresh and retry.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{auth::DriveCredentials, errors::AppError};

pub const FILE_LIST_PAGE_SIZE: u32 = 10;
pub const LIST_FIELDS: &str = "nextPageToken, files(id, name, mimeType)";
pub const SEARCH_FIELDS: &str = "files(id, name, mimeType)";

const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
const OAUTH_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct DriveFile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
}

/// One page of a Drive listing, continuation token included verbatim.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FileMetadata {
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Clone)]
pub struct OauthClientConfig {
    pub client_id: String,
    pub client_secret: String,
}

#[async_trait]
pub trait DriveProvider: Send + Sync {
    async fn list_files(
        &self,
        credentials: &DriveCredentials,
        page_token: Option<&str>,
    ) -> Result<FileList, AppError>;

    async fn search_files(
        &self,
        credentials: &DriveCredentials,
        query: &str,
    ) -> Result<Vec<DriveFile>, AppError>;

    async fn file_mime_type(
        &self,
        credentials: &DriveCredentials,
        file_id: &str,
    ) -> Result<Option<String>, AppError>;

    async fn export_file(
        &self,
        credentials: &DriveCredentials,
        file_id: &str,
        export_mime: &str,
    ) -> Result<String, AppError>;

    async fn download_file(
        &self,
        credentials: &DriveCredentials,
        file_id: &str,
    ) -> Result<Vec<u8>, AppError>;
}

pub struct HttpDriveClient {
    http: reqwest::Client,
    oauth: Option<OauthClientConfig>,
    api_base: String,
    token_url: String,
}

impl HttpDriveClient {
    pub fn new(oauth: Option<OauthClientConfig>) -> Self {
        Self::with_endpoints(oauth, DRIVE_API_BASE, OAUTH_TOKEN_URL)
    }

    /// Builds a client against explicit API endpoints. Production code uses
    /// [`HttpDriveClient::new`]; this exists so tests can point the client at
    /// a local stub server.
    pub fn with_endpoints(
        oauth: Option<OauthClientConfig>,
        api_base: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            oauth,
            api_base: api_base.into(),
            token_url: token_url.into(),
        }
    }

    async fn get_authorized(
        &self,
        credentials: &DriveCredentials,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response, AppError> {
        let url = format!("{}{}", self.api_base, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(&credentials.access_token)
            .send()
            .await
            .map_err(|err| AppError::internal(format!("drive api request failed: {err}")))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            if let Some(refreshed) = self.refresh_access_token(credentials).await? {
                let retried = self
                    .http
                    .get(&url)
                    .query(query)
                    .bearer_auth(&refreshed)
                    .send()
                    .await
                    .map_err(|err| {
                        AppError::internal(format!("drive api request failed: {err}"))
                    })?;
                return ensure_success(retried).await;
            }
        }

        ensure_success(response).await
    }

    /// Exchanges the refresh token for a fresh access token. Returns `None`
    /// when the request carried no refresh token or no OAuth client is
    /// configured, so the caller falls through to the original 401.
    async fn refresh_access_token(
        &self,
        credentials: &DriveCredentials,
    ) -> Result<Option<String>, AppError> {
        let (Some(oauth), Some(refresh_token)) =
            (self.oauth.as_ref(), credentials.refresh_token.as_deref())
        else {
            return Ok(None);
        };

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", oauth.client_id.as_str()),
                ("client_secret", oauth.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|err| AppError::internal(format!("token refresh request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(AppError::unauthorized(
                "refresh_failed",
                "drive token refresh was rejected",
            ));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| AppError::internal(format!("token refresh response invalid: {err}")))?;
        Ok(Some(token.access_token))
    }
}

#[async_trait]
impl DriveProvider for HttpDriveClient {
    async fn list_files(
        &self,
        credentials: &DriveCredentials,
        page_token: Option<&str>,
    ) -> Result<FileList, AppError> {
        let page_size = FILE_LIST_PAGE_SIZE.to_string();
        let mut query: Vec<(&str, &str)> =
            vec![("pageSize", page_size.as_str()), ("fields", LIST_FIELDS)];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response = self.get_authorized(credentials, "/files", &query).await?;
        response
            .json::<FileList>()
            .await
            .map_err(|err| AppError::internal(format!("drive list response invalid: {err}")))
    }

    async fn search_files(
        &self,
        credentials: &DriveCredentials,
        query: &str,
    ) -> Result<Vec<DriveFile>, AppError> {
        let page_size = FILE_LIST_PAGE_SIZE.to_string();
        let params: Vec<(&str, &str)> = vec![
            ("q", query),
            ("pageSize", page_size.as_str()),
            ("fields", SEARCH_FIELDS),
        ];

        let response = self.get_authorized(credentials, "/files", &params).await?;
        let list: FileList = response
            .json()
            .await
            .map_err(|err| AppError::internal(format!("drive search response invalid: {err}")))?;
        Ok(list.files)
    }

    async fn file_mime_type(
        &self,
        credentials: &DriveCredentials,
        file_id: &str,
    ) -> Result<Option<String>, AppError> {
        let response = self
            .get_authorized(
                credentials,
                &format!("/files/{file_id}"),
                &[("fields", "mimeType")],
            )
            .await?;
        let metadata: FileMetadata = response.json().await.map_err(|err| {
            AppError::internal(format!("drive metadata response invalid: {err}"))
        })?;
        Ok(metadata.mime_type)
    }

    async fn export_file(
        &self,
        credentials: &DriveCredentials,
        file_id: &str,
        export_mime: &str,
    ) -> Result<String, AppError> {
        let response = self
            .get_authorized(
                credentials,
                &format!("/files/{file_id}/export"),
                &[("mimeType", export_mime)],
            )
            .await?;
        response
            .text()
            .await
            .map_err(|err| AppError::internal(format!("drive export response invalid: {err}")))
    }

    async fn download_file(
        &self,
        credentials: &DriveCredentials,
        file_id: &str,
    ) -> Result<Vec<u8>, AppError> {
        let response = self
            .get_authorized(credentials, &format!("/files/{file_id}"), &[("alt", "media")])
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| AppError::internal(format!("drive download failed: {err}")))?;
        Ok(bytes.to_vec())
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::upstream(status.as_u16(), &body))
}
