use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {message}")]
    BadRequest {
        code: &'static str,
        message: &'static str,
    },
    #[error("unauthorized: {message}")]
    Unauthorized {
        code: &'static str,
        message: &'static str,
    },
    #[error("internal error")]
    Internal { code: &'static str, message: String },
}

impl AppError {
    pub fn bad_request(code: &'static str, message: &'static str) -> Self {
        Self::BadRequest { code, message }
    }

    pub fn unauthorized(code: &'static str, message: &'static str) -> Self {
        Self::Unauthorized { code, message }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            code: "internal_error",
            message: message.into(),
        }
    }

    /// Maps a non-success Drive API status to the local error taxonomy.
    pub fn upstream(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::unauthorized(
                "drive_unauthorized",
                "drive api rejected the provided credentials",
            ),
            404 => Self::bad_request("file_not_found", "no drive file exists for the requested id"),
            _ => Self::internal(format!("drive api returned status {status}: {body}")),
        }
    }
}
