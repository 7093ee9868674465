//! Error types for the PDF form server

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Result type alias for the PDF form server
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the PDF form server
#[derive(Error, Debug)]
pub enum Error {
    /// Upload request carried no `file` part
    #[error("No file part in upload request")]
    NoFilePart,

    /// Upload `file` part had an empty filename
    #[error("Upload file part has an empty filename")]
    NoSelectedFile,

    /// Filename extension is not in the allowed set
    #[error("Invalid file type: {name}")]
    InvalidFileType { name: String },

    /// Filename is not a single plain path component
    #[error("Invalid file name: {name:?}")]
    InvalidFileName { name: String },

    /// Stored file not found
    #[error("File not found: {name}")]
    FileNotFound { name: String },

    /// Invalid PDF file
    #[error("Invalid PDF file: {reason}")]
    InvalidPdf { reason: String },

    /// qpdf error
    #[error("qpdf error: {reason}")]
    QpdfError { reason: String },

    /// Form extraction exceeded its time budget
    #[error("Form extraction timed out after {seconds}s: {name}")]
    ExtractionTimeout { name: String, seconds: u64 },

    /// Multipart decoding error (malformed body, size limit exceeded)
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    /// Blocking task failed to complete
    #[error("Task join error: {reason}")]
    TaskJoin { reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Return a sanitized error message safe to send to clients.
    /// Internal details (paths, library errors) are omitted.
    /// Full details are logged via tracing in `into_response`.
    pub fn client_message(&self) -> String {
        match self {
            Error::NoFilePart => "No file part".to_string(),
            Error::NoSelectedFile => "No selected file".to_string(),
            Error::InvalidFileType { .. } => "Invalid file type".to_string(),
            Error::InvalidFileName { .. } => "Invalid file name".to_string(),
            Error::FileNotFound { .. } => "File not found".to_string(),
            Error::InvalidPdf { .. } => "Invalid PDF file".to_string(),
            Error::QpdfError { .. } => "PDF processing error".to_string(),
            Error::ExtractionTimeout { seconds, .. } => {
                format!("Form extraction timed out after {} seconds", seconds)
            }
            Error::Multipart(_) => "Failed to read upload".to_string(),
            Error::TaskJoin { .. } => "Internal server error".to_string(),
            Error::Io(_) => "I/O error".to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NoFilePart
            | Error::NoSelectedFile
            | Error::InvalidFileType { .. }
            | Error::InvalidFileName { .. } => StatusCode::BAD_REQUEST,
            Error::FileNotFound { .. } => StatusCode::NOT_FOUND,
            Error::InvalidPdf { .. } | Error::QpdfError { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Error::ExtractionTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Error::Multipart(e) => e.status(),
            Error::TaskJoin { .. } | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Io(_) | Error::TaskJoin { .. } => {
                tracing::error!(error = %self, "request failed");
            }
            Error::InvalidPdf { .. } | Error::QpdfError { .. } | Error::ExtractionTimeout { .. } => {
                tracing::warn!(error = %self, "form extraction failed");
            }
            _ => {
                tracing::debug!(error = %self, "client error");
            }
        }

        let body = serde_json::json!({ "message": self.client_message() });
        (self.status_code(), Json(body)).into_response()
    }
}
