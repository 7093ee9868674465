//! HTTP server implementation using axum

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::pdf::{extract_text_fields, FormExtraction};
use crate::store::{FileRegistry, StoredFile};
use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Body of the extraction response when the PDF has no AcroForm
pub const NO_FORM_MESSAGE: &str = "No form found in the PDF";

/// Multipart field carrying the uploaded file
const UPLOAD_FIELD: &str = "file";

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ListFilesResult {
    /// Stored PDFs, sorted by name
    pub files: Vec<StoredFile>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct NoFormResponse {
    pub error: String,
}

// ============================================================================
// Server
// ============================================================================

/// PDF form server state shared by all handlers
#[derive(Clone)]
pub struct PdfServer {
    registry: Arc<FileRegistry>,
    /// Server configuration
    config: Arc<ServerConfig>,
}

impl PdfServer {
    /// Create a new PdfServer, creating the upload directory if missing
    pub fn with_config(config: ServerConfig) -> Result<Self> {
        let registry = FileRegistry::open(&config.upload_dir)?;
        Ok(Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        })
    }

    pub fn registry(&self) -> &FileRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router with all endpoints and middleware
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(list_files).post(upload_file))
            .route("/{filename}", get(view_file).delete(delete_file))
            .route("/uploads/{filename}", get(download_file))
            .route("/extract/{filename}", get(extract_form))
            .layer(DefaultBodyLimit::max(self.config.max_upload_bytes))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.clone())
    }

    /// Run form extraction on a stored PDF.
    ///
    /// A missing file fails with `FileNotFound` before any parsing. The
    /// parse runs on the blocking pool and is abandoned (not cancelled)
    /// once `extract_timeout` elapses.
    pub async fn process_extract(&self, filename: &str) -> Result<FormExtraction> {
        let data = self.registry.read(filename)?;
        let size = data.len();
        let timeout = self.config.extract_timeout;

        let task = tokio::task::spawn_blocking(move || extract_text_fields(&data));
        let extraction = tokio::time::timeout(timeout, task)
            .await
            .map_err(|_| Error::ExtractionTimeout {
                name: filename.to_string(),
                seconds: timeout.as_secs(),
            })?
            .map_err(|e| Error::TaskJoin {
                reason: e.to_string(),
            })??;

        tracing::debug!(
            filename = %filename,
            size,
            has_form = extraction.has_form(),
            text_fields = extraction.fields().map(|f| f.len()).unwrap_or(0),
            "form extracted"
        );

        Ok(extraction)
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_files(State(server): State<PdfServer>) -> Result<Json<ListFilesResult>> {
    let files = server.registry.list()?;
    Ok(Json(ListFilesResult { files }))
}

async fn upload_file(
    State(server): State<PdfServer>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<MessageResponse>> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "upload body is not multipart");
        Error::NoFilePart
    })?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // A part without a filename parameter is a plain form value, not a file
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field.bytes().await?;
        upload = Some((filename, data));
        break;
    }

    let (filename, data) = upload.ok_or(Error::NoFilePart)?;
    server.registry.save(&filename, &data)?;

    tracing::info!(filename = %filename, size = data.len(), "file uploaded");

    Ok(Json(MessageResponse {
        message: format!("File {} uploaded successfully", filename),
    }))
}

async fn view_file(
    State(server): State<PdfServer>,
    Path(filename): Path<String>,
) -> Result<Html<String>> {
    if !server.registry.list_names()?.contains(&filename) {
        return Err(Error::FileNotFound { name: filename });
    }
    Ok(Html(render_view_page(&filename)))
}

async fn delete_file(
    State(server): State<PdfServer>,
    Path(filename): Path<String>,
) -> Result<StatusCode> {
    server.registry.delete(&filename)?;
    tracing::info!(filename = %filename, "file deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn download_file(
    State(server): State<PdfServer>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let data = server.registry.read(&filename)?;
    Ok(([(header::CONTENT_TYPE, "application/pdf")], data).into_response())
}

async fn extract_form(
    State(server): State<PdfServer>,
    Path(filename): Path<String>,
) -> Result<Response> {
    Ok(match server.process_extract(&filename).await? {
        FormExtraction::Fields(fields) => Json(fields).into_response(),
        FormExtraction::NoForm => Json(NoFormResponse {
            error: NO_FORM_MESSAGE.to_string(),
        })
        .into_response(),
    })
}

fn render_view_page(filename: &str) -> String {
    let title = html_escape::encode_text(filename);
    let attr = html_escape::encode_double_quoted_attribute(filename);
    let path = urlencoding::encode(filename);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<h1>{title}</h1>
<p><a href="/">All files</a> | <a href="/extract/{path}">Extract form data</a> | <a href="/uploads/{path}">Download</a></p>
<iframe src="/uploads/{path}" title="{attr}" width="100%" height="800"></iframe>
</body>
</html>
"#
    )
}

// ============================================================================
// Entry points
// ============================================================================

/// Run the server with default configuration
pub async fn run_server() -> anyhow::Result<()> {
    run_server_with_config(ServerConfig::default()).await
}

/// Run the server with full configuration until Ctrl-C
pub async fn run_server_with_config(config: ServerConfig) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr;
    let server = PdfServer::with_config(config)?;
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;

    tracing::info!(
        addr = %bind_addr,
        upload_dir = %server.registry().root().display(),
        "PDF form server listening"
    );

    axum::serve(listener, server.router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("PDF form server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
