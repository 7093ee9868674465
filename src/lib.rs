//! PDF Form Server Library
//!
//! This crate provides an HTTP service over a directory of uploaded PDFs:
//! - `GET /`, `POST /`: list and upload PDFs
//! - `GET /{filename}`, `DELETE /{filename}`: view page and removal
//! - `GET /uploads/{filename}`: raw file bytes
//! - `GET /extract/{filename}`: AcroForm text-field values

pub mod config;
pub mod error;
pub mod pdf;
pub mod server;
pub mod store;

pub use config::{Args, ServerConfig};
pub use error::{Error, Result};
pub use server::{
    run_server, run_server_with_config, ListFilesResult, MessageResponse, NoFormResponse,
    PdfServer, NO_FORM_MESSAGE,
};
pub use store::{FileRegistry, StoredFile};
