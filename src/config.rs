//! Server configuration
//!
//! [`ServerConfig`] is passed explicitly to the registry and router at
//! construction. [`Args`] layers command-line flags and `PDF_FORMS_*`
//! environment variables over the defaults.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Storage and resource configuration for the PDF form server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory holding uploaded PDFs (default: `uploads`)
    pub upload_dir: PathBuf,
    /// Address to listen on (default: 127.0.0.1:5000)
    pub bind_addr: SocketAddr,
    /// Maximum request body size for uploads (default: 32MB)
    pub max_upload_bytes: usize,
    /// Time budget for a single form extraction (default: 30s)
    pub extract_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_upload_bytes: 32 * 1024 * 1024, // 32MB
            extract_timeout: Duration::from_secs(30),
        }
    }
}

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "pdf-form-server", version, about)]
pub struct Args {
    /// Directory holding uploaded PDFs
    #[arg(long, env = "PDF_FORMS_UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Address to listen on
    #[arg(long, env = "PDF_FORMS_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Maximum upload size in bytes
    #[arg(long, env = "PDF_FORMS_MAX_UPLOAD_BYTES", default_value_t = 32 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    /// Time budget for form extraction, in seconds
    #[arg(long, env = "PDF_FORMS_EXTRACT_TIMEOUT_SECS", default_value_t = 30)]
    pub extract_timeout_secs: u64,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            upload_dir: args.upload_dir,
            bind_addr: args.bind,
            max_upload_bytes: args.max_upload_bytes,
            extract_timeout: Duration::from_secs(args.extract_timeout_secs),
        }
    }
}
