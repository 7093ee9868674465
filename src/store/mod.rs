//! Upload storage

pub mod filename;
pub mod registry;

pub use filename::{allowed_file, is_plain_name, ALLOWED_EXTENSIONS};
pub use registry::{FileRegistry, StoredFile};
