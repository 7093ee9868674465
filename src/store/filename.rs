//! Stored-filename rules
//!
//! The same extension rule governs uploads and listings: the text after
//! the last `.`, ASCII-lowercased, must be an allowed extension.

use crate::error::{Error, Result};

/// Extensions accepted for storage
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

/// Check whether `name` carries an allowed extension
pub fn allowed_file(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed)),
        None => false,
    }
}

/// Check that `name` is a single plain path component
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Validate an upload filename
pub fn validate_upload_name(name: &str) -> Result<&str> {
    if name.is_empty() {
        return Err(Error::NoSelectedFile);
    }
    if !is_plain_name(name) {
        return Err(Error::InvalidFileName {
            name: name.to_string(),
        });
    }
    if !allowed_file(name) {
        return Err(Error::InvalidFileType {
            name: name.to_string(),
        });
    }
    Ok(name)
}
