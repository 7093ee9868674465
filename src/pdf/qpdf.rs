//! qpdf FFI wrapper for structural PDF access
//!
//! Opens documents from memory via the qpdf crate (vendored FFI) and
//! exposes the small set of typed lookups the form walker needs.

use crate::error::{Error, Result};
use qpdf::{QPdf, QPdfArray, QPdfDictionary, QPdfObject, QPdfObjectLike, QPdfObjectType};

/// Wrapper for qpdf document access
pub struct QpdfWrapper;

/// Check the `%PDF` magic before handing bytes to qpdf, which would
/// otherwise try to reconstruct almost anything into a document.
pub fn check_pdf_header(data: &[u8]) -> Result<()> {
    if data.len() < 4 || &data[0..4] != b"%PDF" {
        return Err(Error::InvalidPdf {
            reason: "Not a valid PDF file".to_string(),
        });
    }
    Ok(())
}

/// Map qpdf crate errors to our error types
fn map_qpdf_error(e: qpdf::QPdfError) -> Error {
    match e.error_code() {
        qpdf::QPdfErrorCode::InvalidPassword => Error::InvalidPdf {
            reason: "PDF is password protected".to_string(),
        },
        _ => Error::QpdfError {
            reason: e.to_string(),
        },
    }
}

impl QpdfWrapper {
    /// Parse raw PDF bytes into a qpdf document
    ///
    /// # Arguments
    /// * `input_data` - Raw PDF bytes
    ///
    /// # Returns
    /// The parsed document, or `InvalidPdf`/`QpdfError` when the bytes
    /// are not a readable PDF
    pub fn open(input_data: &[u8]) -> Result<QPdf> {
        check_pdf_header(input_data)?;
        QPdf::read_from_memory(input_data).map_err(map_qpdf_error)
    }

    /// Get the document catalog (trailer `/Root`)
    pub fn catalog(qpdf: &QPdf) -> Result<QPdfDictionary> {
        qpdf.get_root().ok_or_else(|| Error::InvalidPdf {
            reason: "Trailer has no /Root catalog".to_string(),
        })
    }
}

/// Look up `key` and return it as a dictionary, if it is one
pub fn get_dict(dict: &QPdfDictionary, key: &str) -> Option<QPdfDictionary> {
    dict.get(key)
        .filter(|obj| matches!(obj.get_type(), QPdfObjectType::Dictionary))
        .map(QPdfDictionary::from)
}

/// Look up `key` and return it as an array, if it is one
pub fn get_array(dict: &QPdfDictionary, key: &str) -> Option<QPdfArray> {
    dict.get(key)
        .filter(|obj| matches!(obj.get_type(), QPdfObjectType::Array))
        .map(QPdfArray::from)
}

/// Look up `key` and return it as a name (with its leading slash)
pub fn get_name(dict: &QPdfDictionary, key: &str) -> Option<String> {
    dict.get(key)
        .filter(|obj| matches!(obj.get_type(), QPdfObjectType::Name))
        .map(|obj| obj.as_name())
}

/// Look up `key` and decode it as a PDF text string
pub fn get_text(dict: &QPdfDictionary, key: &str) -> Option<String> {
    dict.get(key)
        .filter(|obj| matches!(obj.get_type(), QPdfObjectType::String))
        .map(|obj| obj.as_string())
}

/// Render a field value object as text.
///
/// Strings are decoded to UTF-8; names are returned without their
/// leading slash. Anything else renders as the empty string.
pub fn value_text(obj: &QPdfObject) -> String {
    match obj.get_type() {
        QPdfObjectType::String => obj.as_string(),
        QPdfObjectType::Name => obj.as_name().trim_start_matches('/').to_string(),
        _ => String::new(),
    }
}

/// Convert an object to a dictionary, if it is one
pub fn as_dict(obj: QPdfObject) -> Option<QPdfDictionary> {
    if matches!(obj.get_type(), QPdfObjectType::Dictionary) {
        Some(QPdfDictionary::from(obj))
    } else {
        None
    }
}
