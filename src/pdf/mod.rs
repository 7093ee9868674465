//! PDF processing layer
//!
//! This module reads AcroForm data from PDF bytes using qpdf.

mod form;
mod qpdf;

pub use form::{
    collect_form_fields, extract_text_fields, FieldKind, FormExtraction, FormField, TextFields,
};
pub use self::qpdf::QpdfWrapper;
