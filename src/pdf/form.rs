//! AcroForm text-field extraction

use super::qpdf::{as_dict, get_array, get_dict, get_name, get_text, value_text, QpdfWrapper};
use crate::error::Result;
use qpdf::{QPdfDictionary, QPdfObject, QPdfObjectLike};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{HashMap, HashSet};

/// Field hierarchies deeper than this are treated as malformed and not
/// descended into. Cycles are caught separately by tracking visited objects.
const MAX_FIELD_DEPTH: usize = 32;

// ============================================================================
// Form Field Types
// ============================================================================

/// Field type, from the (inheritable) `/FT` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `/Tx`
    Text,
    /// `/Btn`: checkboxes, radio buttons, push buttons
    Button,
    /// `/Ch`: combo and list boxes
    Choice,
    /// `/Sig`
    Signature,
    /// Missing or unrecognized `/FT`
    Unknown,
}

impl FieldKind {
    fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("/Tx") => FieldKind::Text,
            Some("/Btn") => FieldKind::Button,
            Some("/Ch") => FieldKind::Choice,
            Some("/Sig") => FieldKind::Signature,
            _ => FieldKind::Unknown,
        }
    }
}

/// A terminal form field as found in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Fully-qualified name (ancestor `/T` values joined with `.`)
    pub name: String,
    pub kind: FieldKind,
    /// Current value (`/V`), if set on the field or an ancestor
    pub value: Option<String>,
}

/// Text-field values keyed by field name, in enumeration order.
///
/// Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFields {
    entries: Vec<(String, String)>,
    /// Position of each name in `entries`
    index: HashMap<String, usize>,
}

impl TextFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. A repeated name overwrites the earlier value but
    /// keeps its original position.
    pub fn insert(&mut self, name: String, value: String) {
        match self.index.get(&name) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl FromIterator<FormField> for TextFields {
    fn from_iter<I: IntoIterator<Item = FormField>>(iter: I) -> Self {
        let mut fields = TextFields::new();
        for field in iter {
            if field.kind == FieldKind::Text {
                fields.insert(field.name, field.value.unwrap_or_default());
            }
        }
        fields
    }
}

impl Serialize for TextFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Outcome of running form extraction on a readable PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormExtraction {
    /// The catalog has no `/AcroForm` entry
    NoForm,
    /// Text-field values of the document's form
    Fields(TextFields),
}

impl FormExtraction {
    pub fn has_form(&self) -> bool {
        matches!(self, FormExtraction::Fields(_))
    }

    pub fn fields(&self) -> Option<&TextFields> {
        match self {
            FormExtraction::Fields(fields) => Some(fields),
            FormExtraction::NoForm => None,
        }
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Indirect object identity: (object number, generation)
type ObjectId = (u32, u32);

/// Attributes a field passes down to its kids
#[derive(Debug, Clone, Default)]
struct Inherited {
    name: Option<String>,
    field_type: Option<String>,
    value: Option<String>,
}

/// Extract text-field values from PDF bytes.
///
/// Returns `FormExtraction::NoForm` when the catalog has no `/AcroForm`.
/// Only fields of type `/Tx` are kept; unset values map to `""`.
pub fn extract_text_fields(data: &[u8]) -> Result<FormExtraction> {
    Ok(match collect_form_fields(data)? {
        Some(fields) => FormExtraction::Fields(fields.into_iter().collect()),
        None => FormExtraction::NoForm,
    })
}

/// Enumerate every terminal field of the document's AcroForm.
///
/// Returns `None` when the document has no AcroForm.
pub fn collect_form_fields(data: &[u8]) -> Result<Option<Vec<FormField>>> {
    let qpdf = QpdfWrapper::open(data)?;
    let catalog = QpdfWrapper::catalog(&qpdf)?;

    if !catalog.has("/AcroForm") {
        return Ok(None);
    }

    let mut fields = Vec::new();
    if let Some(roots) = get_dict(&catalog, "/AcroForm").and_then(|af| get_array(&af, "/Fields"))
    {
        let mut visited = HashSet::new();
        walk_fields(
            roots.iter().collect(),
            &Inherited::default(),
            0,
            &mut visited,
            &mut fields,
        );
    }

    Ok(Some(fields))
}

fn walk_fields(
    nodes: Vec<QPdfObject>,
    inherited: &Inherited,
    depth: usize,
    visited: &mut HashSet<ObjectId>,
    out: &mut Vec<FormField>,
) {
    if depth > MAX_FIELD_DEPTH {
        tracing::warn!(depth, "form field hierarchy too deep, skipping subtree");
        return;
    }

    for node in nodes {
        if node.is_indirect() && !visited.insert((node.get_id(), node.get_generation())) {
            tracing::warn!(
                object = node.get_id(),
                "form field referenced more than once, skipping"
            );
            continue;
        }
        let Some(field) = as_dict(node) else {
            continue;
        };

        let name = match (&inherited.name, get_text(&field, "/T")) {
            (Some(parent), Some(partial)) => Some(format!("{}.{}", parent, partial)),
            (None, Some(partial)) => Some(partial),
            (parent, None) => parent.clone(),
        };
        let current = Inherited {
            name,
            field_type: get_name(&field, "/FT").or_else(|| inherited.field_type.clone()),
            value: field
                .get("/V")
                .map(|v| value_text(&v))
                .or_else(|| inherited.value.clone()),
        };

        match named_kids(&field) {
            Some(kids) => walk_fields(kids, &current, depth + 1, visited, out),
            None => {
                if let Some(name) = current.name {
                    out.push(FormField {
                        name,
                        kind: FieldKind::from_name(current.field_type.as_deref()),
                        value: current.value,
                    });
                }
            }
        }
    }
}

/// Kids carrying `/T`, or `None` when there are none. Kids without `/T`
/// are the field's widget annotations, not fields.
fn named_kids(field: &QPdfDictionary) -> Option<Vec<QPdfObject>> {
    let named: Vec<QPdfObject> = get_array(field, "/Kids")?
        .iter()
        .filter(|kid| as_dict(kid.clone()).is_some_and(|k| k.has("/T")))
        .collect();
    (!named.is_empty()).then_some(named)
}
