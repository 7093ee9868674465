//! In-memory PDF fixtures for tests and benches.
//!
//! Writes small classic-xref PDFs with correct byte offsets, so no binary
//! fixtures need to be checked in.

#![allow(dead_code)]

/// A form field to place on the fixture's single page
#[derive(Debug, Clone)]
pub enum TestField {
    /// `/FT /Tx` with an optional literal `/V`
    Text(&'static str, Option<&'static str>),
    /// `/FT /Tx` whose `/V` is a raw PDF object (e.g. a hex string)
    TextRaw(&'static str, &'static str),
    /// `/FT /Btn` checkbox, checked
    Checkbox(&'static str),
    /// `/FT /Ch` combo box with a selected value
    Choice(&'static str, &'static str),
}

/// Accumulates numbered object bodies and serializes them as a PDF
#[derive(Debug, Default)]
pub struct PdfBuilder {
    objects: Vec<String>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object body and return its object number
    pub fn add(&mut self, body: impl Into<String>) -> usize {
        self.objects.push(body.into());
        self.objects.len()
    }

    /// Replace the body of an already-added object
    pub fn set(&mut self, num: usize, body: impl Into<String>) {
        self.objects[num - 1] = body.into();
    }

    /// Serialize with object `root` as the catalog
    pub fn build(&self, root: usize) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(self.objects.len());
        for (i, body) in self.objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", self.objects.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{}\n%%EOF\n",
                self.objects.len() + 1,
                root,
                xref
            )
            .as_bytes(),
        );
        out
    }
}

/// Catalog (1), page tree (2) and one page (3); returns the builder and
/// leaves the catalog and page bodies for the caller to finish.
fn skeleton() -> PdfBuilder {
    let mut pdf = PdfBuilder::new();
    pdf.add("<< /Type /Catalog /Pages 2 0 R >>");
    pdf.add("<< /Type /Pages /Kids [3 0 R] /Count 1 >>");
    pdf.add("<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>");
    pdf
}

fn widget(extra: &str) -> String {
    format!(
        "<< /Type /Annot /Subtype /Widget /Rect [50 700 250 720] /P 3 0 R {} >>",
        extra
    )
}

/// A one-page PDF without an AcroForm
pub fn plain_pdf() -> Vec<u8> {
    skeleton().build(1)
}

/// A one-page PDF whose AcroForm holds `fields` as merged field/widget
/// dictionaries, in order
pub fn form_pdf(fields: &[TestField]) -> Vec<u8> {
    let mut pdf = skeleton();
    let acroform = pdf.add("");

    let refs: Vec<String> = fields
        .iter()
        .map(|field| {
            let body = match field {
                TestField::Text(name, Some(value)) => {
                    widget(&format!("/FT /Tx /T ({}) /V ({})", name, value))
                }
                TestField::Text(name, None) => widget(&format!("/FT /Tx /T ({})", name)),
                TestField::TextRaw(name, raw) => {
                    widget(&format!("/FT /Tx /T ({}) /V {}", name, raw))
                }
                TestField::Checkbox(name) => {
                    widget(&format!("/FT /Btn /T ({}) /V /Yes /AS /Yes", name))
                }
                TestField::Choice(name, value) => widget(&format!(
                    "/FT /Ch /Ff 131072 /T ({}) /Opt [({}) (Other)] /V ({})",
                    name, value, value
                )),
            };
            format!("{} 0 R", pdf.add(body))
        })
        .collect();

    let refs = refs.join(" ");
    pdf.set(acroform, format!("<< /Fields [{}] >>", refs));
    pdf.set(
        1,
        format!("<< /Type /Catalog /Pages 2 0 R /AcroForm {} 0 R >>", acroform),
    );
    pdf.set(
        3,
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Annots [{}] >>",
            refs
        ),
    );
    pdf.build(1)
}

/// A PDF whose catalog has an `/AcroForm` without `/Fields`
pub fn empty_acroform_pdf() -> Vec<u8> {
    let mut pdf = skeleton();
    let acroform = pdf.add("<< /DA (/Helv 0 Tf 0 g) >>");
    pdf.set(
        1,
        format!("<< /Type /Catalog /Pages 2 0 R /AcroForm {} 0 R >>", acroform),
    );
    pdf.build(1)
}

/// A form with a field hierarchy:
///
/// - `person` (non-terminal, `/FT /Tx` inherited by its kids)
///   - `first` = "Ada"
///   - `last` (no value)
/// - `email` = "ada@example.com", with two widget kids (no `/T`)
/// - `agree`, a checkbox
pub fn hierarchical_form_pdf() -> Vec<u8> {
    let mut pdf = skeleton();
    let acroform = pdf.add("");
    let person = pdf.add("");
    let first = pdf.add(widget(&format!("/T (first) /V (Ada) /Parent {} 0 R", person)));
    let last = pdf.add(widget(&format!("/T (last) /Parent {} 0 R", person)));
    pdf.set(
        person,
        format!(
            "<< /FT /Tx /T (person) /Kids [{} 0 R {} 0 R] >>",
            first, last
        ),
    );

    let email = pdf.add("");
    let email_top = pdf.add(widget(&format!("/Parent {} 0 R", email)));
    let email_bottom = pdf.add(widget(&format!("/Parent {} 0 R", email)));
    pdf.set(
        email,
        format!(
            "<< /FT /Tx /T (email) /V (ada@example.com) /Kids [{} 0 R {} 0 R] >>",
            email_top, email_bottom
        ),
    );

    let agree = pdf.add(widget("/FT /Btn /T (agree) /V /Off /AS /Off"));

    pdf.set(
        acroform,
        format!(
            "<< /Fields [{} 0 R {} 0 R {} 0 R] >>",
            person, email, agree
        ),
    );
    pdf.set(
        1,
        format!("<< /Type /Catalog /Pages 2 0 R /AcroForm {} 0 R >>", acroform),
    );
    pdf.set(
        3,
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Annots [{} 0 R {} 0 R {} 0 R {} 0 R {} 0 R] >>",
            first, last, email_top, email_bottom, agree
        ),
    );
    pdf.build(1)
}

/// A flat form with `count` text fields named `field0`, `field1`, ...
pub fn wide_form_pdf(count: usize) -> Vec<u8> {
    let mut pdf = skeleton();
    let acroform = pdf.add("");

    let refs: Vec<String> = (0..count)
        .map(|i| {
            let num = pdf.add(widget(&format!("/FT /Tx /T (field{}) /V (value {})", i, i)));
            format!("{} 0 R", num)
        })
        .collect();
    let refs = refs.join(" ");

    pdf.set(acroform, format!("<< /Fields [{}] >>", refs));
    pdf.set(
        1,
        format!("<< /Type /Catalog /Pages 2 0 R /AcroForm {} 0 R >>", acroform),
    );
    pdf.set(
        3,
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Annots [{}] >>",
            refs
        ),
    );
    pdf.build(1)
}

/// A form whose field `a` lists itself twice in `/Kids`, next to a
/// well-formed field `b` = "ok"
pub fn cyclic_form_pdf() -> Vec<u8> {
    let mut pdf = skeleton();
    let acroform = pdf.add("");
    let cyclic = pdf.add("");
    pdf.set(
        cyclic,
        format!(
            "<< /FT /Tx /T (a) /Kids [{} 0 R {} 0 R] >>",
            cyclic, cyclic
        ),
    );
    let ok = pdf.add(widget("/FT /Tx /T (b) /V (ok)"));

    pdf.set(
        acroform,
        format!("<< /Fields [{} 0 R {} 0 R] >>", cyclic, ok),
    );
    pdf.set(
        1,
        format!("<< /Type /Catalog /Pages 2 0 R /AcroForm {} 0 R >>", acroform),
    );
    pdf.build(1)
}

/// A form where `group` has one named kid (`child` = "x") and one widget
/// kid without `/T`
pub fn mixed_kids_form_pdf() -> Vec<u8> {
    let mut pdf = skeleton();
    let acroform = pdf.add("");
    let group = pdf.add("");
    let child = pdf.add(widget(&format!("/T (child) /V (x) /Parent {} 0 R", group)));
    let stray = pdf.add(widget(&format!("/Parent {} 0 R", group)));
    pdf.set(
        group,
        format!(
            "<< /FT /Tx /T (group) /V (inherited) /Kids [{} 0 R {} 0 R] >>",
            child, stray
        ),
    );

    pdf.set(acroform, format!("<< /Fields [{} 0 R] >>", group));
    pdf.set(
        1,
        format!("<< /Type /Catalog /Pages 2 0 R /AcroForm {} 0 R >>", acroform),
    );
    pdf.set(
        3,
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Annots [{} 0 R {} 0 R] >>",
            child, stray
        ),
    );
    pdf.build(1)
}
