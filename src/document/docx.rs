use std::fmt::Write;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::document::{Document, DocumentError, Paragraph, ParagraphStyle, zip};

const DOCUMENT_PART: &str = "word/document.xml";

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"</Types>"#,
);

const PACKAGE_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#,
);

const DOCUMENT_OPEN: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:body>"#,
);

const DOCUMENT_CLOSE: &str = r#"<w:sectPr/></w:body></w:document>"#;

static PARAGRAPH_RE: OnceLock<Regex> = OnceLock::new();
static RUN_TEXT_RE: OnceLock<Regex> = OnceLock::new();
static ENTITY_RE: OnceLock<Regex> = OnceLock::new();

pub fn read_document(bytes: &[u8]) -> Result<Document, DocumentError> {
    let xml = zip::read_entry(bytes, DOCUMENT_PART)?;
    let xml = String::from_utf8(xml).map_err(|_| DocumentError::NotUtf8)?;
    let mut doc = Document::new();
    for text in paragraph_texts(&xml) {
        doc.push(ParagraphStyle::Body, text);
    }
    Ok(doc)
}

pub fn write_document(doc: &Document) -> Result<Vec<u8>, DocumentError> {
    let mut xml = String::from(DOCUMENT_OPEN);
    for paragraph in doc.paragraphs() {
        render_paragraph(&mut xml, paragraph);
    }
    xml.push_str(DOCUMENT_CLOSE);

    zip::write_archive(&[
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes()),
        (DOCUMENT_PART, xml.as_bytes()),
    ])
}

/// Plain text lines of every `<w:p>` in document order. Self-closing
/// paragraphs yield empty strings; `<w:tab/>` becomes a tab, and `<w:br/>` or
/// `<w:cr/>` starts a new line.
pub fn paragraph_texts(xml: &str) -> Vec<String> {
    let paragraph_re = PARAGRAPH_RE.get_or_init(|| {
        Regex::new(r"(?s)<w:p(?:\s[^>]*)?/>|<w:p(?:\s[^>]*)?>(.*?)</w:p>")
            .expect("paragraph pattern is valid")
    });
    let run_re = RUN_TEXT_RE.get_or_init(|| {
        Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab/>|<w:br(?:\s[^>]*)?/>|<w:cr/>")
            .expect("run text pattern is valid")
    });

    let mut out = Vec::new();
    for caps in paragraph_re.captures_iter(xml) {
        let mut text = String::new();
        if let Some(body) = caps.get(1) {
            for run in run_re.captures_iter(body.as_str()) {
                if let Some(t) = run.get(1) {
                    text.push_str(&unescape_xml(t.as_str()));
                } else if run[0].starts_with("<w:tab") {
                    text.push('\t');
                } else {
                    out.push(std::mem::take(&mut text));
                }
            }
        }
        out.push(text);
    }
    out
}

fn render_paragraph(out: &mut String, paragraph: &Paragraph) {
    if paragraph.text.is_empty() {
        out.push_str("<w:p/>");
        return;
    }
    let (paragraph_props, run_props) = match paragraph.style {
        ParagraphStyle::Heading => (
            r#"<w:pPr><w:spacing w:after="240"/></w:pPr>"#,
            r#"<w:rPr><w:b/><w:sz w:val="32"/></w:rPr>"#,
        ),
        ParagraphStyle::Body => ("", ""),
        ParagraphStyle::Bullet => (r#"<w:pPr><w:ind w:left="360"/></w:pPr>"#, ""),
        ParagraphStyle::Chart => (
            r#"<w:pPr><w:spacing w:after="0"/></w:pPr>"#,
            r#"<w:rPr><w:rFonts w:ascii="Courier New" w:hAnsi="Courier New" w:cs="Courier New"/><w:sz w:val="16"/></w:rPr>"#,
        ),
        ParagraphStyle::Emphasis => ("", r#"<w:rPr><w:b/><w:i/></w:rPr>"#),
    };
    let _ = write!(
        out,
        r#"<w:p>{paragraph_props}<w:r>{run_props}<w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape_xml(&paragraph.text)
    );
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

pub fn unescape_xml(text: &str) -> String {
    let entity_re = ENTITY_RE.get_or_init(|| {
        Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);")
            .expect("entity pattern is valid")
    });
    entity_re
        .replace_all(text, |caps: &Captures<'_>| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => numeric_entity(entity),
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn numeric_entity(entity: &str) -> Option<char> {
    let code = match entity.strip_prefix("#x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => entity.strip_prefix('#')?.parse().ok()?,
    };
    char::from_u32(code)
}

#[cfg(test)]
#[path = "../../tests/src_inline/document/docx.rs"]
mod tests;
