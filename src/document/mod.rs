pub mod docx;
pub mod zip;

use clap::ValueEnum;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    Docx,
    Text,
}

impl DocumentFormat {
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(zip::LOCAL_HEADER_MAGIC) {
            DocumentFormat::Docx
        } else {
            DocumentFormat::Text
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Docx => "docx",
            DocumentFormat::Text => "txt",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentFormat::Text => "text/plain; charset=utf-8",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    Heading,
    Body,
    Bullet,
    Chart,
    Emphasis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub style: ParagraphStyle,
    pub text: String,
}

/// Ordered paragraphs; each paragraph is one line of report text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document is truncated or not a zip archive")]
    Truncated,
    #[error("corrupt zip archive: {0}")]
    Corrupt(&'static str),
    #[error("document has no `{0}` part")]
    MissingEntry(String),
    #[error("unsupported compression method {method} for `{name}`")]
    UnsupportedCompression { name: String, method: u16 },
    #[error("failed to inflate `{name}`: {source}")]
    Inflate {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to deflate `{name}`: {source}")]
    Deflate {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("document text is not valid UTF-8")]
    NotUtf8,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, style: ParagraphStyle, text: impl Into<String>) {
        self.paragraphs.push(Paragraph {
            style,
            text: text.into(),
        });
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.paragraphs.iter().map(|p| p.text.as_str())
    }

    pub fn from_text(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut doc = Document::new();
        for line in text.lines() {
            doc.push(ParagraphStyle::Body, line);
        }
        doc
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for paragraph in &self.paragraphs {
            out.push_str(&paragraph.text);
            out.push('\n');
        }
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, DocumentFormat), DocumentError> {
        let format = DocumentFormat::detect(bytes);
        let doc = match format {
            DocumentFormat::Docx => docx::read_document(bytes)?,
            DocumentFormat::Text => {
                let text = std::str::from_utf8(bytes).map_err(|_| DocumentError::NotUtf8)?;
                Document::from_text(text)
            }
        };
        Ok((doc, format))
    }

    pub fn to_bytes(&self, format: DocumentFormat) -> Result<Vec<u8>, DocumentError> {
        match format {
            DocumentFormat::Docx => docx::write_document(self),
            DocumentFormat::Text => Ok(self.to_text().into_bytes()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/document/tests.rs"]
mod tests;
