use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::document::{DocumentError, DocumentFormat};
use crate::model::history::{ReportRecord, Subject};
use crate::report::DATE_FORMAT;
use crate::report::json::render_summary_json;
use crate::report::text::render_report;

#[derive(Debug, Clone)]
pub struct Stage4Input<'a> {
    pub record: &'a ReportRecord,
    pub display_scale: u32,
    pub format: DocumentFormat,
    pub out_dir: &'a Path,
    pub write_json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub report_path: PathBuf,
    pub json_path: Option<PathBuf>,
    pub mime_type: &'static str,
}

#[derive(Debug, Error)]
pub enum ReportWriteError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// `{date}_{Name}_{Type}_Report.{ext}` with whitespace and path-hostile
/// characters replaced by `_`.
pub fn report_file_name(subject: &Subject, date: NaiveDate, format: DocumentFormat) -> String {
    format!(
        "{}_{}_{}_Report.{}",
        date.format(DATE_FORMAT),
        file_name_part(&subject.name),
        file_name_part(&subject.subject_type),
        format.extension()
    )
}

/// Renders the whole document in memory, then writes it in one call.
pub fn write_report(input: &Stage4Input<'_>) -> Result<WrittenReport, ReportWriteError> {
    fs::create_dir_all(input.out_dir).map_err(|source| ReportWriteError::Io {
        path: input.out_dir.to_path_buf(),
        source,
    })?;

    let record = input.record;
    let file_name = report_file_name(
        &record.subject,
        record.generated_at.date(),
        input.format,
    );
    let report_path = input.out_dir.join(file_name);
    let bytes = render_report(record, input.display_scale).to_bytes(input.format)?;
    write_bytes(&report_path, &bytes)?;
    info!(
        path = %report_path.display(),
        bytes = bytes.len(),
        mime = input.format.mime_type(),
        "wrote report"
    );

    let json_path = if input.write_json {
        let path = report_path.with_extension("json");
        let json = render_summary_json(record, input.display_scale)?;
        write_bytes(&path, json.as_bytes())?;
        info!(path = %path.display(), "wrote summary");
        Some(path)
    } else {
        None
    };

    Ok(WrittenReport {
        report_path,
        json_path,
        mime_type: input.format.mime_type(),
    })
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), ReportWriteError> {
    fs::write(path, bytes).map_err(|source| ReportWriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn file_name_part(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
