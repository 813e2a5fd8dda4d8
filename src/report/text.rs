use crate::document::{Document, ParagraphStyle};
use crate::model::history::ReportRecord;
use crate::report::{
    HISTORY_HEADER, TIMESTAMP_FORMAT, bullet_line, heading_line, history_entry_line,
    overall_rating_line, separator_line,
};

/// Lays out a report so that `parse_report` recovers the same histories.
///
/// The history block runs to the end of the document; a blank line anywhere
/// after the header would cut it short.
pub fn render_report(record: &ReportRecord, display_scale: u32) -> Document {
    let mut doc = Document::new();

    doc.push(ParagraphStyle::Heading, heading_line(&record.subject));
    doc.push(
        ParagraphStyle::Body,
        format!(
            "Report Generated: {}",
            record.generated_at.format(TIMESTAMP_FORMAT)
        ),
    );

    for line in &record.chart.lines {
        doc.push(ParagraphStyle::Chart, line.as_str());
    }
    doc.push(ParagraphStyle::Body, "");

    for history in &record.categories {
        doc.push(ParagraphStyle::Bullet, bullet_line(history));
    }
    doc.push(ParagraphStyle::Body, "");

    if let Some(latest) = record.overall.latest() {
        doc.push(
            ParagraphStyle::Emphasis,
            overall_rating_line(latest.rating, display_scale),
        );
    }
    doc.push(ParagraphStyle::Body, separator_line());
    doc.push(ParagraphStyle::Body, HISTORY_HEADER);
    for entry in record.overall.entries() {
        doc.push(ParagraphStyle::Body, history_entry_line(entry));
    }

    doc
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
