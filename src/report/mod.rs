pub mod chart;
pub mod json;
pub mod text;

use crate::model::history::{CategoryHistory, OverallEntry, Subject};
use crate::pipeline::stage1_parse::{LineKind, classify};

pub const HEADING_SEPARATOR: &str = " – ";
pub const HEADING_SUFFIX: &str = " Stats Report";
pub const BULLET_MARK: char = '•';
pub const VALUE_SEPARATOR: &str = "; ";
pub const OVERALL_RATING_PREFIX: &str = "Overall Rating:";
pub const HISTORY_HEADER: &str = "Overall Ratings by Date:";
pub const SEPARATOR_WIDTH: usize = 38;
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_one_decimal(v: f64) -> String {
    format!("{:.1}", v)
}

pub fn round_one_decimal(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub fn heading_line(subject: &Subject) -> String {
    format!(
        "{}{}{}{}",
        subject.name, HEADING_SEPARATOR, subject.subject_type, HEADING_SUFFIX
    )
}

pub fn bullet_line(history: &CategoryHistory) -> String {
    let values = history
        .values()
        .iter()
        .map(|v| format_one_decimal(*v))
        .collect::<Vec<_>>()
        .join(VALUE_SEPARATOR);
    format!("{} {}: {}", BULLET_MARK, history.category(), values)
}

pub fn overall_rating_line(rating: f64, display_scale: u32) -> String {
    format!(
        "{} {} / {}",
        OVERALL_RATING_PREFIX,
        format_one_decimal(rating),
        display_scale
    )
}

pub fn history_entry_line(entry: &OverallEntry) -> String {
    format!(
        "{}: {}",
        entry.date.format(DATE_FORMAT),
        format_one_decimal(entry.rating)
    )
}

pub fn separator_line() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Names end up inside report lines, so they must come back out of
/// `classify` unchanged. Each check returns the reason a name is refused.
pub fn check_subject(subject: &Subject) -> Result<(), String> {
    check_subject_part(&subject.name)?;
    check_subject_part(&subject.subject_type)?;
    match classify(heading_line(subject).trim()) {
        LineKind::Heading { name, subject_type }
            if name == subject.name && subject_type == subject.subject_type =>
        {
            Ok(())
        }
        _ => Err(format!("`{subject}` would not read back as a report heading")),
    }
}

/// A subject name or subject type on its own.
pub fn check_subject_part(part: &str) -> Result<(), String> {
    check_line_text(part)?;
    if part.contains(HEADING_SEPARATOR) {
        return Err(format!(
            "`{part}` contains the heading separator `{}`",
            HEADING_SEPARATOR.trim()
        ));
    }
    if part.contains(HEADING_SUFFIX) {
        return Err(format!("`{part}` contains `{}`", HEADING_SUFFIX.trim()));
    }
    Ok(())
}

pub fn check_category_name(category: &str) -> Result<(), String> {
    check_line_text(category)?;
    let sample = bullet_line(&CategoryHistory::with_values(category, vec![0.0]));
    match classify(sample.trim()) {
        LineKind::Bullet { category: parsed, .. } if parsed == category => Ok(()),
        _ => Err(format!(
            "category `{category}` would not read back from a bullet line (no `:` allowed)"
        )),
    }
}

/// Sub-skills only appear as chart labels, which must never look like bullets.
pub fn check_sub_skill_name(sub_skill: &str) -> Result<(), String> {
    check_line_text(sub_skill)?;
    if sub_skill.starts_with(BULLET_MARK) {
        return Err(format!("sub-skill `{sub_skill}` starts with `{BULLET_MARK}`"));
    }
    Ok(())
}

fn check_line_text(text: &str) -> Result<(), String> {
    if text.is_empty() {
        return Err("name is empty".to_string());
    }
    if text.contains(['\n', '\r']) {
        return Err(format!("`{}` contains a line break", text.escape_debug()));
    }
    if text.trim() != text {
        return Err(format!("`{text}` has leading or trailing whitespace"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
