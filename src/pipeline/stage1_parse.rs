use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::model::history::{
    CategoryHistories, CategoryHistory, OverallEntry, OverallHistory, ParsedMeta,
};
use crate::report::{DATE_FORMAT, HISTORY_HEADER, OVERALL_RATING_PREFIX};

static HEADING_RE: OnceLock<Regex> = OnceLock::new();
static BULLET_RE: OnceLock<Regex> = OnceLock::new();
static DATE_ENTRY_RE: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Normal,
    InOverallBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Heading { name: &'a str, subject_type: &'a str },
    Bullet { category: &'a str, values: &'a str },
    HistoryHeader,
    OverallRating,
    DateEntry { date: &'a str, value: &'a str },
    Other,
}

/// Line-at-a-time scanner recovering history from report text.
///
/// Recognition of headings and bullets does not depend on the state; only
/// date entries do, and only inside the block opened by the history header
/// and closed by the next blank line.
#[derive(Debug)]
pub struct ReportParser {
    state: ScanState,
    subject_name: Option<String>,
    subject_type: Option<String>,
    categories: Vec<CategoryHistory>,
    overall: OverallHistory,
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportParser {
    pub fn new() -> Self {
        Self {
            state: ScanState::Normal,
            subject_name: None,
            subject_type: None,
            categories: Vec::new(),
            overall: OverallHistory::new(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn feed(&mut self, raw: &str) {
        let line = raw.trim();
        match classify(line) {
            LineKind::Blank => self.state = ScanState::Normal,
            LineKind::HistoryHeader => self.state = ScanState::InOverallBlock,
            LineKind::OverallRating => {}
            LineKind::Heading { name, subject_type } => {
                self.subject_name = Some(name.to_string());
                self.subject_type = Some(subject_type.to_string());
            }
            LineKind::Bullet { category, values } => self.record_bullet(category, values),
            LineKind::DateEntry { date, value } => {
                if self.state == ScanState::InOverallBlock {
                    self.record_date_entry(date, value);
                }
            }
            LineKind::Other => {}
        }
    }

    pub fn finish(self) -> ParsedMeta {
        ParsedMeta {
            subject_name: self.subject_name,
            subject_type: self.subject_type,
            categories: self.categories.into_iter().collect::<CategoryHistories>(),
            overall: self.overall,
        }
    }

    fn record_bullet(&mut self, category: &str, raw_values: &str) {
        let values = parse_value_list(raw_values);
        if values.is_empty() {
            debug!(category, "bullet carries no usable values; skipped");
            return;
        }
        let history = CategoryHistory::with_values(category, values);
        match self
            .categories
            .iter()
            .position(|h| h.category() == category)
        {
            Some(idx) => self.categories[idx] = history,
            None => self.categories.push(history),
        }
    }

    fn record_date_entry(&mut self, date: &str, value: &str) {
        let Ok(date) = NaiveDate::parse_from_str(date, DATE_FORMAT) else {
            debug!(date, "invalid calendar date in overall history; dropped");
            return;
        };
        let Some(rating) = parse_number(value) else {
            debug!(value, "malformed overall rating; dropped");
            return;
        };
        self.overall.push(OverallEntry { date, rating });
    }
}

pub fn parse_report<'a, I>(lines: I) -> ParsedMeta
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parser = ReportParser::new();
    for line in lines {
        parser.feed(line);
    }
    parser.finish()
}

/// Classifies an already trimmed line.
pub fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line == HISTORY_HEADER {
        return LineKind::HistoryHeader;
    }
    if line.starts_with(OVERALL_RATING_PREFIX) {
        return LineKind::OverallRating;
    }

    let bullet_re = BULLET_RE.get_or_init(|| {
        Regex::new(r"^•\s*(?P<category>[^:]*[^:\s])\s*:(?P<values>.*)$")
            .expect("bullet pattern is valid")
    });
    if let Some(caps) = bullet_re.captures(line) {
        if let (Some(category), Some(values)) = (caps.name("category"), caps.name("values")) {
            return LineKind::Bullet {
                category: category.as_str(),
                values: values.as_str(),
            };
        }
    }

    let heading_re = HEADING_RE.get_or_init(|| {
        Regex::new(r"^(?P<name>.+?) – (?P<subject_type>.+?) Stats Report$")
            .expect("heading pattern is valid")
    });
    if let Some(caps) = heading_re.captures(line) {
        if let (Some(name), Some(subject_type)) = (caps.name("name"), caps.name("subject_type")) {
            return LineKind::Heading {
                name: name.as_str(),
                subject_type: subject_type.as_str(),
            };
        }
    }

    let date_re = DATE_ENTRY_RE.get_or_init(|| {
        Regex::new(r"^(?P<date>\d{4}-\d{2}-\d{2}):\s*(?P<value>\S+)$")
            .expect("date entry pattern is valid")
    });
    if let Some(caps) = date_re.captures(line) {
        if let (Some(date), Some(value)) = (caps.name("date"), caps.name("value")) {
            return LineKind::DateEntry {
                date: date.as_str(),
                value: value.as_str(),
            };
        }
    }

    LineKind::Other
}

/// Parses `v1; v2; ...`. Tokens that are not finite numbers are dropped.
pub fn parse_value_list(raw: &str) -> Vec<f64> {
    raw.split(';')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let parsed = parse_number(token);
            if parsed.is_none() {
                debug!(token, "dropping malformed history token");
            }
            parsed
        })
        .collect()
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_parse.rs"]
mod tests;
