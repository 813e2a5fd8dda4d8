use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Subject {
    pub name: String,
    pub subject_type: String,
}

impl Subject {
    pub fn new(name: impl Into<String>, subject_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subject_type: subject_type.into(),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", self.name, self.subject_type)
    }
}

/// Chronological averages for one category. Entries can only be appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryHistory {
    category: String,
    values: Vec<f64>,
}

impl CategoryHistory {
    pub fn new(category: impl Into<String>) -> Self {
        Self::with_values(category, Vec::new())
    }

    pub fn with_values(category: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            category: category.into(),
            values,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }
}

/// Per-category histories in rendering order, at most one entry per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryHistories {
    entries: Vec<CategoryHistory>,
}

impl CategoryHistories {
    pub fn get(&self, category: &str) -> Option<&CategoryHistory> {
        self.entries.iter().find(|h| h.category == category)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryHistory> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CategoryHistory> for CategoryHistories {
    fn from_iter<T: IntoIterator<Item = CategoryHistory>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for CategoryHistories {
    type Item = CategoryHistory;
    type IntoIter = std::vec::IntoIter<CategoryHistory>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a CategoryHistories {
    type Item = &'a CategoryHistory;
    type IntoIter = std::slice::Iter<'a, CategoryHistory>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverallEntry {
    pub date: NaiveDate,
    pub rating: f64,
}

/// One overall rating per completed evaluation, in insertion order.
/// Dates are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OverallHistory {
    entries: Vec<OverallEntry>,
}

impl OverallHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: OverallEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[OverallEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&OverallEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<OverallEntry> for OverallHistory {
    fn from_iter<T: IntoIterator<Item = OverallEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// History recovered from a previously exported report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedMeta {
    pub subject_name: Option<String>,
    pub subject_type: Option<String>,
    pub categories: CategoryHistories,
    pub overall: OverallHistory,
}

impl ParsedMeta {
    /// Subject identity from the report heading, when both halves were found.
    pub fn subject(&self) -> Option<Subject> {
        match (&self.subject_name, &self.subject_type) {
            (Some(name), Some(subject_type)) => Some(Subject::new(name, subject_type)),
            _ => None,
        }
    }

    pub fn has_history(&self) -> bool {
        !self.categories.is_empty() || !self.overall.is_empty()
    }
}

/// Rendered chart, carried verbatim into the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartArtifact {
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRecord {
    pub subject: Subject,
    pub generated_at: NaiveDateTime,
    pub categories: CategoryHistories,
    pub overall: OverallHistory,
    pub chart: ChartArtifact,
}
