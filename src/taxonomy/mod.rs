pub mod defs;
pub mod loader;

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::model::history::Subject;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDef {
    pub name: String,
    pub sub_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectDef {
    pub name: String,
    pub specialty: Vec<CategoryDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectTypeDef {
    pub name: String,
    pub skillset: Vec<CategoryDef>,
    pub subjects: Vec<SubjectDef>,
}

/// Subject types in configuration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    pub types: Vec<SubjectTypeDef>,
}

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("failed to read taxonomy {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid taxonomy JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("in {}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<TaxonomyError>,
    },
    #[error("malformed taxonomy: {0}")]
    Malformed(String),
    #[error("unknown subject type `{requested}` (known: {known})")]
    UnknownType { requested: String, known: String },
}

impl Taxonomy {
    pub fn subject_type(&self, name: &str) -> Option<&SubjectTypeDef> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Categories scored for `subject`: the type's skillset followed by the
    /// subject's specialty categories. Subjects not listed under the type get
    /// the skillset only.
    pub fn categories_for(&self, subject: &Subject) -> Result<Vec<&CategoryDef>, TaxonomyError> {
        let subject_type =
            self.subject_type(&subject.subject_type)
                .ok_or_else(|| TaxonomyError::UnknownType {
                    requested: subject.subject_type.clone(),
                    known: self
                        .types
                        .iter()
                        .map(|t| t.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                })?;

        let mut categories = subject_type.skillset.iter().collect::<Vec<_>>();
        match subject_type.subjects.iter().find(|s| s.name == subject.name) {
            Some(def) => {
                for specialty in &def.specialty {
                    if categories.iter().any(|c| c.name == specialty.name) {
                        continue;
                    }
                    categories.push(specialty);
                }
            }
            None => debug!(
                subject = %subject.name,
                subject_type = %subject.subject_type,
                "subject not listed in taxonomy; scoring skillset only"
            ),
        }
        Ok(categories)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/taxonomy/tests.rs"]
mod tests;
