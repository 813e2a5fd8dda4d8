use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::model::history::Subject;
use crate::report::{check_category_name, check_sub_skill_name, check_subject, check_subject_part};
use crate::taxonomy::{CategoryDef, SubjectDef, SubjectTypeDef, Taxonomy, TaxonomyError};

#[derive(Debug, Deserialize)]
struct RawSubjectType {
    #[serde(rename = "Skillset")]
    skillset: Map<String, Value>,
    #[serde(rename = "Players", default)]
    players: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSubject {
    #[serde(rename = "Specialty", default)]
    specialty: Map<String, Value>,
}

/// Loads a taxonomy file shaped as
/// `{ "<Type>": { "Skillset": {..}, "Players": { "<Name>": { "Specialty": {..} } } } }`.
/// Key order in the file is the category order in reports.
pub fn load_taxonomy(path: &Path) -> Result<Taxonomy, TaxonomyError> {
    let text = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let taxonomy = parse_taxonomy(&text).map_err(|err| TaxonomyError::InFile {
        path: path.to_path_buf(),
        source: Box::new(err),
    })?;
    info!(
        path = %path.display(),
        types = taxonomy.types.len(),
        "loaded taxonomy"
    );
    Ok(taxonomy)
}

pub(crate) fn parse_taxonomy(text: &str) -> Result<Taxonomy, TaxonomyError> {
    let root: Map<String, Value> = serde_json::from_str(text)?;
    let mut types = Vec::with_capacity(root.len());
    for (type_name, value) in root {
        check_subject_part(&type_name).map_err(|reason| {
            TaxonomyError::Malformed(format!("subject type: {reason}"))
        })?;
        let raw: RawSubjectType = serde_json::from_value(value)?;
        let skillset = category_defs(&type_name, raw.skillset)?;
        if skillset.is_empty() {
            return Err(TaxonomyError::Malformed(format!(
                "subject type `{type_name}` has an empty skillset"
            )));
        }

        let mut subjects = Vec::with_capacity(raw.players.len());
        for (subject_name, value) in raw.players {
            check_subject(&Subject::new(subject_name.as_str(), type_name.as_str())).map_err(
                |reason| TaxonomyError::Malformed(format!("subject under `{type_name}`: {reason}")),
            )?;
            let raw_subject: RawSubject = if value.is_null() {
                RawSubject::default()
            } else {
                serde_json::from_value(value)?
            };
            subjects.push(SubjectDef {
                specialty: category_defs(&subject_name, raw_subject.specialty)?,
                name: subject_name,
            });
        }

        types.push(SubjectTypeDef {
            name: type_name,
            skillset,
            subjects,
        });
    }
    Ok(Taxonomy { types })
}

fn category_defs(owner: &str, raw: Map<String, Value>) -> Result<Vec<CategoryDef>, TaxonomyError> {
    let mut out = Vec::with_capacity(raw.len());
    for (name, value) in raw {
        check_category_name(&name)
            .map_err(|reason| TaxonomyError::Malformed(format!("under `{owner}`: {reason}")))?;
        let sub_skills: Vec<String> = serde_json::from_value(value)?;
        for sub_skill in &sub_skills {
            check_sub_skill_name(sub_skill).map_err(|reason| {
                TaxonomyError::Malformed(format!("in `{name}` under `{owner}`: {reason}"))
            })?;
        }
        if sub_skills.is_empty() {
            return Err(TaxonomyError::Malformed(format!(
                "category `{name}` under `{owner}` lists no sub-skills"
            )));
        }
        out.push(CategoryDef { name, sub_skills });
    }
    Ok(out)
}
