use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::model::history::ParsedMeta;
use crate::model::profile::ScoringProfile;
use crate::model::scores::{CategoryScores, ScoreMatrix};
use crate::taxonomy::CategoryDef;

/// Raw evaluator input: category → sub-skill → score.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ScoreSheet {
    entries: BTreeMap<String, BTreeMap<String, f64>>,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid score sheet {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("score sheet names category `{0}`, which is not scored for this subject")]
    UnknownCategory(String),
    #[error("score sheet names sub-skill `{sub_skill}`, which is not part of `{category}`")]
    UnknownSubSkill { category: String, sub_skill: String },
    #[error("score for {category} / {sub_skill} must be a whole number in {min}..={max}, got {value}")]
    OutOfRange {
        category: String,
        sub_skill: String,
        value: f64,
        min: u32,
        max: u32,
    },
}

impl ScoreSheet {
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let text = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let sheet: ScoreSheet = serde_json::from_str(&text).map_err(|source| InputError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), categories = sheet.entries.len(), "loaded score sheet");
        Ok(sheet)
    }

    fn get(&self, category: &str, sub_skill: &str) -> Option<f64> {
        self.entries.get(category)?.get(sub_skill).copied()
    }
}

/// Builds the matrix in taxonomy order. Sub-skills the sheet leaves out are
/// prefilled from the category's latest prior average, else the profile
/// default.
pub fn build_score_matrix(
    categories: &[&CategoryDef],
    sheet: &ScoreSheet,
    prior: &ParsedMeta,
    profile: &ScoringProfile,
) -> Result<ScoreMatrix, InputError> {
    validate_sheet(categories, sheet)?;

    let mut matrix = ScoreMatrix::new();
    for def in categories {
        let mut scores = CategoryScores::new(def.name.clone());
        for sub_skill in &def.sub_skills {
            let score = match sheet.get(&def.name, sub_skill) {
                Some(value) => checked_score(&def.name, sub_skill, value, profile)?,
                None => {
                    let filled = prefill_score(&def.name, prior, profile);
                    warn!(
                        category = %def.name,
                        sub_skill = %sub_skill,
                        score = filled,
                        "no score given; prefilled"
                    );
                    filled
                }
            };
            scores.push(sub_skill.clone(), score);
        }
        matrix.push(scores);
    }
    Ok(matrix)
}

pub fn prefill_score(category: &str, prior: &ParsedMeta, profile: &ScoringProfile) -> u32 {
    prior
        .categories
        .get(category)
        .and_then(|h| h.latest())
        .filter(|v| *v >= 0.0)
        .map(|v| profile.clamp(v.trunc() as u32))
        .unwrap_or_else(|| profile.clamp(profile.default_score))
}

fn validate_sheet(categories: &[&CategoryDef], sheet: &ScoreSheet) -> Result<(), InputError> {
    for (category, subs) in &sheet.entries {
        let def = categories
            .iter()
            .find(|c| &c.name == category)
            .ok_or_else(|| InputError::UnknownCategory(category.clone()))?;
        for sub_skill in subs.keys() {
            if !def.sub_skills.contains(sub_skill) {
                return Err(InputError::UnknownSubSkill {
                    category: category.clone(),
                    sub_skill: sub_skill.clone(),
                });
            }
        }
    }
    Ok(())
}

fn checked_score(
    category: &str,
    sub_skill: &str,
    value: f64,
    profile: &ScoringProfile,
) -> Result<u32, InputError> {
    let out_of_range = || InputError::OutOfRange {
        category: category.to_string(),
        sub_skill: sub_skill.to_string(),
        value,
        min: profile.min_score,
        max: profile.max_score,
    };
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(out_of_range());
    }
    let score = value as u32;
    if !profile.contains(score) {
        return Err(out_of_range());
    }
    Ok(score)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
