use thiserror::Error;

use crate::model::profile::{CapPolicy, ScoringProfile};
use crate::model::scores::{CategoryScores, ScoreMatrix};
use crate::report::round_one_decimal;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("cannot average empty category `{category}`: it has no sub-skill scores")]
    EmptyCategory { category: String },
    #[error("cannot compute an overall rating: no category averages")]
    EmptyRatings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAverage {
    pub category: String,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stage2Output {
    /// Unrounded, in matrix order.
    pub averages: Vec<CategoryAverage>,
    /// Rounded to one decimal.
    pub overall: f64,
}

pub fn category_average(scores: &CategoryScores, cap: CapPolicy) -> Result<f64, ScoreError> {
    if scores.is_empty() {
        return Err(ScoreError::EmptyCategory {
            category: scores.category.clone(),
        });
    }
    let sum: f64 = scores.values().map(|v| cap.apply(f64::from(v))).sum();
    Ok(sum / scores.scores.len() as f64)
}

pub fn overall_rating(averages: &[f64]) -> Result<f64, ScoreError> {
    if averages.is_empty() {
        return Err(ScoreError::EmptyRatings);
    }
    let mean = averages.iter().sum::<f64>() / averages.len() as f64;
    Ok(round_one_decimal(mean))
}

pub fn run_stage2(matrix: &ScoreMatrix, profile: &ScoringProfile) -> Result<Stage2Output, ScoreError> {
    if matrix.is_empty() {
        return Err(ScoreError::EmptyRatings);
    }
    let mut averages = Vec::with_capacity(matrix.len());
    for scores in matrix.categories() {
        averages.push(CategoryAverage {
            category: scores.category.clone(),
            average: category_average(scores, profile.cap)?,
        });
    }
    let values = averages.iter().map(|a| a.average).collect::<Vec<_>>();
    let overall = overall_rating(&values)?;
    Ok(Stage2Output { averages, overall })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_aggregate.rs"]
mod tests;
