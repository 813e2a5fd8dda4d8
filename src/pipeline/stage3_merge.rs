use chrono::NaiveDate;
use tracing::debug;

use crate::model::history::{CategoryHistories, CategoryHistory, OverallEntry, OverallHistory};
use crate::model::profile::ScoringProfile;
use crate::model::scores::ScoreMatrix;
use crate::pipeline::stage2_aggregate::{ScoreError, Stage2Output, run_stage2};
use crate::report::round_one_decimal;

#[derive(Debug, Clone)]
pub struct Stage3Inputs<'a> {
    pub prior_categories: &'a CategoryHistories,
    pub prior_overall: &'a OverallHistory,
    pub matrix: &'a ScoreMatrix,
    pub profile: &'a ScoringProfile,
    pub today: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stage3Output {
    pub categories: CategoryHistories,
    pub overall: OverallHistory,
    pub evaluation: Stage2Output,
}

/// Appends the current evaluation to a detached copy of the prior history.
///
/// Categories scored now come first, in matrix order; categories only found
/// in the prior history follow in their previous order, unextended.
pub fn run_stage3(inputs: &Stage3Inputs<'_>) -> Result<Stage3Output, ScoreError> {
    let evaluation = run_stage2(inputs.matrix, inputs.profile)?;

    let mut carried = inputs
        .prior_categories
        .iter()
        .cloned()
        .collect::<Vec<_>>();
    let mut merged = Vec::with_capacity(carried.len() + evaluation.averages.len());

    for avg in &evaluation.averages {
        let mut history = match carried.iter().position(|h| h.category() == avg.category) {
            Some(idx) => carried.remove(idx),
            None => CategoryHistory::new(avg.category.clone()),
        };
        history.push(round_one_decimal(avg.average));
        merged.push(history);
    }
    if !carried.is_empty() {
        debug!(
            categories = carried.len(),
            "categories not scored this time keep their history"
        );
    }
    merged.extend(carried);

    let mut overall = inputs.prior_overall.clone();
    overall.push(OverallEntry {
        date: inputs.today,
        rating: evaluation.overall,
    });

    Ok(Stage3Output {
        categories: merged.into_iter().collect(),
        overall,
        evaluation,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_merge.rs"]
mod tests;
