use crate::model::history::ChartArtifact;
use crate::model::profile::ScoringProfile;
use crate::model::scores::ScoreMatrix;
use crate::pipeline::stage2_aggregate::CategoryAverage;
use crate::report::format_one_decimal;

const BAR_WIDTH: usize = 30;
const SUB_SKILL_FILL: char = '#';
const AVERAGE_FILL: char = '=';
const EMPTY_FILL: char = '.';
const AVERAGE_LABEL: &str = "Category Avg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub show_sub_skills: bool,
    pub show_averages: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            show_sub_skills: true,
            show_averages: true,
        }
    }
}

/// Monospace barograph: per category, one bar per sub-skill and one for the
/// category average, scaled to the profile's maximum score.
pub fn render_barograph(
    matrix: &ScoreMatrix,
    averages: &[CategoryAverage],
    profile: &ScoringProfile,
    options: ChartOptions,
) -> ChartArtifact {
    let mut lines = Vec::new();
    lines.push(format!(
        "Skill Barograph (score {}-{})",
        profile.min_score, profile.max_score
    ));

    let label_width = matrix
        .categories()
        .iter()
        .flat_map(|c| c.scores.iter().map(|s| s.sub_skill.chars().count()))
        .chain(std::iter::once(AVERAGE_LABEL.len()))
        .max()
        .unwrap_or(AVERAGE_LABEL.len());

    for category in matrix.categories() {
        if !options.show_sub_skills && !options.show_averages {
            break;
        }
        lines.push(format!("[{}]", category.category));
        if options.show_sub_skills {
            for score in &category.scores {
                let value = f64::from(score.score);
                lines.push(bar_line(
                    &score.sub_skill,
                    label_width,
                    value,
                    profile.max_score,
                    SUB_SKILL_FILL,
                    &score.score.to_string(),
                ));
            }
        }
        if options.show_averages {
            if let Some(avg) = averages.iter().find(|a| a.category == category.category) {
                lines.push(bar_line(
                    AVERAGE_LABEL,
                    label_width,
                    avg.average,
                    profile.max_score,
                    AVERAGE_FILL,
                    &format_one_decimal(avg.average),
                ));
            }
        }
    }

    ChartArtifact { lines }
}

fn bar_line(
    label: &str,
    label_width: usize,
    value: f64,
    max_score: u32,
    fill: char,
    shown: &str,
) -> String {
    let filled = bar_cells(value, max_score);
    let mut bar = String::with_capacity(BAR_WIDTH);
    bar.extend(std::iter::repeat_n(fill, filled));
    bar.extend(std::iter::repeat_n(EMPTY_FILL, BAR_WIDTH - filled));
    let pad = label_width.saturating_sub(label.chars().count());
    format!("  {label}{} |{bar}| {shown}", " ".repeat(pad))
}

fn bar_cells(value: f64, max_score: u32) -> usize {
    if max_score == 0 || value <= 0.0 {
        return 0;
    }
    let ratio = (value / f64::from(max_score)).min(1.0);
    (ratio * BAR_WIDTH as f64).round() as usize
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/chart.rs"]
mod tests;
