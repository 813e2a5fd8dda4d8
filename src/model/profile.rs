use clap::ValueEnum;

/// Ceiling applied to each sub-skill score before averaging when capping is on.
pub const SUB_SCORE_CAP: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringProfile {
    pub min_score: u32,
    pub max_score: u32,
    pub default_score: u32,
    pub cap: CapPolicy,
    pub display_scale: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapPolicy {
    Uncapped,
    CapAt(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScoreScale {
    #[value(name = "120")]
    Legacy120,
    #[value(name = "100")]
    Standard100,
}

impl CapPolicy {
    pub fn apply(self, score: f64) -> f64 {
        match self {
            CapPolicy::Uncapped => score,
            CapPolicy::CapAt(limit) => score.min(f64::from(limit)),
        }
    }
}

impl ScoringProfile {
    /// Sliders run 1–120 and averages are reported out of 120.
    pub fn legacy_v1() -> Self {
        Self {
            min_score: 1,
            max_score: 120,
            default_score: 100,
            cap: CapPolicy::Uncapped,
            display_scale: 120,
        }
    }

    pub fn standard_v2() -> Self {
        Self {
            min_score: 1,
            max_score: 100,
            default_score: 100,
            cap: CapPolicy::CapAt(SUB_SCORE_CAP),
            display_scale: 100,
        }
    }

    pub fn for_scale(scale: ScoreScale) -> Self {
        match scale {
            ScoreScale::Legacy120 => Self::legacy_v1(),
            ScoreScale::Standard100 => Self::standard_v2(),
        }
    }

    pub fn with_cap(mut self, capped: bool) -> Self {
        self.cap = if capped {
            CapPolicy::CapAt(SUB_SCORE_CAP)
        } else {
            CapPolicy::Uncapped
        };
        self
    }

    pub fn contains(&self, score: u32) -> bool {
        (self.min_score..=self.max_score).contains(&score)
    }

    pub fn clamp(&self, score: u32) -> u32 {
        score.clamp(self.min_score, self.max_score)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/profile.rs"]
mod tests;
