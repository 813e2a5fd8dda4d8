#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubSkillScore {
    pub sub_skill: String,
    pub score: u32,
}

/// Scores for one category, in taxonomy order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScores {
    pub category: String,
    pub scores: Vec<SubSkillScore>,
}

impl CategoryScores {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            scores: Vec::new(),
        }
    }

    pub fn push(&mut self, sub_skill: impl Into<String>, score: u32) {
        self.scores.push(SubSkillScore {
            sub_skill: sub_skill.into(),
            score,
        });
    }

    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.scores.iter().map(|s| s.score)
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// One evaluation session's scores. Only its reductions are ever persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreMatrix {
    categories: Vec<CategoryScores>,
}

impl ScoreMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, category: CategoryScores) {
        self.categories.push(category);
    }

    pub fn categories(&self) -> &[CategoryScores] {
        &self.categories
    }

    #[cfg(test)]
    pub fn get(&self, category: &str) -> Option<&CategoryScores> {
        self.categories.iter().find(|c| c.category == category)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl FromIterator<CategoryScores> for ScoreMatrix {
    fn from_iter<T: IntoIterator<Item = CategoryScores>>(iter: T) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}
