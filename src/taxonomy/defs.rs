use crate::taxonomy::{CategoryDef, SubjectTypeDef, Taxonomy};

#[derive(Debug, Clone, Copy)]
struct CategorySpec {
    name: &'static str,
    sub_skills: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
struct TypeSpec {
    name: &'static str,
    skillset: &'static [CategorySpec],
}

const EXECUTION: CategorySpec = CategorySpec {
    name: "Execution",
    sub_skills: &["Technique", "Consistency", "Speed"],
};
const JUDGMENT: CategorySpec = CategorySpec {
    name: "Judgment",
    sub_skills: &["Decision Making", "Positioning", "Awareness"],
};
const PHYSICAL: CategorySpec = CategorySpec {
    name: "Physical",
    sub_skills: &["Strength", "Endurance", "Agility"],
};
const MENTALITY: CategorySpec = CategorySpec {
    name: "Mentality",
    sub_skills: &["Composure", "Work Rate", "Leadership"],
};
const ATTACKING: CategorySpec = CategorySpec {
    name: "Attacking",
    sub_skills: &["Finishing", "Dribbling", "Off-Ball Movement"],
};
const DEFENDING: CategorySpec = CategorySpec {
    name: "Defending",
    sub_skills: &["Tackling", "Marking", "Interceptions"],
};

const BUILTIN_TYPES: &[TypeSpec] = &[
    TypeSpec {
        name: "Attacker",
        skillset: &[EXECUTION, JUDGMENT, PHYSICAL, MENTALITY, ATTACKING],
    },
    TypeSpec {
        name: "Defender",
        skillset: &[EXECUTION, JUDGMENT, PHYSICAL, MENTALITY, DEFENDING],
    },
];

/// Taxonomy used when no configuration file is given. Lists no named
/// subjects, so nobody gets specialty categories.
pub fn builtin_taxonomy() -> Taxonomy {
    Taxonomy {
        types: BUILTIN_TYPES
            .iter()
            .map(|spec| SubjectTypeDef {
                name: spec.name.to_string(),
                skillset: spec
                    .skillset
                    .iter()
                    .map(|c| CategoryDef {
                        name: c.name.to_string(),
                        sub_skills: c.sub_skills.iter().map(|s| s.to_string()).collect(),
                    })
                    .collect(),
                subjects: Vec::new(),
            })
            .collect(),
    }
}
