use super::*;
use crate::taxonomy::defs::builtin_taxonomy;
use crate::taxonomy::loader::parse_taxonomy;

const SAMPLE: &str = r#"{
  "Striker": {
    "Skillset": {
      "Shooting": ["Power", "Accuracy"],
      "Passing": ["Short", "Long"]
    },
    "Players": {
      "Alex": { "Specialty": { "Heading": ["Timing", "Jump"] } },
      "Sam": null,
      "Jo": { "Specialty": { "Passing": ["Short", "Long"] } }
    }
  },
  "Keeper": {
    "Skillset": { "Handling": ["Catching", "Parrying"] }
  }
}"#;

fn names(categories: &[&CategoryDef]) -> Vec<String> {
    categories.iter().map(|c| c.name.clone()).collect()
}

#[test]
fn test_parse_keeps_file_order() {
    let taxonomy = parse_taxonomy(SAMPLE).unwrap();
    let types = taxonomy
        .types
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(types, vec!["Striker", "Keeper"]);
    let striker = taxonomy.subject_type("Striker").unwrap();
    assert_eq!(striker.skillset[0].name, "Shooting");
    assert_eq!(striker.skillset[1].sub_skills, vec!["Short", "Long"]);
    assert_eq!(striker.subjects.len(), 3);
    assert!(taxonomy.subject_type("Keeper").unwrap().subjects.is_empty());
}

#[test]
fn test_specialty_follows_skillset() {
    let taxonomy = parse_taxonomy(SAMPLE).unwrap();
    let categories = taxonomy
        .categories_for(&Subject::new("Alex", "Striker"))
        .unwrap();
    assert_eq!(names(&categories), vec!["Shooting", "Passing", "Heading"]);
}

#[test]
fn test_specialty_duplicate_of_skillset_is_skipped() {
    let taxonomy = parse_taxonomy(SAMPLE).unwrap();
    let categories = taxonomy.categories_for(&Subject::new("Jo", "Striker")).unwrap();
    assert_eq!(names(&categories), vec!["Shooting", "Passing"]);
}

#[test]
fn test_unlisted_subject_gets_skillset_only() {
    let taxonomy = parse_taxonomy(SAMPLE).unwrap();
    let categories = taxonomy
        .categories_for(&Subject::new("Nobody", "Striker"))
        .unwrap();
    assert_eq!(names(&categories), vec!["Shooting", "Passing"]);
}

#[test]
fn test_unknown_type_lists_known_types() {
    let taxonomy = parse_taxonomy(SAMPLE).unwrap();
    let err = taxonomy
        .categories_for(&Subject::new("Alex", "Goalie"))
        .unwrap_err();
    match err {
        TaxonomyError::UnknownType { requested, known } => {
            assert_eq!(requested, "Goalie");
            assert_eq!(known, "Striker, Keeper");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_skillset_is_malformed() {
    let err = parse_taxonomy(r#"{ "Striker": { "Skillset": {} } }"#).unwrap_err();
    assert!(matches!(err, TaxonomyError::Malformed(_)));
}

#[test]
fn test_category_without_sub_skills_is_malformed() {
    let err = parse_taxonomy(r#"{ "Striker": { "Skillset": { "Shooting": [] } } }"#).unwrap_err();
    assert!(matches!(err, TaxonomyError::Malformed(_)));
}

#[test]
fn test_missing_skillset_is_json_error() {
    let err = parse_taxonomy(r#"{ "Striker": { "Players": {} } }"#).unwrap_err();
    assert!(matches!(err, TaxonomyError::Json(_)));
}

#[test]
fn test_builtin_taxonomy_types() {
    let taxonomy = builtin_taxonomy();
    let attacker = taxonomy.subject_type("Attacker").unwrap();
    assert_eq!(attacker.skillset.len(), 5);
    assert_eq!(attacker.skillset[0].name, "Execution");
    assert_eq!(attacker.skillset[4].name, "Attacking");
    let defender = taxonomy.subject_type("Defender").unwrap();
    assert_eq!(defender.skillset[4].name, "Defending");
    for category in &defender.skillset {
        assert_eq!(category.sub_skills.len(), 3);
    }
}

#[test]
fn test_names_that_break_report_lines_are_rejected() {
    let cases = [
        r#"{ "Striker": { "Skillset": { "Set Pieces: Corners": ["Near Post"] } } }"#,
        r#"{ "Striker": { "Skillset": { "Speed ": ["Pace"] } } }"#,
        r#"{ "Striker": { "Skillset": { "": ["Pace"] } } }"#,
        r#"{ "Striker": { "Skillset": { "Two\nLines": ["Pace"] } } }"#,
        r#"{ "Striker": { "Skillset": { "Speed": ["• Burst: 1"] } } }"#,
        r#"{ "Striker – Wide": { "Skillset": { "Speed": ["Pace"] } } }"#,
        r#"{ "Striker": { "Skillset": { "Speed": ["Pace"] }, "Players": { "Jean – Luc": null } } }"#,
        r#"{ "Striker": { "Skillset": { "Speed": ["Pace"] }, "Players": { "Alex": { "Specialty": { "Heading: Far": ["Jump"] } } } } }"#,
    ];
    for json in cases {
        let err = parse_taxonomy(json).unwrap_err();
        assert!(matches!(err, TaxonomyError::Malformed(_)), "{json}: {err}");
    }
}

#[test]
fn test_builtin_names_fit_report_lines() {
    for subject_type in builtin_taxonomy().types {
        crate::report::check_subject_part(&subject_type.name).unwrap();
        for category in &subject_type.skillset {
            crate::report::check_category_name(&category.name).unwrap();
            for sub_skill in &category.sub_skills {
                crate::report::check_sub_skill_name(sub_skill).unwrap();
            }
        }
    }
}
