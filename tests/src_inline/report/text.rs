use chrono::NaiveDate;

use super::*;
use crate::model::history::{
    CategoryHistory, ChartArtifact, OverallEntry, OverallHistory, Subject,
};
use crate::document::{Document, DocumentFormat};
use crate::model::profile::ScoringProfile;
use crate::model::scores::{CategoryScores, ScoreMatrix};
use crate::pipeline::stage1_parse::parse_report;
use crate::pipeline::stage2_aggregate::run_stage2;
use crate::report::chart::{ChartOptions, render_barograph};
use crate::report::{check_category_name, check_subject};

fn record() -> ReportRecord {
    let date = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();
    ReportRecord {
        subject: Subject::new("Alex", "Striker"),
        generated_at: date.and_hms_opt(9, 30, 0).unwrap(),
        categories: vec![
            CategoryHistory::with_values("Shooting", vec![80.0, 90.0]),
            CategoryHistory::with_values("Passing", vec![70.0, 75.0]),
        ]
        .into_iter()
        .collect(),
        overall: vec![
            OverallEntry {
                date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                rating: 75.0,
            },
            OverallEntry {
                date,
                rating: 82.5,
            },
        ]
        .into_iter()
        .collect::<OverallHistory>(),
        chart: ChartArtifact {
            lines: vec!["Skill Barograph (score 1-120)".to_string()],
        },
    }
}

#[test]
fn test_report_layout() {
    let doc = render_report(&record(), 120);
    let lines = doc.lines().collect::<Vec<_>>();
    assert_eq!(
        lines,
        vec![
            "Alex – Striker Stats Report",
            "Report Generated: 2024-01-17 09:30:00",
            "Skill Barograph (score 1-120)",
            "",
            "• Shooting: 80.0; 90.0",
            "• Passing: 70.0; 75.0",
            "",
            "Overall Rating: 82.5 / 120",
            "--------------------------------------",
            "Overall Ratings by Date:",
            "2024-01-10: 75.0",
            "2024-01-17: 82.5",
        ]
    );
}

#[test]
fn test_rendered_report_parses_back() {
    let record = record();
    let doc = render_report(&record, 120);
    let parsed = parse_report(doc.lines());
    assert_eq!(parsed.subject(), Some(record.subject.clone()));
    assert_eq!(parsed.categories, record.categories);
    assert_eq!(parsed.overall, record.overall);
}

#[test]
fn test_styles_follow_line_roles() {
    let doc = render_report(&record(), 100);
    let paragraphs = doc.paragraphs();
    assert_eq!(paragraphs[0].style, ParagraphStyle::Heading);
    assert_eq!(paragraphs[2].style, ParagraphStyle::Chart);
    assert_eq!(paragraphs[4].style, ParagraphStyle::Bullet);
    assert_eq!(paragraphs[7].style, ParagraphStyle::Emphasis);
    assert_eq!(paragraphs[7].text, "Overall Rating: 82.5 / 100");
}

struct RoundTripCase {
    subject: Subject,
    categories: Vec<(&'static str, Vec<f64>)>,
    overall: Vec<(&'static str, f64)>,
}

fn round_trip_cases() -> Vec<RoundTripCase> {
    vec![
        RoundTripCase {
            subject: Subject::new("Alex", "Striker"),
            categories: vec![("Execution", vec![82.0])],
            overall: vec![("2024-01-10", 82.0)],
        },
        RoundTripCase {
            subject: Subject::new("Jean-Luc O'Neil (Jr.)", "Wing-Back"),
            categories: vec![
                ("Off-Ball Movement", (1..=25).map(|i| f64::from(i * 48) / 10.0).collect()),
                ("Set Pieces (Corners)", vec![0.0, 120.0, 0.0]),
                ("Défense – Zonale", vec![55.5, 60.1]),
            ],
            overall: vec![
                ("2024-01-10", 0.0),
                ("2024-01-10", 120.0),
                ("2024-01-17", 77.7),
            ],
        },
        RoundTripCase {
            subject: Subject::new("Zoë Ångström", "Milieu Défensif"),
            categories: vec![("Jeu; long", vec![99.9]), ("步法", vec![101.3, 118.4])],
            overall: vec![("2023-12-31", 101.3)],
        },
    ]
}

fn chart_for(case: &RoundTripCase) -> ChartArtifact {
    let matrix = case
        .categories
        .iter()
        .map(|(name, _)| {
            let mut scores = CategoryScores::new(*name);
            scores.push("Ü-Turn (Left)", 120);
            scores.push("Off-Ball - 2nd", 1);
            scores
        })
        .collect::<ScoreMatrix>();
    let profile = ScoringProfile::legacy_v1();
    let averages = run_stage2(&matrix, &profile).unwrap().averages;
    render_barograph(&matrix, &averages, &profile, ChartOptions::default())
}

#[test]
fn test_round_trip_through_docx_and_text() {
    for case in round_trip_cases() {
        check_subject(&case.subject).unwrap();
        let record = ReportRecord {
            subject: case.subject.clone(),
            generated_at: NaiveDate::from_ymd_opt(2024, 1, 17)
                .unwrap()
                .and_hms_opt(18, 5, 59)
                .unwrap(),
            categories: case
                .categories
                .iter()
                .map(|(name, values)| {
                    check_category_name(name).unwrap();
                    CategoryHistory::with_values(*name, values.clone())
                })
                .collect(),
            overall: case
                .overall
                .iter()
                .map(|(date, rating)| OverallEntry {
                    date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                    rating: *rating,
                })
                .collect(),
            chart: chart_for(&case),
        };

        for format in [DocumentFormat::Docx, DocumentFormat::Text] {
            let bytes = render_report(&record, 120).to_bytes(format).unwrap();
            let (doc, detected) = Document::from_bytes(&bytes).unwrap();
            assert_eq!(detected, format);
            let parsed = parse_report(doc.lines());
            assert_eq!(parsed.subject(), Some(record.subject.clone()), "{format:?}");
            assert_eq!(parsed.categories, record.categories, "{format:?}");
            assert_eq!(parsed.overall, record.overall, "{format:?}");
        }
    }
}

#[test]
fn test_names_the_grammar_cannot_carry_are_refused() {
    for category in ["Set Pieces: Corners", "Speed ", " Speed", "", "Two\nLines"] {
        assert!(check_category_name(category).is_err(), "{category:?}");
    }
    for (name, subject_type) in [
        ("Jean – Luc", "Striker"),
        ("Alex", "Striker – Wide"),
        ("Alex", "Striker Stats Report"),
        ("Alex\nMorgan", "Striker"),
        (" Alex", "Striker"),
        ("• Alex: 1", "Striker"),
        ("Overall Rating: Alex", "Striker"),
    ] {
        assert!(
            check_subject(&Subject::new(name, subject_type)).is_err(),
            "{name:?} / {subject_type:?}"
        );
    }
}
