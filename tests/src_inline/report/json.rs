use chrono::NaiveDate;
use serde_json::Value;

use super::*;
use crate::model::history::{CategoryHistory, ChartArtifact, OverallHistory};

#[test]
fn test_summary_json_fields() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();
    let record = ReportRecord {
        subject: Subject::new("Alex", "Striker"),
        generated_at: date.and_hms_opt(8, 0, 0).unwrap(),
        categories: std::iter::once(CategoryHistory::with_values("Shooting", vec![80.0, 90.0]))
            .collect(),
        overall: std::iter::once(OverallEntry { date, rating: 90.0 }).collect::<OverallHistory>(),
        chart: ChartArtifact::default(),
    };
    let json: Value = serde_json::from_str(&render_summary_json(&record, 120).unwrap()).unwrap();
    assert_eq!(json["tool"], "skill-barograph");
    assert_eq!(json["subject"]["name"], "Alex");
    assert_eq!(json["subject"]["subject_type"], "Striker");
    assert_eq!(json["generated_at"], "2024-01-17 08:00:00");
    assert_eq!(json["display_scale"], 120);
    assert_eq!(json["current_overall"], 90.0);
    assert_eq!(json["categories"][0]["category"], "Shooting");
    assert_eq!(json["categories"][0]["latest"], 90.0);
    assert_eq!(json["categories"][0]["evaluations"], 2);
    assert_eq!(json["overall_history"][0]["date"], "2024-01-17");
}

#[test]
fn test_parsed_json_without_heading() {
    let json: Value = serde_json::from_str(&render_parsed_json(&ParsedMeta::default()).unwrap()).unwrap();
    assert!(json["subject_name"].is_null());
    assert_eq!(json["categories"], Value::Array(Vec::new()));
    assert_eq!(json["overall"], Value::Array(Vec::new()));
}
