use super::*;
use crate::model::history::{CategoryHistory, OverallEntry, OverallHistory};

fn uploaded(name: Option<(&str, &str)>) -> ParsedMeta {
    ParsedMeta {
        subject_name: name.map(|(n, _)| n.to_string()),
        subject_type: name.map(|(_, t)| t.to_string()),
        categories: std::iter::once(CategoryHistory::with_values("Execution", vec![82.0]))
            .collect(),
        overall: std::iter::once(OverallEntry {
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            rating: 82.0,
        })
        .collect::<OverallHistory>(),
    }
}

#[test]
fn test_starts_unselected() {
    let state = WorkflowState::default();
    assert_eq!(state, WorkflowState::Unselected);
    assert!(state.session().is_none());
}

#[test]
fn test_start_fresh_enters_new_with_empty_prior() {
    let mut state = WorkflowState::default();
    state.start_fresh().unwrap();
    assert_eq!(state.name(), "new");
    let session = state.session().unwrap();
    assert!(!session.is_resumed());
    assert!(session.subject().is_none());
}

#[test]
fn test_upload_enters_edit_and_fixes_subject() {
    let mut state = WorkflowState::default();
    state
        .report_uploaded(uploaded(Some(("Alex", "Striker"))))
        .unwrap();
    assert_eq!(state.name(), "edit");
    let session = state.session().unwrap();
    assert!(session.is_resumed());
    assert_eq!(session.subject(), Some(&Subject::new("Alex", "Striker")));

    let err = state
        .select_subject(Subject::new("Sam", "Striker"))
        .unwrap_err();
    assert!(matches!(err, WorkflowError::SubjectLocked { .. }));
    assert_eq!(
        state.select_subject(Subject::new("Alex", "Striker")).unwrap(),
        &Subject::new("Alex", "Striker")
    );
}

#[test]
fn test_upload_without_heading_needs_selection() {
    let mut state = WorkflowState::default();
    state.report_uploaded(uploaded(None)).unwrap();
    let matrix = ScoreMatrix::new();
    assert_eq!(
        state.record_scores(matrix.clone()).unwrap_err(),
        WorkflowError::NoSubject
    );
    state
        .select_subject(Subject::new("Alex", "Striker"))
        .unwrap();
    state.record_scores(matrix).unwrap();
    let session = state.session().unwrap();
    assert!(session.scores().is_some());
    assert_eq!(
        session.prior().categories.get("Execution").unwrap().values(),
        &[82.0]
    );
}

#[test]
fn test_modes_are_terminal_until_reset() {
    let mut state = WorkflowState::default();
    state.start_fresh().unwrap();
    assert_eq!(
        state.report_uploaded(ParsedMeta::default()).unwrap_err(),
        WorkflowError::InvalidTransition {
            state: "new",
            action: "load a report"
        }
    );
    assert!(state.start_fresh().is_err());

    state.reset();
    assert_eq!(state, WorkflowState::Unselected);
    assert!(matches!(
        state.select_subject(Subject::new("Alex", "Striker")),
        Err(WorkflowError::InvalidTransition { .. })
    ));
    state
        .report_uploaded(uploaded(Some(("Alex", "Striker"))))
        .unwrap();
    assert_eq!(state.name(), "edit");
}

#[test]
fn test_reset_drops_prior_history() {
    let mut state = WorkflowState::default();
    state
        .report_uploaded(uploaded(Some(("Alex", "Striker"))))
        .unwrap();
    state.reset();
    state.start_fresh().unwrap();
    assert!(!state.session().unwrap().is_resumed());
}
