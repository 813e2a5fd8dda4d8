use thiserror::Error;
use tracing::info;

use crate::model::history::{ParsedMeta, Subject};
use crate::model::scores::ScoreMatrix;

/// Session mode. `New` and `Edit` are terminal until `reset`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WorkflowState {
    #[default]
    Unselected,
    New(Session),
    Edit(Session),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    prior: ParsedMeta,
    subject: Option<Subject>,
    scores: Option<ScoreMatrix>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("cannot {action} while the workflow is {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
    #[error("this session is fixed to {current}; cannot switch to {requested}")]
    SubjectLocked { current: Subject, requested: Subject },
    #[error("no subject selected: the report has no heading, so name and type must be given")]
    NoSubject,
    #[error("no scores recorded for this session")]
    NoScores,
}

impl Session {
    fn new(prior: ParsedMeta) -> Self {
        let subject = prior.subject();
        Self {
            prior,
            subject,
            scores: None,
        }
    }

    pub fn prior(&self) -> &ParsedMeta {
        &self.prior
    }

    pub fn subject(&self) -> Option<&Subject> {
        self.subject.as_ref()
    }

    pub fn scores(&self) -> Option<&ScoreMatrix> {
        self.scores.as_ref()
    }

    /// False when an uploaded report carried no history; such a session
    /// behaves exactly like a fresh one.
    pub fn is_resumed(&self) -> bool {
        self.prior.has_history()
    }
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Unselected => "unselected",
            WorkflowState::New(_) => "new",
            WorkflowState::Edit(_) => "edit",
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            WorkflowState::Unselected => None,
            WorkflowState::New(session) | WorkflowState::Edit(session) => Some(session),
        }
    }

    pub fn start_fresh(&mut self) -> Result<(), WorkflowError> {
        self.require_unselected("start fresh")?;
        *self = WorkflowState::New(Session::new(ParsedMeta::default()));
        info!("starting a new evaluation");
        Ok(())
    }

    /// Enters `Edit`. A heading in `parsed` fixes the subject for the session.
    pub fn report_uploaded(&mut self, parsed: ParsedMeta) -> Result<(), WorkflowError> {
        self.require_unselected("load a report")?;
        let session = Session::new(parsed);
        let subject = session
            .subject
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "<no heading>".to_string());
        info!(
            subject = %subject,
            categories = session.prior.categories.len(),
            evaluations = session.prior.overall.len(),
            "resuming from uploaded report"
        );
        *self = WorkflowState::Edit(session);
        Ok(())
    }

    /// Drops any held report history and scores.
    pub fn reset(&mut self) {
        *self = WorkflowState::Unselected;
    }

    /// The first selection sticks; later ones must agree with it.
    pub fn select_subject(&mut self, requested: Subject) -> Result<&Subject, WorkflowError> {
        let session = self.session_mut("select a subject")?;
        if let Some(current) = &session.subject {
            if *current != requested {
                return Err(WorkflowError::SubjectLocked {
                    current: current.clone(),
                    requested,
                });
            }
        }
        Ok(&*session.subject.get_or_insert(requested))
    }

    pub fn record_scores(&mut self, matrix: ScoreMatrix) -> Result<(), WorkflowError> {
        let session = self.session_mut("record scores")?;
        if session.subject.is_none() {
            return Err(WorkflowError::NoSubject);
        }
        session.scores = Some(matrix);
        Ok(())
    }

    fn require_unselected(&self, action: &'static str) -> Result<(), WorkflowError> {
        match self {
            WorkflowState::Unselected => Ok(()),
            other => Err(WorkflowError::InvalidTransition {
                state: other.name(),
                action,
            }),
        }
    }

    fn session_mut(&mut self, action: &'static str) -> Result<&mut Session, WorkflowError> {
        match self {
            WorkflowState::Unselected => Err(WorkflowError::InvalidTransition {
                state: "unselected",
                action,
            }),
            WorkflowState::New(session) | WorkflowState::Edit(session) => Ok(session),
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/workflow.rs"]
mod tests;
