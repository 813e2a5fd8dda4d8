use std::path::PathBuf;

use thiserror::Error;

use crate::document::DocumentError;
use crate::input::InputError;
use crate::pipeline::stage2_aggregate::ScoreError;
use crate::pipeline::stage4_report::ReportWriteError;
use crate::taxonomy::TaxonomyError;
use crate::workflow::WorkflowError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error("unreadable report: {0}")]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Write(#[from] ReportWriteError),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
}
