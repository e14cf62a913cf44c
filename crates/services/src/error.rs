//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::{CatalogError, QuestionKey, SessionError};

/// Errors emitted by `FeedbackService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FeedbackError {
    #[error("feedback scoring is not configured")]
    Disabled,
    #[error("feedback service returned an empty report")]
    EmptyResponse,
    #[error("feedback request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by the attempt runner.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("no answer recorded for task {key}")]
    MissingAnswer { key: QuestionKey },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Feedback(#[from] FeedbackError),
}
