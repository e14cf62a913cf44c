#![forbid(unsafe_code)]

pub mod error;
pub mod feedback;
pub mod sessions;

pub use exam_core::Clock;

pub use error::{AttemptError, FeedbackError};
pub use feedback::{
    CriterionScore, FeedbackConfig, FeedbackReport, FeedbackRequest, FeedbackService,
};
pub use sessions::{ExamLoopService, SessionSnapshot, TaskSubmission};
