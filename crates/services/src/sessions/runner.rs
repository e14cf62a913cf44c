use tracing::debug;

use exam_core::Clock;
use exam_core::model::{
    ExamSession, QuestionKey, Section, SectionCatalog, TaskKind, TestType,
};

use super::view::SessionSnapshot;
use crate::error::AttemptError;
use crate::feedback::{FeedbackReport, FeedbackRequest, FeedbackService};

/// Metadata for one free-text task handed to the scoring service.
///
/// Assembled by the caller; the runner only joins it with the recorded
/// answer and the time actually spent in the task's section.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSubmission {
    pub key: QuestionKey,
    pub test_type: TestType,
    pub kind: TaskKind,
    pub prompt: String,
    pub target_word_count: Option<u32>,
}

/// Orchestrates attempt start, ticking, and post-task scoring.
///
/// The one-second cadence itself stays with the caller: this service
/// exposes `tick`, it does not own a timer.
#[derive(Clone)]
pub struct ExamLoopService {
    clock: Clock,
    feedback: FeedbackService,
}

impl ExamLoopService {
    #[must_use]
    pub fn new(clock: Clock, feedback: FeedbackService) -> Self {
        Self { clock, feedback }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Start a new attempt for a preset exam family.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::Session` if the fresh session refuses to
    /// start (cannot happen for a session this method just built).
    pub fn start_attempt(&self, test_type: TestType) -> Result<ExamSession, AttemptError> {
        let mut session = ExamSession::new(test_type.catalog());
        session.start(self.clock.now())?;
        debug!(%test_type, attempt = %session.attempt_id(), "attempt started");
        Ok(session)
    }

    /// Start a new attempt over a caller-supplied section list.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::Catalog` if the list is empty or contains
    /// duplicate section ids.
    pub fn start_attempt_with_sections(
        &self,
        sections: Vec<Section>,
    ) -> Result<ExamSession, AttemptError> {
        let catalog = SectionCatalog::new(sections)?;
        let mut session = ExamSession::new(catalog);
        session.start(self.clock.now())?;
        debug!(attempt = %session.attempt_id(), "custom attempt started");
        Ok(session)
    }

    /// Feed one second into the session and report the resulting state.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::Session` if the session is not running.
    pub fn tick(&self, session: &mut ExamSession) -> Result<SessionSnapshot, AttemptError> {
        session.tick(self.clock.now())?;
        Ok(SessionSnapshot::from_session(session))
    }

    /// Explicitly submit the attempt, completing it if still running.
    #[must_use]
    pub fn submit(&self, session: &mut ExamSession) -> SessionSnapshot {
        session.complete(self.clock.now());
        SessionSnapshot::from_session(session)
    }

    /// Send one free-text task to the scoring service.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::MissingAnswer` if no answer was recorded for
    /// the task's question, and `AttemptError::Feedback` for scoring
    /// service failures.
    pub async fn submit_task(
        &self,
        session: &ExamSession,
        task: &TaskSubmission,
    ) -> Result<FeedbackReport, AttemptError> {
        let request = build_request(session, task)?;
        let report = self.feedback.score(&request).await?;
        Ok(report)
    }
}

fn build_request(
    session: &ExamSession,
    task: &TaskSubmission,
) -> Result<FeedbackRequest, AttemptError> {
    let response = session
        .answers()
        .get(&task.key)
        .ok_or_else(|| AttemptError::MissingAnswer {
            key: task.key.clone(),
        })?
        .to_owned();

    let time_spent_seconds = session
        .catalog()
        .index_of(task.key.section_id())
        .and_then(|index| session.section_elapsed_secs(index))
        .unwrap_or(0);

    Ok(FeedbackRequest {
        response,
        test_type: task.test_type,
        task_type: task.kind,
        prompt: task.prompt.clone(),
        target_word_count: task.target_word_count,
        time_spent_seconds,
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
