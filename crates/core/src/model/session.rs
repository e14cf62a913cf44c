use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::answers::AnswerSheet;
use crate::model::ids::{AttemptId, QuestionKey};
use crate::model::section::{Section, SectionCatalog};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("`{op}` is not allowed while the session is {status}")]
    InvalidState {
        op: &'static str,
        status: SessionStatus,
    },

    #[error("question {requested} is out of range (section has {max} questions)")]
    QuestionOutOfRange { requested: u32, max: u32 },
}

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Lifecycle state of an exam session. Transitions are monotonic:
/// `NotStarted → Running → Completed`, never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    NotStarted,
    Running,
    Completed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionStatus::NotStarted => "not started",
            SessionStatus::Running => "running",
            SessionStatus::Completed => "completed",
        };
        write!(f, "{name}")
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One timed, multi-section exam attempt.
///
/// The session owns timing and navigation state and is driven by an
/// external one-second cadence calling [`ExamSession::tick`]; it spawns no
/// timers and holds no I/O handles. Sections are strictly forward-only:
/// no operation returns to a prior section.
///
/// Timestamps (`now`) are supplied by the caller's clock so the session
/// stays deterministic under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamSession {
    attempt_id: AttemptId,
    catalog: SectionCatalog,
    status: SessionStatus,
    current_section: usize,
    current_question: u32,
    total_remaining_secs: u32,
    section_remaining_secs: u32,
    section_elapsed_secs: Vec<u32>,
    answers: AnswerSheet,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl ExamSession {
    /// Creates a new session over the given catalog, in `NotStarted`.
    ///
    /// Total remaining time is the sum of all section durations. The
    /// per-section countdown only starts ticking after [`ExamSession::start`].
    #[must_use]
    pub fn new(catalog: SectionCatalog) -> Self {
        let total = catalog.total_duration_secs();
        let sections = catalog.len();
        Self {
            attempt_id: AttemptId::new_random(),
            catalog,
            status: SessionStatus::NotStarted,
            current_section: 0,
            current_question: 1,
            total_remaining_secs: total,
            section_remaining_secs: 0,
            section_elapsed_secs: vec![0; sections],
            answers: AnswerSheet::new(),
            started_at: None,
            completed_at: None,
        }
    }

    // Accessors
    #[must_use]
    pub fn attempt_id(&self) -> AttemptId {
        self.attempt_id
    }

    #[must_use]
    pub fn catalog(&self) -> &SectionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    #[must_use]
    pub fn current_section_index(&self) -> usize {
        self.current_section
    }

    /// The section the learner is currently in.
    #[must_use]
    pub fn current_section(&self) -> &Section {
        // current_section is always a valid catalog index.
        &self.catalog.sections()[self.current_section]
    }

    /// 1-based number of the question the learner is looking at.
    #[must_use]
    pub fn current_question(&self) -> u32 {
        self.current_question
    }

    #[must_use]
    pub fn total_remaining_secs(&self) -> u32 {
        self.total_remaining_secs
    }

    #[must_use]
    pub fn section_remaining_secs(&self) -> u32 {
        self.section_remaining_secs
    }

    /// Seconds actually spent in the given section so far.
    ///
    /// This reflects ticks received, so a section skipped early via
    /// `advance_section` reports less than its full duration.
    #[must_use]
    pub fn section_elapsed_secs(&self, index: usize) -> Option<u32> {
        self.section_elapsed_secs.get(index).copied()
    }

    /// Total seconds elapsed across the whole attempt.
    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.catalog
            .total_duration_secs()
            .saturating_sub(self.total_remaining_secs)
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Distinct answered questions in the current or any prior section.
    ///
    /// Answers recorded ahead of the current section are excluded until
    /// the session reaches that section.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers
            .iter()
            .filter(|(key, _)| {
                self.catalog
                    .index_of(key.section_id())
                    .is_some_and(|index| index <= self.current_section)
            })
            .count()
    }

    // Operations

    /// Begin the attempt.
    ///
    /// Arms the first section's countdown and moves to `Running`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session is
    /// `NotStarted`.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.status != SessionStatus::NotStarted {
            return Err(SessionError::InvalidState {
                op: "start",
                status: self.status,
            });
        }
        self.status = SessionStatus::Running;
        self.section_remaining_secs = self.current_section().duration_secs();
        self.started_at = Some(now);
        Ok(())
    }

    /// Advance time by one second.
    ///
    /// Decrements both countdowns (floored at zero). Total-time exhaustion
    /// completes the attempt and takes precedence over section exhaustion
    /// in the same tick; section exhaustion alone advances to the next
    /// section.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session is `Running`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.status != SessionStatus::Running {
            return Err(SessionError::InvalidState {
                op: "tick",
                status: self.status,
            });
        }

        self.total_remaining_secs = self.total_remaining_secs.saturating_sub(1);
        self.section_remaining_secs = self.section_remaining_secs.saturating_sub(1);
        if let Some(elapsed) = self.section_elapsed_secs.get_mut(self.current_section) {
            *elapsed = elapsed.saturating_add(1);
        }

        if self.total_remaining_secs == 0 {
            self.complete(now);
            return Ok(());
        }
        if self.section_remaining_secs == 0 {
            self.advance_to_next(now);
        }
        Ok(())
    }

    /// Move to the next section, or complete the attempt from the last one.
    ///
    /// Resets the question pointer to 1 and arms the new section's
    /// countdown. There is no way back to a prior section.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session is `Running`.
    pub fn advance_section(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.status != SessionStatus::Running {
            return Err(SessionError::InvalidState {
                op: "advance_section",
                status: self.status,
            });
        }
        self.advance_to_next(now);
        Ok(())
    }

    /// Jump to question `n` within the current section.
    ///
    /// This is the only navigation primitive; it never changes the section.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session is `Running`,
    /// and `SessionError::QuestionOutOfRange` if `n` is not in
    /// `1..=question_count`.
    pub fn go_to_question(&mut self, n: u32) -> Result<(), SessionError> {
        if self.status != SessionStatus::Running {
            return Err(SessionError::InvalidState {
                op: "go_to_question",
                status: self.status,
            });
        }
        let max = self.current_section().question_count();
        if n == 0 || n > max {
            return Err(SessionError::QuestionOutOfRange { requested: n, max });
        }
        self.current_question = n;
        Ok(())
    }

    /// Upsert the learner's answer for a question.
    ///
    /// Any key is accepted, not just the current question, so a navigation
    /// grid can answer out of order. The value is opaque to the session;
    /// format-specific validation (word counts etc.) belongs to the caller.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session is `Running`.
    pub fn record_answer(
        &mut self,
        key: QuestionKey,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        if self.status != SessionStatus::Running {
            return Err(SessionError::InvalidState {
                op: "record_answer",
                status: self.status,
            });
        }
        self.answers.record(key, value);
        Ok(())
    }

    /// Finish the attempt and freeze all state.
    ///
    /// Idempotent; repeated calls are no-ops and keep the first completion
    /// timestamp.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        if self.status == SessionStatus::Completed {
            return;
        }
        self.status = SessionStatus::Completed;
        self.completed_at = Some(now);
    }

    fn advance_to_next(&mut self, now: DateTime<Utc>) {
        let next = self.current_section + 1;
        if next >= self.catalog.len() {
            // "Next section" on the last section is equivalent to submit.
            self.complete(now);
            return;
        }
        self.current_section = next;
        self.current_question = 1;
        self.section_remaining_secs = self.current_section().duration_secs();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
