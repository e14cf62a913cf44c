use exam_core::model::{AnswerSheet, ExamSession, SectionId, SessionStatus};

/// Presentation-agnostic read-only snapshot of a session.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no localization assumptions
///
/// The UI may render countdowns (mm:ss, progress bars) as needed. Taken
/// after every tick or mutating call, it is the session's whole output
/// contract towards the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub section_index: usize,
    pub section_id: SectionId,
    pub section_title: String,
    pub question_count: u32,
    pub current_question: u32,
    pub total_remaining_secs: u32,
    pub section_remaining_secs: u32,
    pub answered: usize,
    pub answers: AnswerSheet,
}

impl SessionSnapshot {
    #[must_use]
    pub fn from_session(session: &ExamSession) -> Self {
        let section = session.current_section();
        Self {
            status: session.status(),
            section_index: session.current_section_index(),
            section_id: section.id().clone(),
            section_title: section.title().to_owned(),
            question_count: section.question_count(),
            current_question: session.current_question(),
            total_remaining_secs: session.total_remaining_secs(),
            section_remaining_secs: session.section_remaining_secs(),
            answered: session.answered_count(),
            answers: session.answers().clone(),
        }
    }
}
