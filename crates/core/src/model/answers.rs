use std::collections::HashMap;

use crate::model::ids::{QuestionKey, SectionId};

/// Mutable store of learner-submitted answers keyed by section and
/// question number.
///
/// Entries are created or overwritten through `record` only and are never
/// removed while a session is live; the latest write for a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    entries: HashMap<QuestionKey, String>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the answer for a question.
    pub fn record(&mut self, key: QuestionKey, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    #[must_use]
    pub fn get(&self, key: &QuestionKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct answered questions in the given section.
    #[must_use]
    pub fn answered_in(&self, section_id: &SectionId) -> usize {
        self.entries
            .keys()
            .filter(|key| key.section_id() == section_id)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
