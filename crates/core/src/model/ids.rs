use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a Section (e.g. "listening", "reading").
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionId(String);

impl SectionId {
    /// Creates a new `SectionId`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for one exam attempt.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttemptId(Uuid);

impl AttemptId {
    /// Creates a fresh random `AttemptId`.
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

/// Composite key addressing one question of one section.
///
/// Question numbers are 1-based, matching how questions are displayed.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionKey {
    section_id: SectionId,
    question: u32,
}

impl QuestionKey {
    /// Creates a new `QuestionKey`.
    #[must_use]
    pub fn new(section_id: SectionId, question: u32) -> Self {
        Self {
            section_id,
            question,
        }
    }

    /// Returns the section identifier part of the key.
    #[must_use]
    pub fn section_id(&self) -> &SectionId {
        &self.section_id
    }

    /// Returns the 1-based question number part of the key.
    #[must_use]
    pub fn question(&self) -> u32 {
        self.question
    }
}

impl fmt::Debug for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionId({})", self.0)
    }
}

impl fmt::Debug for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttemptId({})", self.0)
    }
}

impl fmt::Debug for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionKey({}:{})", self.section_id.0, self.question)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.section_id, self.question)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing an ID from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for SectionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError {
                kind: "SectionId".to_string(),
            });
        }
        Ok(SectionId::new(trimmed))
    }
}

impl FromStr for QuestionKey {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseIdError {
            kind: "QuestionKey".to_string(),
        };
        let (section, question) = s.rsplit_once(':').ok_or_else(err)?;
        let section_id = section.parse::<SectionId>().map_err(|_| err())?;
        let question = question.parse::<u32>().map_err(|_| err())?;
        Ok(QuestionKey::new(section_id, question))
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_id_display() {
        let id = SectionId::new("listening");
        assert_eq!(id.to_string(), "listening");
    }

    #[test]
    fn section_id_from_str_rejects_empty() {
        let result = "   ".parse::<SectionId>();
        assert!(result.is_err());
    }

    #[test]
    fn question_key_display() {
        let key = QuestionKey::new(SectionId::new("reading"), 5);
        assert_eq!(key.to_string(), "reading:5");
    }

    #[test]
    fn question_key_roundtrip() {
        let original = QuestionKey::new(SectionId::new("writing"), 2);
        let parsed: QuestionKey = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn question_key_from_str_rejects_garbage() {
        assert!("no-separator".parse::<QuestionKey>().is_err());
        assert!("reading:nan".parse::<QuestionKey>().is_err());
        assert!(":3".parse::<QuestionKey>().is_err());
    }

    #[test]
    fn attempt_ids_are_unique() {
        let a = AttemptId::new_random();
        let b = AttemptId::new_random();
        assert_ne!(a, b);
    }
}
