use thiserror::Error;

use crate::model::ids::SectionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SectionError {
    #[error("section id cannot be empty")]
    EmptyId,

    #[error("section title cannot be empty")]
    EmptyTitle,

    #[error("section duration must be > 0 seconds")]
    ZeroDuration,

    #[error("section must have at least one question")]
    ZeroQuestionCount,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("exam catalog must contain at least one section")]
    Empty,

    #[error("duplicate section id in catalog: {id}")]
    DuplicateSection { id: SectionId },
}

//
// ─── SECTION ───────────────────────────────────────────────────────────────────
//

/// One timed division of an exam, with its own question set and duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    id: SectionId,
    title: String,
    duration_secs: u32,
    question_count: u32,
}

impl Section {
    /// Creates a new Section.
    ///
    /// # Errors
    ///
    /// Returns `SectionError` if the id or title is empty or whitespace-only,
    /// the duration is zero, or the question count is zero.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        duration_secs: u32,
        question_count: u32,
    ) -> Result<Self, SectionError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(SectionError::EmptyId);
        }
        let title = title.into();
        if title.trim().is_empty() {
            return Err(SectionError::EmptyTitle);
        }
        if duration_secs == 0 {
            return Err(SectionError::ZeroDuration);
        }
        if question_count == 0 {
            return Err(SectionError::ZeroQuestionCount);
        }

        Ok(Self {
            id: SectionId::new(id.trim()),
            title: title.trim().to_owned(),
            duration_secs,
            question_count,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.duration_secs))
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Ordered, immutable sequence of sections defining one exam.
///
/// Insertion order is exam order and is fixed for the lifetime of any
/// session built from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCatalog {
    sections: Vec<Section>,
}

impl SectionCatalog {
    /// Creates a catalog from an ordered list of sections.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` if no sections are given and
    /// `CatalogError::DuplicateSection` if two sections share an id
    /// (duplicate ids would alias answer-sheet keys across sections).
    pub fn new(sections: Vec<Section>) -> Result<Self, CatalogError> {
        if sections.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, section) in sections.iter().enumerate() {
            if sections[..i].iter().any(|s| s.id() == section.id()) {
                return Err(CatalogError::DuplicateSection {
                    id: section.id().clone(),
                });
            }
        }

        Ok(Self { sections })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        // A constructed catalog is never empty; kept for API symmetry.
        self.sections.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Position of the section with the given id, if present.
    #[must_use]
    pub fn index_of(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id() == id)
    }

    /// Sum of all section durations, in seconds.
    #[must_use]
    pub fn total_duration_secs(&self) -> u32 {
        self.sections
            .iter()
            .fold(0_u32, |acc, s| acc.saturating_add(s.duration_secs()))
    }
}

//
// ─── PRESETS ───────────────────────────────────────────────────────────────────
//

impl SectionCatalog {
    /// IELTS Academic mock test: listening, reading, writing, speaking.
    #[must_use]
    pub fn ielts_academic() -> Self {
        Self::preset(&[
            ("listening", "Listening", 1_800, 40),
            ("reading", "Reading", 3_600, 40),
            ("writing", "Writing", 3_600, 2),
            ("speaking", "Speaking", 900, 3),
        ])
    }

    /// TEF Canada mock test: the four épreuves in exam order.
    #[must_use]
    pub fn tef_canada() -> Self {
        Self::preset(&[
            ("comprehension-orale", "Compréhension orale", 2_400, 60),
            ("comprehension-ecrite", "Compréhension écrite", 3_600, 50),
            ("expression-ecrite", "Expression écrite", 3_600, 2),
            ("expression-orale", "Expression orale", 900, 2),
        ])
    }

    /// OPIc mock test: a single self-paced speaking section.
    #[must_use]
    pub fn opic() -> Self {
        Self::preset(&[("speaking", "Speaking", 2_400, 14)])
    }

    fn preset(defs: &[(&str, &str, u32, u32)]) -> Self {
        let sections = defs
            .iter()
            .map(|(id, title, duration, questions)| {
                Section::new(*id, *title, *duration, *questions)
                    .expect("preset section definitions are valid")
            })
            .collect();
        Self::new(sections).expect("preset catalogs are non-empty and unique")
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_new_rejects_empty_id() {
        let err = Section::new("  ", "Listening", 1_800, 40).unwrap_err();
        assert_eq!(err, SectionError::EmptyId);
    }

    #[test]
    fn section_new_rejects_empty_title() {
        let err = Section::new("listening", "   ", 1_800, 40).unwrap_err();
        assert_eq!(err, SectionError::EmptyTitle);
    }

    #[test]
    fn section_new_rejects_zero_duration() {
        let err = Section::new("listening", "Listening", 0, 40).unwrap_err();
        assert_eq!(err, SectionError::ZeroDuration);
    }

    #[test]
    fn section_new_rejects_zero_questions() {
        let err = Section::new("listening", "Listening", 1_800, 0).unwrap_err();
        assert_eq!(err, SectionError::ZeroQuestionCount);
    }

    #[test]
    fn section_trims_id_and_title() {
        let section = Section::new("  reading ", "  Reading  ", 3_600, 40).unwrap();
        assert_eq!(section.id().as_str(), "reading");
        assert_eq!(section.title(), "Reading");
    }

    #[test]
    fn catalog_rejects_empty_list() {
        let err = SectionCatalog::new(Vec::new()).unwrap_err();
        assert_eq!(err, CatalogError::Empty);
    }

    #[test]
    fn catalog_rejects_duplicate_ids() {
        let sections = vec![
            Section::new("reading", "Reading", 3_600, 40).unwrap(),
            Section::new("reading", "Reading again", 1_800, 20).unwrap(),
        ];
        let err = SectionCatalog::new(sections).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateSection {
                id: SectionId::new("reading")
            }
        );
    }

    #[test]
    fn catalog_preserves_insertion_order() {
        let catalog = SectionCatalog::ielts_academic();
        let ids: Vec<_> = catalog.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, ["listening", "reading", "writing", "speaking"]);
        assert_eq!(catalog.index_of(&SectionId::new("writing")), Some(2));
        assert_eq!(catalog.index_of(&SectionId::new("missing")), None);
    }

    #[test]
    fn ielts_total_duration_sums_sections() {
        let catalog = SectionCatalog::ielts_academic();
        assert_eq!(catalog.total_duration_secs(), 1_800 + 3_600 + 3_600 + 900);
    }

    #[test]
    fn opic_is_single_section() {
        let catalog = SectionCatalog::opic();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().question_count(), 14);
    }
}
