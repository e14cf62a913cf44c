use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::section::SectionCatalog;

/// Exam family a mock test belongs to.
///
/// Wire names are kebab-case to match the feedback endpoint's contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestType {
    Ielts,
    TefCanada,
    Opic,
}

impl TestType {
    /// The preset section catalog for this exam family.
    #[must_use]
    pub fn catalog(&self) -> SectionCatalog {
        match self {
            TestType::Ielts => SectionCatalog::ielts_academic(),
            TestType::TefCanada => SectionCatalog::tef_canada(),
            TestType::Opic => SectionCatalog::opic(),
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TestType::Ielts => "ielts",
            TestType::TefCanada => "tef-canada",
            TestType::Opic => "opic",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown test type: {raw}")]
pub struct ParseTestTypeError {
    raw: String,
}

impl FromStr for TestType {
    type Err = ParseTestTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ielts" => Ok(TestType::Ielts),
            "tef-canada" => Ok(TestType::TefCanada),
            "opic" => Ok(TestType::Opic),
            other => Err(ParseTestTypeError {
                raw: other.to_string(),
            }),
        }
    }
}

/// Flavour of a free-text task submitted for external scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    Writing,
    Speaking,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskKind::Writing => "writing",
            TaskKind::Speaking => "speaking",
        };
        write!(f, "{name}")
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_display_roundtrip() {
        for tt in [TestType::Ielts, TestType::TefCanada, TestType::Opic] {
            let parsed: TestType = tt.to_string().parse().unwrap();
            assert_eq!(parsed, tt);
        }
    }

    #[test]
    fn test_type_from_str_rejects_unknown() {
        assert!("toefl".parse::<TestType>().is_err());
    }

    #[test]
    fn catalogs_match_families() {
        assert_eq!(TestType::Ielts.catalog().len(), 4);
        assert_eq!(TestType::TefCanada.catalog().len(), 4);
        assert_eq!(TestType::Opic.catalog().len(), 1);
    }

    #[test]
    fn wire_names_are_kebab_case() {
        let json = serde_json::to_string(&TestType::TefCanada).unwrap();
        assert_eq!(json, "\"tef-canada\"");
        let json = serde_json::to_string(&TaskKind::Writing).unwrap();
        assert_eq!(json, "\"writing\"");
    }
}
