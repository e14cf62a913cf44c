use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use exam_core::model::{TaskKind, TestType};

use crate::error::FeedbackError;

#[derive(Clone, Debug)]
pub struct FeedbackConfig {
    pub base_url: String,
    pub api_key: String,
}

impl FeedbackConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("EXAMPREP_FEEDBACK_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("EXAMPREP_FEEDBACK_URL")
            .unwrap_or_else(|_| "https://api.examprep.app".into());
        Some(Self { base_url, api_key })
    }
}

/// Payload sent to the external scoring endpoint for one free-text task.
///
/// The session neither validates nor interprets this; it is pass-through
/// data assembled from the answer sheet plus task metadata. Field names
/// are camelCase on the wire, matching the endpoint's existing contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub response: String,
    pub test_type: TestType,
    pub task_type: TaskKind,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_word_count: Option<u32>,
    pub time_spent_seconds: u32,
}

/// Structured score report returned by the scoring endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackReport {
    pub overall: f64,
    pub criteria: Vec<CriterionScore>,
    pub summary: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScore {
    pub name: String,
    pub score: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// HTTP client for the external feedback/scoring service.
///
/// Treated as an opaque collaborator: invoked only after a task or the
/// whole attempt ends, never from inside the session state machine.
#[derive(Clone)]
pub struct FeedbackService {
    client: Client,
    config: Option<FeedbackConfig>,
}

impl FeedbackService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(FeedbackConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<FeedbackConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Score one free-text task submission.
    ///
    /// # Errors
    ///
    /// Returns `FeedbackError` when the service is disabled, the request
    /// fails, or the report carries no criteria.
    pub async fn score(&self, request: &FeedbackRequest) -> Result<FeedbackReport, FeedbackError> {
        let config = self.config.as_ref().ok_or(FeedbackError::Disabled)?;

        let url = format!("{}/v1/score", config.base_url.trim_end_matches('/'));
        debug!(
            test_type = %request.test_type,
            task_type = %request.task_type,
            "requesting feedback score"
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "feedback service rejected the request");
            return Err(FeedbackError::HttpStatus(response.status()));
        }

        let report: FeedbackReport = response.json().await?;
        if report.criteria.is_empty() {
            return Err(FeedbackError::EmptyResponse);
        }

        Ok(report)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_camel_case_and_skips_absent_word_count() {
        let request = FeedbackRequest {
            response: "My answer.".into(),
            test_type: TestType::Ielts,
            task_type: TaskKind::Speaking,
            prompt: "Describe a journey.".into(),
            target_word_count: None,
            time_spent_seconds: 312,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["testType"], "ielts");
        assert_eq!(json["taskType"], "speaking");
        assert_eq!(json["timeSpentSeconds"], 312);
        assert!(json.get("targetWordCount").is_none());
    }

    #[test]
    fn request_includes_word_count_when_present() {
        let request = FeedbackRequest {
            response: "Essay text.".into(),
            test_type: TestType::TefCanada,
            task_type: TaskKind::Writing,
            prompt: "Écrivez une lettre.".into(),
            target_word_count: Some(250),
            time_spent_seconds: 1_200,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["targetWordCount"], 250);
        assert_eq!(json["testType"], "tef-canada");
    }

    #[test]
    fn report_deserializes_from_endpoint_shape() {
        let raw = r#"{
            "overall": 6.5,
            "criteria": [
                {"name": "taskAchievement", "score": 6.0, "comment": "On topic."},
                {"name": "lexicalResource", "score": 7.0}
            ],
            "summary": "A solid response with minor lapses.",
            "suggestions": ["Vary sentence openings."]
        }"#;

        let report: FeedbackReport = serde_json::from_str(raw).unwrap();
        assert!((report.overall - 6.5).abs() < f64::EPSILON);
        assert_eq!(report.criteria.len(), 2);
        assert_eq!(report.criteria[1].comment, None);
        assert_eq!(report.suggestions.len(), 1);
    }

    #[test]
    fn report_suggestions_default_to_empty() {
        let raw = r#"{"overall": 5.0, "criteria": [{"name": "fluency", "score": 5.0}], "summary": "ok"}"#;
        let report: FeedbackReport = serde_json::from_str(raw).unwrap();
        assert!(report.suggestions.is_empty());
    }

    #[tokio::test]
    async fn score_fails_fast_when_disabled() {
        let service = FeedbackService::new(None);
        assert!(!service.enabled());

        let request = FeedbackRequest {
            response: "text".into(),
            test_type: TestType::Opic,
            task_type: TaskKind::Speaking,
            prompt: "prompt".into(),
            target_word_count: None,
            time_spent_seconds: 10,
        };
        let err = service.score(&request).await.unwrap_err();
        assert!(matches!(err, FeedbackError::Disabled));
    }
}
