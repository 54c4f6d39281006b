use crate::models::generation::Mode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const DEFAULT_COGNITIVE_LEVEL: &str = "Comprehension";

pub fn default_cognitive_level() -> String {
    DEFAULT_COGNITIVE_LEVEL.to_string()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TopicPayload {
    pub topic: String,
    pub mode: Mode,
    #[serde(default = "default_cognitive_level")]
    pub cognitive_level: String,
    #[validate(range(min = 1))]
    pub num_questions: usize,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PassagePayload {
    pub passage: String,
    pub mode: Mode,
    #[serde(default = "default_cognitive_level")]
    pub cognitive_level: String,
    #[validate(range(min = 1))]
    pub num_questions: usize,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct WebpagePayload {
    pub url: String,
    pub mode: Mode,
    #[serde(default = "default_cognitive_level")]
    pub cognitive_level: String,
    #[validate(range(min = 1))]
    pub num_questions: usize,
}

/// Multipart form accepted by `POST /generate/pdf`. Documentation only; the
/// handler reads the fields one by one.
#[derive(ToSchema)]
pub struct PdfUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    pub mode: Mode,
    pub cognitive_level: Option<String>,
    pub num_questions: usize,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ExplainPayload {
    #[validate(length(min = 1))]
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cognitive_level_defaults_when_omitted() {
        let payload: TopicPayload = serde_json::from_value(json!({
            "topic": "Volcanoes",
            "mode": "Hard",
            "num_questions": 3
        }))
        .unwrap();
        assert_eq!(payload.cognitive_level, DEFAULT_COGNITIVE_LEVEL);
        assert_eq!(payload.mode, Mode::Hard);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn zero_questions_fails_validation() {
        let payload: PassagePayload = serde_json::from_value(json!({
            "passage": "text",
            "mode": "Easy",
            "cognitive_level": "Analysis",
            "num_questions": 0
        }))
        .unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let parsed = serde_json::from_value::<WebpagePayload>(json!({
            "url": "https://example.com",
            "mode": "Impossible",
            "num_questions": 2
        }));
        assert!(parsed.is_err());
    }
}
