use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::question::Question;

pub const PARSE_FAILURE_MESSAGE: &str = "AI response could not be parsed. Please try again.";
pub const INSUFFICIENT_MATERIAL_MESSAGE: &str =
    "Not enough distinct key phrases in the source text to build questions.";

/// Response envelope. `error` is set exactly when `questions` is empty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Quiz {
    pub title: String,
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Why a pipeline produced no questions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizFailure {
    #[error("{0}")]
    SourceUnavailable(String),

    #[error("generation service returned no text")]
    GenerationService,

    #[error("generation output could not be parsed into questions")]
    ResponseParse,

    #[error("not enough candidate answers in source text")]
    InsufficientMaterial,
}

impl QuizFailure {
    pub fn user_message(&self) -> String {
        match self {
            QuizFailure::SourceUnavailable(msg) => msg.clone(),
            QuizFailure::GenerationService | QuizFailure::ResponseParse => {
                PARSE_FAILURE_MESSAGE.to_string()
            }
            QuizFailure::InsufficientMaterial => INSUFFICIENT_MATERIAL_MESSAGE.to_string(),
        }
    }
}

impl Quiz {
    pub fn assemble(
        title: impl Into<String>,
        outcome: std::result::Result<Vec<Question>, QuizFailure>,
    ) -> Self {
        let title = title.into();
        match outcome {
            Ok(questions) if !questions.is_empty() => Self {
                title,
                questions,
                error: None,
            },
            Ok(_) => Self::failed(title, &QuizFailure::ResponseParse),
            Err(failure) => Self::failed(title, &failure),
        }
    }

    pub fn failed(title: impl Into<String>, failure: &QuizFailure) -> Self {
        Self {
            title: title.into(),
            questions: vec![],
            error: Some(failure.user_message()),
        }
    }
}
