use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Mode {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Easy" => Ok(Mode::Easy),
            "Medium" => Ok(Mode::Medium),
            "Hard" => Ok(Mode::Hard),
            other => Err(format!("unknown mode '{}', expected Easy, Medium or Hard", other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Easy => "Easy",
            Mode::Medium => "Medium",
            Mode::Hard => "Hard",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub enum QuizSource {
    Topic(String),
    Passage(String),
    Webpage(String),
    Pdf { filename: Option<String>, bytes: Bytes },
}

impl QuizSource {
    pub fn title(&self) -> String {
        match self {
            QuizSource::Topic(topic) if !topic.trim().is_empty() => topic.trim().to_string(),
            QuizSource::Topic(_) => "Generated Topic Quiz".to_string(),
            QuizSource::Passage(_) => "Passage Quiz".to_string(),
            QuizSource::Webpage(_) => "Webpage Quiz".to_string(),
            QuizSource::Pdf {
                filename: Some(name),
                ..
            } if !name.trim().is_empty() => name.clone(),
            QuizSource::Pdf { .. } => "PDF Quiz".to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            QuizSource::Topic(_) => "topic",
            QuizSource::Passage(_) => "passage",
            QuizSource::Webpage(_) => "webpage",
            QuizSource::Pdf { .. } => "pdf",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub source: QuizSource,
    pub mode: Mode,
    pub cognitive_level: String,
    pub num_questions: usize,
}
