use std::sync::Arc;

use crate::models::generation::{GenerationRequest, Mode, QuizSource};
use crate::models::question::Question;
use crate::models::quiz::{Quiz, QuizFailure};
use crate::services::ai_service::TextGenerator;
use crate::services::leakage_filter::retain_self_contained;
use crate::services::prompt_builder::{self, PromptPair};
use crate::services::response_parser::{parse_question_records, sanitize_questions};
use crate::services::source_service::SourceService;
use crate::services::synthesis_service::SynthesisService;

pub const EXPLANATION_FALLBACK: &str = "Sorry, explanation could not be generated.";

/// Sequences source acquisition, generation and validation per request and
/// always answers with a well-formed [`Quiz`].
#[derive(Clone)]
pub struct QuizService {
    generator: Arc<dyn TextGenerator>,
    synthesizer: SynthesisService,
    sources: SourceService,
    passage_word_count: usize,
}

impl QuizService {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        synthesizer: SynthesisService,
        sources: SourceService,
        passage_word_count: usize,
    ) -> Self {
        Self {
            generator,
            synthesizer,
            sources,
            passage_word_count,
        }
    }

    pub async fn generate(&self, request: GenerationRequest) -> Quiz {
        let title = request.source.title();
        tracing::info!(
            source = request.source.kind(),
            mode = %request.mode,
            num_questions = request.num_questions,
            "Generating quiz"
        );

        let outcome = self.run_pipeline(&request).await.map(stamp_ids);
        match &outcome {
            Ok(questions) => tracing::info!(count = questions.len(), "Quiz generated"),
            Err(failure) => tracing::warn!(reason = %failure, "Quiz generation produced no questions"),
        }
        Quiz::assemble(title, outcome)
    }

    pub async fn explain(&self, question: &str, user_answer: &str, correct_answer: &str) -> String {
        let prompt = prompt_builder::explanation_prompt(question, user_answer, correct_answer);
        let explanation = self.generator.generate(&prompt.system, &prompt.user).await;
        if explanation.trim().is_empty() {
            EXPLANATION_FALLBACK.to_string()
        } else {
            explanation
        }
    }

    async fn run_pipeline(&self, request: &GenerationRequest) -> Result<Vec<Question>, QuizFailure> {
        let n = request.num_questions;
        let level = request.cognitive_level.as_str();

        match (&request.source, request.mode) {
            (QuizSource::Topic(topic), Mode::Hard) if !topic.trim().is_empty() => {
                self.llm_questions(prompt_builder::hard_prompt(topic.trim(), n, level))
                    .await
            }
            (source, mode) => {
                let text = self.acquire_text(source).await?;
                self.questions_from_text(&text, mode, n, level).await
            }
        }
    }

    async fn questions_from_text(
        &self,
        text: &str,
        mode: Mode,
        n: usize,
        level: &str,
    ) -> Result<Vec<Question>, QuizFailure> {
        match mode {
            Mode::Easy => {
                let questions = self.synthesizer.generate(text, n);
                if questions.is_empty() {
                    Err(QuizFailure::InsufficientMaterial)
                } else {
                    Ok(questions)
                }
            }
            // Hard needs a bare topic; text sources fall back to the grounded prompt.
            Mode::Medium | Mode::Hard => {
                self.llm_questions(prompt_builder::medium_prompt(text, n, level))
                    .await
            }
        }
    }

    async fn llm_questions(&self, prompt: PromptPair) -> Result<Vec<Question>, QuizFailure> {
        let raw = self.generator.generate(&prompt.system, &prompt.user).await;
        if raw.trim().is_empty() {
            return Err(QuizFailure::GenerationService);
        }

        let records = retain_self_contained(parse_question_records(&raw));
        let questions = sanitize_questions(&records, &mut rand::thread_rng());
        if questions.is_empty() {
            return Err(QuizFailure::ResponseParse);
        }
        Ok(questions)
    }

    async fn generate_passage(&self, topic: &str) -> Result<String, QuizFailure> {
        let prompt = prompt_builder::passage_prompt(topic, self.passage_word_count);
        let passage = self.generator.generate(&prompt.system, &prompt.user).await;
        if passage.trim().is_empty() {
            return Err(QuizFailure::SourceUnavailable(
                "Could not generate a passage for this topic. Please try again.".to_string(),
            ));
        }
        Ok(passage)
    }

    async fn acquire_text(&self, source: &QuizSource) -> Result<String, QuizFailure> {
        let text = match source {
            QuizSource::Topic(topic) => {
                if topic.trim().is_empty() {
                    return Err(QuizFailure::SourceUnavailable(
                        "Please provide a topic.".to_string(),
                    ));
                }
                return self.generate_passage(topic.trim()).await;
            }
            QuizSource::Passage(passage) => {
                if passage.trim().is_empty() {
                    return Err(QuizFailure::SourceUnavailable(
                        "Please provide a passage.".to_string(),
                    ));
                }
                return Ok(passage.trim().to_string());
            }
            QuizSource::Webpage(url) => {
                if url.trim().is_empty() {
                    return Err(QuizFailure::SourceUnavailable(
                        "Please provide a webpage URL.".to_string(),
                    ));
                }
                self.sources.fetch_webpage_text(url).await
            }
            QuizSource::Pdf { bytes, .. } => self.sources.extract_pdf_text(bytes.clone()).await,
        };

        text.map_err(|e| {
            tracing::warn!(error = %e, source = source.kind(), "Source acquisition failed");
            QuizFailure::SourceUnavailable(e.to_string())
        })
    }
}

/// The single place question ids are assigned: 0-based, in emission order.
fn stamp_ids(mut questions: Vec<Question>) -> Vec<Question> {
    for (idx, question) in questions.iter_mut().enumerate() {
        question.id = idx;
    }
    questions
}
