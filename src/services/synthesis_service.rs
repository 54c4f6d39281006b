use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::models::question::{Question, OPTION_COUNT};
use crate::services::chunker::Chunker;
use crate::utils::text::clean_source_text;

pub const BLANK: &str = "_______";
pub const FILL_IN_THE_BLANK_TAG: &str = "fill-in-the-blank";

const MIN_ANSWER_CHARS: usize = 2;
const MAX_ANSWER_CHARS: usize = 25;

/// Offline fill-in-the-blank questions built from noun phrases of the source.
#[derive(Clone)]
pub struct SynthesisService {
    chunker: Arc<dyn Chunker>,
}

impl SynthesisService {
    pub fn new(chunker: Arc<dyn Chunker>) -> Self {
        Self { chunker }
    }

    pub fn generate(&self, text: &str, num_questions: usize) -> Vec<Question> {
        let mut rng = rand::thread_rng();
        self.generate_with_rng(text, num_questions, &mut rng)
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        num_questions: usize,
        rng: &mut R,
    ) -> Vec<Question> {
        let clean = clean_source_text(text);
        let sentences = self.chunker.sentences(&clean);

        let answers: Vec<&str> = sentences
            .iter()
            .flat_map(|s| self.chunker.noun_phrases(s))
            .filter(|phrase| {
                let len = phrase.chars().count();
                len > MIN_ANSWER_CHARS && len < MAX_ANSWER_CHARS
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if answers.len() < OPTION_COUNT {
            tracing::info!(
                candidates = answers.len(),
                "Not enough candidate answers for fill-in-the-blank questions"
            );
            return vec![];
        }

        let pool_size = answers.len().min(num_questions.saturating_mul(2));
        let picks: Vec<&str> = answers.choose_multiple(rng, pool_size).copied().collect();

        let mut questions = Vec::new();
        for answer in picks {
            let Some(sentence) = sentences.iter().find(|s| s.contains(answer)) else {
                continue;
            };
            // Blanking one of several occurrences would leave the answer visible.
            if sentence.matches(answer).count() > 1 {
                continue;
            }

            let distractors: Vec<&str> = answers.iter().copied().filter(|a| *a != answer).collect();
            if distractors.len() < OPTION_COUNT - 1 {
                continue;
            }

            let mut options: Vec<String> = distractors
                .choose_multiple(rng, OPTION_COUNT - 1)
                .map(|d| d.to_string())
                .collect();
            options.push(answer.to_string());
            options.shuffle(rng);

            questions.push(Question {
                id: questions.len(),
                question_text: sentence.replacen(answer, BLANK, 1),
                options,
                correct_answer: answer.to_string(),
                topic_tag: FILL_IN_THE_BLANK_TAG.to_string(),
            });

            if questions.len() >= num_questions {
                break;
            }
        }

        questions
    }
}
