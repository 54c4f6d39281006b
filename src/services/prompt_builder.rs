//! Instruction/content pairs for the generation service.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

const OUTPUT_RULES: &str = "Return ONLY a valid JSON array, with no commentary before or after it.\n\
Each object must contain:\n\
- question_text\n\
- options (exactly 4 distinct strings)\n\
- correct_answer (copied exactly from one of the options)\n\
- topic_tag\n";

const OPTION_QUALITY_RULES: &str = "OPTION QUALITY RULES:\n\
- All options must be similar in length (within 15% of each other).\n\
- All options must have the same grammatical structure.\n\
- The correct answer must NOT be longer or more detailed than the distractors.\n\
- Avoid explanations, examples, or qualifiers inside any option.\n\
- Distractors must be equally plausible.\n";

/// Grounded prompt: the passage goes into the user content as hidden reference.
pub fn medium_prompt(text: &str, num_questions: usize, cognitive_level: &str) -> PromptPair {
    let system = format!(
        "You are an expert quiz designer following Bloom's Taxonomy.\n\n\
         Create exactly {num_questions} multiple-choice questions at the '{cognitive_level}' level.\n\n\
         CRITICAL RULES:\n\
         - The user DOES NOT see the passage.\n\
         - Questions must be fully self-contained.\n\
         - DO NOT use phrases like 'according to the passage', 'the passage states', \
         'the text describes', 'this article' or 'as mentioned above'.\n\n\
         {OUTPUT_RULES}\n{OPTION_QUALITY_RULES}"
    );

    let user = format!(
        "Use the following content for INTERNAL REFERENCE ONLY.\n\
         Do NOT mention this content explicitly in the questions.\n\n\
         {text}\n\n\
         Generate the MCQs now."
    );

    PromptPair { system, user }
}

/// Topic-only prompt: the model works from its own knowledge.
pub fn hard_prompt(topic: &str, num_questions: usize, cognitive_level: &str) -> PromptPair {
    let system = format!(
        "You are an expert quiz designer.\n\n\
         Create exactly {num_questions} HARD multiple-choice questions about the topic: '{topic}'.\n\n\
         Use Bloom's Taxonomy level: {cognitive_level}.\n\n\
         CRITICAL RULES:\n\
         - There is NO passage. Rely on your own knowledge of the topic.\n\
         - The user only knows the topic.\n\
         - DO NOT reference any passage, text, article, or source.\n\
         - Questions must be completely self-contained.\n\n\
         {OUTPUT_RULES}\n{OPTION_QUALITY_RULES}"
    );

    let user = format!("Topic: {topic}\n\nGenerate the MCQs now.");

    PromptPair { system, user }
}

pub fn passage_prompt(topic: &str, word_count: usize) -> PromptPair {
    PromptPair {
        system: "Write an educational passage with many concepts and named entities.".to_string(),
        user: format!("Write a {word_count}-word passage about: {topic}"),
    }
}

pub fn explanation_prompt(question: &str, user_answer: &str, correct_answer: &str) -> PromptPair {
    PromptPair {
        system: "You are a friendly AI tutor. Explain why the student's answer is wrong."
            .to_string(),
        user: format!(
            "Question: {question}\n\
             Student answered: {user_answer}\n\
             Correct answer: {correct_answer}\n\
             Explain simply in one paragraph."
        ),
    }
}
