use crate::services::response_parser::QuestionRecord;

/// Phrases that betray a question was written against hidden source material.
pub const FORBIDDEN_PHRASES: [&str; 5] = [
    "the passage",
    "the text",
    "according to",
    "as mentioned above",
    "this passage",
];

pub fn references_source(question_text: &str) -> bool {
    let lower = question_text.to_lowercase();
    FORBIDDEN_PHRASES.iter().any(|p| lower.contains(p))
}

/// Keeps only records whose `question_text` stands on its own.
pub fn retain_self_contained(records: Vec<QuestionRecord>) -> Vec<QuestionRecord> {
    records
        .into_iter()
        .filter(|record| match record.get("question_text").and_then(|v| v.as_str()) {
            Some(text) if references_source(text) => {
                tracing::info!(question = %text, "Dropping question that references its source");
                false
            }
            Some(_) => true,
            None => false,
        })
        .collect()
}
