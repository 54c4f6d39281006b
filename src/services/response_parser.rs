//! Turns raw generation-service text into question records.
//!
//! Every step is total: it either yields a value or `None`, and the whole
//! pipeline collapses to an empty list instead of surfacing an error.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;

use crate::models::question::{Question, OPTION_COUNT};

/// Loosely-typed question object as decoded from model output.
pub type QuestionRecord = Map<String, JsonValue>;

pub const DEFAULT_TOPIC_TAG: &str = "general";

static RE_CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```[A-Za-z0-9_+-]*").unwrap());

const VALID_ESCAPES: [char; 9] = ['"', '\\', '/', 'b', 'f', 'n', 'r', 't', 'u'];

pub fn parse_question_records(raw: &str) -> Vec<QuestionRecord> {
    Some(raw)
        .filter(|r| !r.trim().is_empty())
        .map(strip_code_fences)
        .and_then(|cleaned| bracketed_span(&cleaned).map(sanitize_escapes))
        .and_then(|span| decode_records(&span))
        .unwrap_or_default()
}

fn strip_code_fences(raw: &str) -> String {
    RE_CODE_FENCE.replace_all(raw, "").trim().to_string()
}

fn bracketed_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

/// Drops every backslash that does not begin a legal JSON escape.
fn sanitize_escapes(span: &str) -> String {
    let mut out = String::with_capacity(span.len());
    let mut chars = span.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(next) if VALID_ESCAPES.contains(next) => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            _ => {}
        }
    }
    out
}

fn decode_records(span: &str) -> Option<Vec<QuestionRecord>> {
    match serde_json::from_str::<Vec<QuestionRecord>>(span) {
        Ok(records) => Some(records),
        Err(e) => {
            tracing::warn!(error = %e, "JSON parse failed after cleanup");
            None
        }
    }
}

/// Coerces records into questions, dropping any that break the option rules.
pub fn sanitize_questions<R: Rng + ?Sized>(
    records: &[QuestionRecord],
    rng: &mut R,
) -> Vec<Question> {
    records
        .iter()
        .filter_map(|record| {
            let question = coerce_question(record, rng);
            if question.is_none() {
                tracing::warn!(record = %JsonValue::Object(record.clone()), "Discarding malformed question record");
            }
            question
        })
        .collect()
}

fn coerce_question<R: Rng + ?Sized>(record: &QuestionRecord, rng: &mut R) -> Option<Question> {
    let question_text = record
        .get("question_text")?
        .as_str()?
        .trim()
        .to_string();
    if question_text.is_empty() {
        return None;
    }

    let mut options = record
        .get("options")?
        .as_array()?
        .iter()
        .map(|o| o.as_str().map(|s| s.trim().to_string()))
        .collect::<Option<Vec<String>>>()?;

    let distinct: HashSet<&str> = options.iter().map(String::as_str).collect();
    if options.len() != OPTION_COUNT
        || distinct.len() != OPTION_COUNT
        || options.iter().any(String::is_empty)
    {
        return None;
    }

    let correct_answer = resolve_correct_answer(record.get("correct_answer")?, &options)?;

    let topic_tag = record
        .get("topic_tag")
        .and_then(JsonValue::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TOPIC_TAG)
        .to_string();

    options.shuffle(rng);

    let question = Question {
        id: 0,
        question_text,
        options,
        correct_answer,
        topic_tag,
    };
    question.is_well_formed().then_some(question)
}

fn resolve_correct_answer(value: &JsonValue, options: &[String]) -> Option<String> {
    match value {
        JsonValue::String(s) => options.iter().find(|o| o.as_str() == s.trim()).cloned(),
        JsonValue::Number(n) => n
            .as_u64()
            .and_then(|idx| options.get(idx as usize))
            .cloned(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn record(value: JsonValue) -> QuestionRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn parses_fenced_array_surrounded_by_prose() {
        let raw = "Here you go:\n```json\n[{\"question_text\":\"Q1\",\"options\":[\"a\",\"b\",\"c\",\"d\"],\"correct_answer\":\"a\",\"topic_tag\":\"x\"}]\n```";
        let records = parse_question_records(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["question_text"], "Q1");
        assert_eq!(records[0]["options"], json!(["a", "b", "c", "d"]));
        assert_eq!(records[0]["correct_answer"], "a");
        assert_eq!(records[0]["topic_tag"], "x");
    }

    #[test]
    fn invalid_escapes_are_dropped() {
        let raw = r#"[{"question_text":"a\qb","options":["a","b","c","d"],"correct_answer":"a","topic_tag":"x"}]"#;
        let records = parse_question_records(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["question_text"], "aqb");
    }

    #[test]
    fn valid_escapes_survive() {
        let raw = r#"[{"question_text":"line\nbreak \"quoted\" back\\slash é"}]"#;
        let records = parse_question_records(raw);
        assert_eq!(records[0]["question_text"], "line\nbreak \"quoted\" back\\slash é");
    }

    #[test]
    fn escaped_backslash_before_letter_is_kept() {
        assert_eq!(sanitize_escapes(r#""\\q""#), r#""\\q""#);
        assert_eq!(sanitize_escapes(r#""\frac \alpha""#), r#""\frac alpha""#);
    }

    #[test]
    fn no_array_or_empty_input_is_empty() {
        assert!(parse_question_records("").is_empty());
        assert!(parse_question_records("   ").is_empty());
        assert!(parse_question_records("I cannot help with that.").is_empty());
        assert!(parse_question_records("] backwards [").is_empty());
    }

    #[test]
    fn truncated_json_is_rejected_whole() {
        let raw = r#"[{"question_text":"Q1","options":["a","b","c","d"]}, {"question_text": "Q2", "opt]"#;
        assert!(parse_question_records(raw).is_empty());
    }

    #[test]
    fn non_object_elements_reject_the_batch() {
        assert!(parse_question_records(r#"[1, 2, 3]"#).is_empty());
    }

    #[test]
    fn fence_without_language_tag() {
        let raw = "```\n[{\"question_text\":\"Q\"}]\n```";
        assert_eq!(parse_question_records(raw).len(), 1);
    }

    #[test]
    fn coerces_well_formed_record() {
        let mut rng = StdRng::seed_from_u64(9);
        let records = vec![record(json!({
            "question_text": " What is H2O? ",
            "options": ["Water", "Salt", "Sugar", "Sand"],
            "correct_answer": "Water",
            "topic_tag": "chemistry"
        }))];
        let questions = sanitize_questions(&records, &mut rng);
        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.question_text, "What is H2O?");
        assert_eq!(q.correct_answer, "Water");
        assert!(q.is_well_formed());
    }

    #[test]
    fn index_answers_and_missing_tag() {
        let mut rng = StdRng::seed_from_u64(2);
        let records = vec![record(json!({
            "question_text": "Largest planet?",
            "options": ["Mars", "Jupiter", "Venus", "Mercury"],
            "correct_answer": 1
        }))];
        let questions = sanitize_questions(&records, &mut rng);
        assert_eq!(questions[0].correct_answer, "Jupiter");
        assert_eq!(questions[0].topic_tag, DEFAULT_TOPIC_TAG);
    }

    #[test]
    fn drops_records_breaking_option_rules() {
        let mut rng = StdRng::seed_from_u64(4);
        let records = vec![
            record(json!({"question_text": "Three options", "options": ["a", "b", "c"], "correct_answer": "a"})),
            record(json!({"question_text": "Duplicates", "options": ["a", "a", "c", "d"], "correct_answer": "a"})),
            record(json!({"question_text": "Answer missing", "options": ["a", "b", "c", "d"], "correct_answer": "e"})),
            record(json!({"question_text": "", "options": ["a", "b", "c", "d"], "correct_answer": "a"})),
            record(json!({"options": ["a", "b", "c", "d"], "correct_answer": "a"})),
            record(json!({"question_text": "Index out of range", "options": ["a", "b", "c", "d"], "correct_answer": 7})),
        ];
        assert!(sanitize_questions(&records, &mut rng).is_empty());
    }
}
