use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Sentence segmentation and noun-phrase extraction.
///
/// Spans are returned as slices of the input so callers can search for them
/// verbatim in the sentence they came from.
pub trait Chunker: Send + Sync {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str>;

    fn noun_phrases<'a>(&self, sentence: &'a str) -> Vec<&'a str>;
}

static RE_SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.!?]+["'”’)\]]*\s+"#).unwrap());
static RE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*").unwrap());

static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "st", "jr", "sr", "vs", "e.g", "i.e", "fig", "no",
        "approx", "ca",
    ]
    .into_iter()
    .collect()
});

static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "this", "these", "those", "its", "their", "his", "her", "our", "my",
        "your", "some", "many", "several", "each", "every", "both", "most", "few",
    ]
    .into_iter()
    .collect()
});

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // pronouns and wh-words
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "who", "whom",
        "whose", "which", "what", "that", "there", "here", "itself", "themselves", "himself",
        "herself", "one", "all", "any", "no", "other", "another",
        // prepositions
        "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
        "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
        "over", "under", "within", "without", "across", "along", "among", "around", "behind",
        "beyond", "near", "toward", "towards", "upon", "via", "like", "as", "than", "per",
        "since", "until", "while",
        // conjunctions
        "and", "or", "but", "nor", "so", "yet", "because", "although", "though", "if", "when",
        "where", "whether", "unless", "whereas", "how", "why",
        // auxiliaries
        "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "having",
        "do", "does", "did", "can", "could", "will", "would", "shall", "should", "may", "might",
        "must",
        // adverbs
        "not", "also", "very", "often", "only", "just", "even", "still", "then", "now", "more",
        "less", "such", "however", "thus", "therefore", "too", "much", "well", "almost",
        "always", "never", "sometimes", "usually", "first", "later",
        // frequent verbs
        "become", "becomes", "became", "make", "makes", "made", "take", "takes", "took", "give",
        "gives", "gave", "use", "uses", "get", "gets", "got", "include", "includes", "contain",
        "contains", "produce", "produces", "provide", "provides", "require", "requires",
        "remain", "remains", "show", "shows", "help", "helps", "allow", "allows", "cause",
        "causes", "form", "forms", "mean", "means", "known", "called", "consist", "consists",
        "occur", "occurs", "lead", "leads", "led", "play", "plays", "serve", "serves", "found",
        "keep", "keeps", "see", "seen", "say", "says", "said", "won", "wrote", "began", "grew",
    ]
    .into_iter()
    .collect()
});

static COPULAS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "is", "are", "was", "were", "be", "been", "being", "am", "become", "becomes", "became",
        "remain", "remains",
    ]
    .into_iter()
    .collect()
});

static DEGREE_ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "very", "also", "often", "still", "too", "much", "almost", "always", "never",
        "usually", "sometimes", "more", "less", "only", "just", "even",
    ]
    .into_iter()
    .collect()
});

static ING_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "thing", "king", "ring", "wing", "spring", "string", "morning", "evening", "ceiling",
        "building", "painting", "meaning", "feeling", "beginning",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    Upper,
    Lower,
    Neutral,
}

#[derive(Debug)]
struct Chunk {
    start: usize,
    end: usize,
    content_words: usize,
    last_case: Case,
}

/// Rule-based English chunker.
///
/// A noun phrase is a maximal run of content words, optionally led by a
/// determiner. Runs break at punctuation, closed-class words, verb-like
/// suffixes (`-ed`, `-ing`) and where a lowercase word is followed by a
/// capitalised one. Bare lowercase predicates (`is older`) and lowercase
/// modifiers of a proper noun (`famous Einstein`) are not phrases.
#[derive(Debug, Default, Clone)]
pub struct RuleChunker;

impl RuleChunker {
    pub fn new() -> Self {
        Self
    }
}

impl Chunker for RuleChunker {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut start = 0;

        for m in RE_SENTENCE_END.find_iter(text) {
            let opens_sentence = text[m.end()..].chars().next().map_or(false, |c| {
                c.is_uppercase() || c.is_ascii_digit() || "\"'“‘(".contains(c)
            });
            if !opens_sentence || ends_with_abbreviation(&text[start..m.start()]) {
                continue;
            }
            push_trimmed(&mut out, &text[start..m.end()]);
            start = m.end();
        }
        push_trimmed(&mut out, &text[start..]);
        out
    }

    fn noun_phrases<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        let mut spans = Vec::new();
        let mut current: Option<Chunk> = None;
        let mut prev_end = 0;
        let mut after_copula = false;

        for (idx, m) in RE_WORD.find_iter(sentence).enumerate() {
            if sentence[prev_end..m.start()]
                .chars()
                .any(|c| !c.is_whitespace())
            {
                flush(&mut current, sentence, &mut spans);
            }
            prev_end = m.end();

            let word = m.as_str();
            let lower = word.to_lowercase();

            if DETERMINERS.contains(lower.as_str()) {
                after_copula = false;
                flush(&mut current, sentence, &mut spans);
                current = Some(Chunk {
                    start: m.start(),
                    end: m.end(),
                    content_words: 0,
                    last_case: Case::Neutral,
                });
                continue;
            }

            if STOPWORDS.contains(lower.as_str()) {
                after_copula = COPULAS.contains(lower.as_str())
                    || (after_copula && DEGREE_ADVERBS.contains(lower.as_str()));
                flush(&mut current, sentence, &mut spans);
                continue;
            }

            let determiner_only = current.as_ref().map_or(false, |c| c.content_words == 0);
            if is_verb_like(word, &lower) && !determiner_only {
                after_copula = false;
                flush(&mut current, sentence, &mut spans);
                continue;
            }

            // Sentence-initial capitals say nothing about proper nouns.
            let case = if idx == 0 { Case::Neutral } else { case_of(word) };
            let predicate = after_copula && current.is_none() && case == Case::Lower;
            after_copula = false;
            if predicate {
                continue;
            }

            let extends = current.as_ref().map_or(false, |c| {
                !(c.content_words > 0 && c.last_case == Case::Lower && case == Case::Upper)
            });
            if extends {
                if let Some(chunk) = current.as_mut() {
                    chunk.end = m.end();
                    chunk.content_words += 1;
                    chunk.last_case = case;
                }
            } else {
                // Any open chunk here is a lowercase modifier run; it is dropped.
                current = Some(Chunk {
                    start: m.start(),
                    end: m.end(),
                    content_words: 1,
                    last_case: case,
                });
            }
        }

        flush(&mut current, sentence, &mut spans);
        spans
    }
}

fn flush<'a>(current: &mut Option<Chunk>, sentence: &'a str, spans: &mut Vec<&'a str>) {
    if let Some(chunk) = current.take() {
        if chunk.content_words > 0 {
            spans.push(&sentence[chunk.start..chunk.end]);
        }
    }
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece);
    }
}

fn ends_with_abbreviation(prefix: &str) -> bool {
    prefix
        .rsplit(char::is_whitespace)
        .next()
        .map(|w| w.trim_start_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .map_or(false, |w| ABBREVIATIONS.contains(w.as_str()))
}

fn case_of(word: &str) -> Case {
    match word.chars().next() {
        Some(c) if c.is_uppercase() => Case::Upper,
        Some(c) if c.is_lowercase() => Case::Lower,
        _ => Case::Neutral,
    }
}

fn is_verb_like(word: &str, lower: &str) -> bool {
    if case_of(word) != Case::Lower {
        return false;
    }
    let len = lower.chars().count();
    (lower.ends_with("ed") && len > 4 && !lower.ends_with("eed"))
        || (lower.ends_with("ing") && len > 5 && !ING_NOUNS.contains(lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_sentences_on_terminal_punctuation() {
        let chunker = RuleChunker::new();
        let text = "The cell divides. Then it grows! Does it? yes it does.";
        assert_eq!(
            chunker.sentences(text),
            vec!["The cell divides.", "Then it grows!", "Does it? yes it does."]
        );
    }

    #[test]
    fn abbreviations_do_not_end_sentences() {
        let chunker = RuleChunker::new();
        let text = "Dr. Smith studied cells. He won a prize.";
        assert_eq!(
            chunker.sentences(text),
            vec!["Dr. Smith studied cells.", "He won a prize."]
        );
    }

    #[test]
    fn determiner_led_phrases() {
        let chunker = RuleChunker::new();
        let phrases = chunker.noun_phrases("The mitochondria is the powerhouse of the cell.");
        assert_eq!(phrases, vec!["The mitochondria", "the powerhouse", "the cell"]);
    }

    #[test]
    fn proper_nouns_and_verbs() {
        let chunker = RuleChunker::new();
        let phrases = chunker.noun_phrases("Marie Curie discovered radium in Paris.");
        assert_eq!(phrases, vec!["Marie Curie", "radium", "Paris"]);
    }

    #[test]
    fn lowercase_to_capital_starts_new_phrase() {
        let chunker = RuleChunker::new();
        let phrases = chunker.noun_phrases("Students admired famous Albert Einstein.");
        assert!(phrases.contains(&"Albert Einstein"));
        assert!(!phrases.iter().any(|p| p.contains("famous Albert")));
    }

    #[test]
    fn predicates_and_proper_noun_modifiers_are_not_phrases() {
        let chunker = RuleChunker::new();
        assert_eq!(
            chunker.noun_phrases("Paris is older than modern Paris."),
            vec!["Paris", "Paris"]
        );
        assert_eq!(
            chunker.noun_phrases("The river is very wide near the old bridge."),
            vec!["The river", "the old bridge"]
        );
    }

    #[test]
    fn punctuation_breaks_phrases() {
        let chunker = RuleChunker::new();
        let phrases = chunker.noun_phrases("Oxygen, hydrogen, nitrogen.");
        assert_eq!(phrases, vec!["Oxygen", "hydrogen", "nitrogen"]);
    }

    #[test]
    fn determiner_alone_is_not_a_phrase() {
        let chunker = RuleChunker::new();
        assert!(chunker.noun_phrases("It is the.").is_empty());
    }

    #[test]
    fn spans_are_slices_of_the_sentence() {
        let chunker = RuleChunker::new();
        let sentence = "The Roman army built the long roads.";
        for phrase in chunker.noun_phrases(sentence) {
            assert!(sentence.contains(phrase));
        }
    }
}
