use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    #[serde(default)]
    pub id: usize,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub topic_tag: String,
}

impl Question {
    /// Exactly four distinct options, one of which is the correct answer.
    pub fn is_well_formed(&self) -> bool {
        let distinct: HashSet<&str> = self.options.iter().map(String::as_str).collect();
        self.options.len() == OPTION_COUNT
            && distinct.len() == OPTION_COUNT
            && self.options.contains(&self.correct_answer)
    }
}
