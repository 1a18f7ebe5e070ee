use serde::{Deserialize, Serialize};

/// The mutable part of a question. Every field is optional: an upsert that
/// omits a field stores it as null.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionContent {
    pub category: Option<String>,
    pub question_title: Option<String>,
    pub option1: Option<String>,
    pub option2: Option<String>,
    pub option3: Option<String>,
    pub option4: Option<String>,
    pub right_ans: Option<String>,
    pub difficulty_level: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub question_id: i32, // assigned by the store, never changes
    #[serde(flatten)]
    pub content: QuestionContent,
}

impl Question {
    pub fn new(question_id: i32, content: QuestionContent) -> Self {
        Self {
            question_id,
            content,
        }
    }
}

/// A question waiting to be written by a batch save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingQuestion {
    /// No identifier yet; the store allocates one.
    New(QuestionContent),
    /// Replaces the stored record with the same identifier.
    Existing(Question),
}
