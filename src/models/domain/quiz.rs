use serde::{Deserialize, Serialize};

/// A quiz and the identifiers bound to it, in the order they were sampled.
/// The binding lives in the store's join collection, not on the quiz row.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub quiz_id: i32,
    pub title: String,
    pub question_ids: Vec<i32>,
}

impl Quiz {
    pub fn new(quiz_id: i32, title: &str, question_ids: Vec<i32>) -> Self {
        Quiz {
            quiz_id,
            title: title.to_string(),
            question_ids,
        }
    }
}
