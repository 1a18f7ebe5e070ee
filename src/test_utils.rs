use crate::models::domain::{Question, QuestionContent};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a fully populated question whose options include `right_ans`
    pub fn question(question_id: i32, category: &str, right_ans: &str) -> Question {
        Question::new(question_id, content(category, right_ans))
    }

    /// Creates question content without an identifier
    pub fn content(category: &str, right_ans: &str) -> QuestionContent {
        QuestionContent {
            category: Some(category.to_string()),
            question_title: Some(format!("Which answer is {}?", right_ans)),
            option1: Some(right_ans.to_string()),
            option2: Some("A".to_string()),
            option3: Some("B".to_string()),
            option4: Some("C".to_string()),
            right_ans: Some(right_ans.to_string()),
            difficulty_level: Some("easy".to_string()),
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_question() {
        let question = question(4, "math", "4");
        assert_eq!(question.question_id, 4);
        assert_eq!(question.content.category.as_deref(), Some("math"));
        assert_eq!(question.content.option1, question.content.right_ans);
    }

    #[test]
    fn test_fixtures_content() {
        let content = content("science", "H2O");
        assert_eq!(content.right_ans.as_deref(), Some("H2O"));
        assert_eq!(content.difficulty_level.as_deref(), Some("easy"));
    }
}
