use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::dto::{request::SubmissionAnswer, response::SubmissionResult},
    repositories::QuestionRepository,
};

/// Scores submissions against stored answer keys. It does not know about
/// quizzes: only the question ids in the submission are looked up.
pub struct GradingService {
    repository: Arc<dyn QuestionRepository>,
}

impl GradingService {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    pub async fn grade_submission(
        &self,
        answers: Vec<SubmissionAnswer>,
    ) -> AppResult<SubmissionResult> {
        if answers.is_empty() {
            return Err(AppError::ValidationError(
                "Invalid submission data. Expected a non-empty array.".to_string(),
            ));
        }

        // Later answers for the same question overwrite earlier ones
        let responses: HashMap<i32, String> = answers
            .into_iter()
            .map(|answer| (answer.question_id, answer.response))
            .collect();

        let mut question_ids: Vec<i32> = responses.keys().copied().collect();
        question_ids.sort_unstable();

        let answer_key = self
            .repository
            .find_answers_by_ids(&question_ids)
            .await
            .map_err(|err| {
                log::error!("Error processing quiz submission: {}", err);
                err
            })?;

        Ok(score(&responses, &answer_key))
    }
}

/// Exact, case-sensitive comparison. A question without a stored answer
/// counts as incorrect.
fn score(responses: &HashMap<i32, String>, answer_key: &HashMap<i32, String>) -> SubmissionResult {
    let total = responses.len() as u32;
    let correct = responses
        .iter()
        .filter(|(question_id, response)| answer_key.get(*question_id) == Some(*response))
        .count() as u32;

    SubmissionResult {
        total_questions: total,
        correct_answers: correct,
        incorrect_answers: total - correct,
    }
}
