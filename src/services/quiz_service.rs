use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::dto::{
        request::{CreateQuizRequest, QuizSelection},
        response::{CreateQuizResponse, QuizQuestionDto, QuizQuestionsResponse},
    },
    repositories::{QuestionRepository, QuizRepository},
};

pub struct QuizService {
    quiz_repository: Arc<dyn QuizRepository>,
    question_repository: Arc<dyn QuestionRepository>,
}

impl QuizService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        question_repository: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            question_repository,
        }
    }

    /// Samples questions from a category and binds them to a new or existing
    /// quiz, replacing any earlier binding.
    pub async fn create_quiz(&self, request: CreateQuizRequest) -> AppResult<CreateQuizResponse> {
        let selection = QuizSelection::try_from(request)?;

        let sampled = self
            .question_repository
            .find_random_by_category(&selection.category, selection.count)
            .await?;

        if sampled.is_empty() {
            return Err(AppError::ValidationError(
                "No questions found for the specified category.".to_string(),
            ));
        }

        let existing_id = match selection.quiz_id {
            Some(id) => match self.quiz_repository.find_by_id(id).await? {
                Some(quiz) => {
                    log::debug!("Updating existing quiz with id {}", quiz.quiz_id);
                    Some(quiz.quiz_id)
                }
                None => {
                    log::warn!("No quiz found with id {}; creating a new quiz instead", id);
                    None
                }
            },
            None => {
                log::debug!("Creating a new quiz");
                None
            }
        };

        let question_ids: Vec<i32> = sampled.iter().map(|q| q.question_id).collect();
        let quiz = self
            .quiz_repository
            .save(existing_id, &selection.title, &question_ids)
            .await
            .map_err(|err| {
                log::error!("Error creating or updating quiz: {}", err);
                err
            })?;

        log::info!(
            "Quiz saved with id {} ({} question(s) from '{}')",
            quiz.quiz_id,
            quiz.question_ids.len(),
            selection.category
        );
        Ok(CreateQuizResponse::from(quiz))
    }

    /// Returns the quiz's questions in binding order without the answer key.
    /// Bound questions that were deleted since assembly are skipped.
    pub async fn get_quiz_questions(&self, quiz_id: i32) -> AppResult<QuizQuestionsResponse> {
        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| {
                log::warn!("Quiz with id {} not found", quiz_id);
                AppError::NotFound("Quiz not found".to_string())
            })?;

        let mut by_id: HashMap<i32, _> = self
            .question_repository
            .find_by_ids(&quiz.question_ids)
            .await?
            .into_iter()
            .map(|question| (question.question_id, question))
            .collect();

        let mut questions = Vec::with_capacity(quiz.question_ids.len());
        for question_id in &quiz.question_ids {
            match by_id.remove(question_id) {
                Some(question) => questions.push(QuizQuestionDto::from(question)),
                None => log::warn!(
                    "Quiz {} references missing question {}; skipping",
                    quiz.quiz_id,
                    question_id
                ),
            }
        }

        Ok(QuizQuestionsResponse {
            quiz_id: quiz.quiz_id,
            title: quiz.title,
            questions,
        })
    }
}
