use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{PendingQuestion, QuestionContent},
        dto::{
            request::QuestionPayload,
            response::{DeleteQuestionResponse, QuestionDto},
        },
    },
    repositories::QuestionRepository,
};

pub struct QuestionService {
    repository: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    /// Creates or fully replaces every question in the batch. Nothing is
    /// written unless the whole batch validates and commits.
    pub async fn upsert_questions(
        &self,
        payloads: Vec<QuestionPayload>,
    ) -> AppResult<Vec<QuestionDto>> {
        for payload in &payloads {
            payload.validate()?;
        }

        let mut pending = Vec::with_capacity(payloads.len());
        for payload in payloads {
            let question_id = payload.question_id;
            let content = QuestionContent::from(payload);

            let entry = match question_id {
                Some(id) => match self.repository.find_by_id(id).await? {
                    Some(mut existing) => {
                        log::debug!("Updating existing question with id {}", id);
                        existing.content = content;
                        PendingQuestion::Existing(existing)
                    }
                    None => {
                        log::warn!(
                            "No question found with id {}; creating a new question instead",
                            id
                        );
                        PendingQuestion::New(content)
                    }
                },
                None => {
                    log::debug!("No questionId provided; creating a new question");
                    PendingQuestion::New(content)
                }
            };
            pending.push(entry);
        }

        let saved = self.repository.save_all(pending).await.map_err(|err| {
            log::error!("Error processing question batch: {}", err);
            err
        })?;

        log::debug!("Saved {} question(s)", saved.len());
        Ok(saved.into_iter().map(QuestionDto::from).collect())
    }

    pub async fn get_questions_by_category(&self, category: &str) -> AppResult<Vec<QuestionDto>> {
        let questions = self.repository.find_by_category(category).await?;

        if questions.is_empty() {
            return Err(AppError::NotFound(
                "No questions found for the specified category.".to_string(),
            ));
        }

        Ok(questions.into_iter().map(QuestionDto::from).collect())
    }

    pub async fn get_all_questions(&self) -> AppResult<Vec<QuestionDto>> {
        let questions = self.repository.find_all().await?;
        log::debug!("Fetched all questions. Total questions: {}", questions.len());
        Ok(questions.into_iter().map(QuestionDto::from).collect())
    }

    /// Removes a question. Quizzes that reference it are left as they are.
    pub async fn delete_question(&self, question_id: i32) -> AppResult<DeleteQuestionResponse> {
        if !self.repository.delete_by_id(question_id).await? {
            log::warn!("Question with id {} not found", question_id);
            return Err(AppError::NotFound("Question not found.".to_string()));
        }

        log::debug!("Question with id {} deleted", question_id);
        Ok(DeleteQuestionResponse {
            status: "success".to_string(),
            message: "Question deleted successfully.".to_string(),
            question_id,
        })
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.repository.health_check().await
    }
}
