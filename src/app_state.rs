use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuestionRepository, MongoQuizRepository, QuestionRepository, QuizRepository},
    services::{GradingService, QuestionService, QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<QuestionService>,
    pub quiz_service: Arc<QuizService>,
    pub grading_service: Arc<GradingService>,
}

impl AppState {
    pub async fn new(config: &Config) -> AppResult<Self> {
        let db = Database::connect(config).await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(&db));
        question_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        Ok(Self::from_repositories(question_repository, quiz_repository))
    }

    /// Wires the services over any store implementation.
    pub fn from_repositories(
        question_repository: Arc<dyn QuestionRepository>,
        quiz_repository: Arc<dyn QuizRepository>,
    ) -> Self {
        let question_service = Arc::new(QuestionService::new(question_repository.clone()));
        let quiz_service = Arc::new(QuizService::new(
            quiz_repository,
            question_repository.clone(),
        ));
        let grading_service = Arc::new(GradingService::new(question_repository));

        Self {
            question_service,
            quiz_service,
            grading_service,
        }
    }
}
