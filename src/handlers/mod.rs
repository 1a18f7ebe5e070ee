pub mod health_handler;
pub mod question_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::errors::AppError;

pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use question_handler::{
    delete_question, get_all_questions, get_questions_by_category, upsert_questions,
};
pub use quiz_handler::{create_quiz, get_quiz, get_quiz_questions, submit_quiz};

/// Registers every REST endpoint.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upsert_questions)
        .service(get_questions_by_category)
        .service(get_all_questions)
        .service(delete_question)
        .service(create_quiz)
        .service(get_quiz_questions)
        .service(submit_quiz)
        .service(get_quiz)
        .service(health_check)
        .service(health_check_ready)
        .service(health_check_live);
}

/// Malformed or wrongly shaped bodies become validation errors with the
/// usual error payload instead of actix's plain-text 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid request payload: {}", err)).into()
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::app_state::AppState;
    use crate::repositories::{
        question_repository::MockQuestionRepository, quiz_repository::MockQuizRepository,
    };
    use crate::test_utils::test_helpers::assert_error_status;
    use actix_web::{http::StatusCode, test, App};

    fn idle_state() -> AppState {
        AppState::from_repositories(
            Arc::new(MockQuestionRepository::new()),
            Arc::new(MockQuizRepository::new()),
        )
    }

    #[actix_web::test]
    async fn test_non_array_submission_is_validation_error() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(idle_state()))
                .app_data(json_config())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/quiz/quizSubmit")
            .set_json(serde_json::json!({ "questionId": 1, "response": "4" }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_error_status(resp.status());
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], 400);
    }

    #[actix_web::test]
    async fn test_readiness_reports_store_failure() {
        let mut questions = MockQuestionRepository::new();
        questions
            .expect_health_check()
            .returning(|| Err(AppError::DatabaseError("no primary".to_string())));
        let state = AppState::from_repositories(
            Arc::new(questions),
            Arc::new(MockQuizRepository::new()),
        );

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health/ready").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
