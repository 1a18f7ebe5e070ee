use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Result, Schema as GraphQLSchema};

use super::inputs::SubmissionAnswerInput;
use crate::{
    app_state::AppState,
    models::dto::{
        request::{CreateQuizRequest, QuestionPayload},
        response::{
            CreateQuizResponse, DeleteQuestionResponse, QuestionDto, QuizQuestionsResponse,
            SubmissionResult,
        },
    },
};

pub type Schema = GraphQLSchema<QueryRoot, MutationRoot, EmptySubscription>;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn questions(&self, ctx: &Context<'_>, category: String) -> Result<Vec<QuestionDto>> {
        let state = ctx.data::<AppState>()?;
        state
            .question_service
            .get_questions_by_category(&category)
            .await
            .map_err(|e| e.extend())
    }

    async fn all_questions(&self, ctx: &Context<'_>) -> Result<Vec<QuestionDto>> {
        let state = ctx.data::<AppState>()?;
        state
            .question_service
            .get_all_questions()
            .await
            .map_err(|e| e.extend())
    }

    /// A quiz's questions without their answers.
    async fn quiz(&self, ctx: &Context<'_>, quiz_id: i32) -> Result<QuizQuestionsResponse> {
        let state = ctx.data::<AppState>()?;
        state
            .quiz_service
            .get_quiz_questions(quiz_id)
            .await
            .map_err(|e| e.extend())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn upsert_questions(
        &self,
        ctx: &Context<'_>,
        input: Vec<QuestionPayload>,
    ) -> Result<Vec<QuestionDto>> {
        let state = ctx.data::<AppState>()?;
        state
            .question_service
            .upsert_questions(input)
            .await
            .map_err(|e| e.extend())
    }

    async fn delete_question(
        &self,
        ctx: &Context<'_>,
        question_id: i32,
    ) -> Result<DeleteQuestionResponse> {
        let state = ctx.data::<AppState>()?;
        state
            .question_service
            .delete_question(question_id)
            .await
            .map_err(|e| e.extend())
    }

    async fn create_quiz(
        &self,
        ctx: &Context<'_>,
        input: CreateQuizRequest,
    ) -> Result<CreateQuizResponse> {
        let state = ctx.data::<AppState>()?;
        state
            .quiz_service
            .create_quiz(input)
            .await
            .map_err(|e| e.extend())
    }

    async fn submit_quiz(
        &self,
        ctx: &Context<'_>,
        answers: Vec<SubmissionAnswerInput>,
    ) -> Result<SubmissionResult> {
        let state = ctx.data::<AppState>()?;
        state
            .grading_service
            .grade_submission(answers.into_iter().map(Into::into).collect())
            .await
            .map_err(|e| e.extend())
    }
}

pub fn create_schema(app_state: AppState) -> Schema {
    GraphQLSchema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(app_state)
        .finish()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use super::*;
    use crate::repositories::{
        question_repository::MockQuestionRepository, quiz_repository::MockQuizRepository,
    };

    fn schema(questions: MockQuestionRepository, quizzes: MockQuizRepository) -> Schema {
        create_schema(AppState::from_repositories(
            Arc::new(questions),
            Arc::new(quizzes),
        ))
    }

    #[actix_web::test]
    async fn test_missing_quiz_reports_not_found_code() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_find_by_id().returning(|_| Ok(None));

        let response = schema(MockQuestionRepository::new(), quizzes)
            .execute("{ quiz(quizId: 12) { quizId title } }")
            .await;

        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "Quiz not found");
        let code = response.errors[0]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::from("NOT_FOUND")));
    }

    #[actix_web::test]
    async fn test_submit_quiz_mutation() {
        let mut questions = MockQuestionRepository::new();
        questions
            .expect_find_answers_by_ids()
            .returning(|_| Ok(HashMap::from([(1, "4".to_string()), (2, "9".to_string())])));

        let response = schema(questions, MockQuizRepository::new())
            .execute(
                r#"mutation {
                    submitQuiz(answers: [
                        { questionId: 1, response: "4" },
                        { questionId: 2, response: "8" }
                    ]) { totalQuestions correctAnswers incorrectAnswers }
                }"#,
            )
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().expect("data should convert to json");
        assert_eq!(data["submitQuiz"]["totalQuestions"], 2);
        assert_eq!(data["submitQuiz"]["correctAnswers"], 1);
        assert_eq!(data["submitQuiz"]["incorrectAnswers"], 1);
    }

    #[actix_web::test]
    async fn test_submit_quiz_accepts_non_string_responses() {
        let mut questions = MockQuestionRepository::new();
        questions.expect_find_answers_by_ids().returning(|_| {
            Ok(HashMap::from([(1, "4".to_string()), (2, "true".to_string())]))
        });

        let response = schema(questions, MockQuizRepository::new())
            .execute(
                r#"mutation {
                    submitQuiz(answers: [
                        { questionId: 1, response: 4 },
                        { questionId: 2, response: true }
                    ]) { totalQuestions correctAnswers incorrectAnswers }
                }"#,
            )
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().expect("data should convert to json");
        assert_eq!(data["submitQuiz"]["totalQuestions"], 2);
        assert_eq!(data["submitQuiz"]["correctAnswers"], 2);
        assert_eq!(data["submitQuiz"]["incorrectAnswers"], 0);
    }
}
