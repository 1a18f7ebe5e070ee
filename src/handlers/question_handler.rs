use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{
        request::{CategoryRequest, DeleteQuestionRequest, QuestionPayload},
        response::{AllQuestionsResponse, CategoryQuestionsResponse},
    },
};

#[post("/question/ques")]
pub async fn upsert_questions(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<Vec<QuestionPayload>>,
) -> Result<HttpResponse, AppError> {
    let payloads = request.into_inner();
    log::debug!(
        "[{}] Received {} question payload(s)",
        get_request_id(&req).unwrap_or_default(),
        payloads.len()
    );

    let saved = state.question_service.upsert_questions(payloads).await?;
    Ok(HttpResponse::Ok().json(saved))
}

#[post("/question/category")]
pub async fn get_questions_by_category(
    state: web::Data<AppState>,
    request: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let questions = state
        .question_service
        .get_questions_by_category(&request.category)
        .await?;
    Ok(HttpResponse::Ok().json(CategoryQuestionsResponse {
        status: "success".to_string(),
        questions,
    }))
}

#[get("/question/allQuestions")]
pub async fn get_all_questions(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let all_questions = state.question_service.get_all_questions().await?;
    Ok(HttpResponse::Ok().json(AllQuestionsResponse {
        status: "success".to_string(),
        all_questions,
    }))
}

#[post("/question/delete")]
pub async fn delete_question(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<DeleteQuestionRequest>,
) -> Result<HttpResponse, AppError> {
    log::debug!(
        "[{}] Received request to delete question {}",
        get_request_id(&req).unwrap_or_default(),
        request.question_id
    );

    let response = state
        .question_service
        .delete_question(request.question_id)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
