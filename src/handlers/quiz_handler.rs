use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::request::{CreateQuizRequest, QuizLookupRequest, SubmissionAnswer},
};

#[post("/quiz/create")]
pub async fn create_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    log::debug!(
        "[{}] Received request to assemble quiz",
        get_request_id(&req).unwrap_or_default()
    );

    let response = state.quiz_service.create_quiz(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/quiz/getQuizQues")]
pub async fn get_quiz_questions(
    state: web::Data<AppState>,
    request: web::Json<QuizLookupRequest>,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .get_quiz_questions(request.quiz_id)
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/quiz/{quiz_id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .get_quiz_questions(quiz_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/quiz/quizSubmit")]
pub async fn submit_quiz(
    state: web::Data<AppState>,
    submission: web::Json<Vec<SubmissionAnswer>>,
) -> Result<HttpResponse, AppError> {
    let result = state
        .grading_service
        .grade_submission(submission.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
