use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{DeleteQuizResponse, GenerateQuizRequest, ServiceInfo},
};

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok().json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

#[post("/api/quiz/generate")]
async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let quiz = state.quiz_service.generate_quiz(&request.url).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/api/quiz/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(*id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/api/quizzes")]
async fn list_quizzes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let summaries = state.quiz_service.list_quizzes().await?;
    Ok(HttpResponse::Ok().json(summaries))
}

#[delete("/api/quiz/{id}")]
async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = *id;
    if !state.quiz_service.delete_quiz(id).await? {
        return Err(AppError::NotFound(format!("quiz with id '{}' not found", id)));
    }
    Ok(HttpResponse::Ok().json(DeleteQuizResponse { id, deleted: true }))
}
