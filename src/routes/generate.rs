use crate::{
    dto::generate_dto::{default_cognitive_level, PassagePayload, TopicPayload, WebpagePayload},
    error::{Error, Result},
    models::generation::{GenerationRequest, Mode, QuizSource},
    AppState,
};
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use validator::Validate;

#[utoipa::path(
    post,
    path = "/generate/topic",
    request_body = TopicPayload,
    responses(
        (status = 200, description = "Quiz envelope, possibly empty with an error message", body = crate::models::quiz::Quiz),
        (status = 400, description = "Invalid request payload"),
        (status = 429, description = "Rate limit exceeded"),
    ),
)]
#[axum::debug_handler]
pub async fn generate_from_topic(
    State(state): State<AppState>,
    Json(payload): Json<TopicPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let request = GenerationRequest {
        source: QuizSource::Topic(payload.topic),
        mode: payload.mode,
        cognitive_level: payload.cognitive_level,
        num_questions: state.clamp_questions(payload.num_questions),
    };
    Ok(Json(state.quiz_service.generate(request).await))
}

#[utoipa::path(
    post,
    path = "/generate/passage",
    request_body = PassagePayload,
    responses(
        (status = 200, description = "Quiz envelope, possibly empty with an error message", body = crate::models::quiz::Quiz),
        (status = 400, description = "Invalid request payload"),
        (status = 429, description = "Rate limit exceeded"),
    ),
)]
#[axum::debug_handler]
pub async fn generate_from_passage(
    State(state): State<AppState>,
    Json(payload): Json<PassagePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let request = GenerationRequest {
        source: QuizSource::Passage(payload.passage),
        mode: payload.mode,
        cognitive_level: payload.cognitive_level,
        num_questions: state.clamp_questions(payload.num_questions),
    };
    Ok(Json(state.quiz_service.generate(request).await))
}

#[utoipa::path(
    post,
    path = "/generate/webpage",
    request_body = WebpagePayload,
    responses(
        (status = 200, description = "Quiz envelope; fetch failures are reported in `error`", body = crate::models::quiz::Quiz),
        (status = 400, description = "Invalid request payload"),
        (status = 429, description = "Rate limit exceeded"),
    ),
)]
#[axum::debug_handler]
pub async fn generate_from_webpage(
    State(state): State<AppState>,
    Json(payload): Json<WebpagePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let request = GenerationRequest {
        source: QuizSource::Webpage(payload.url),
        mode: payload.mode,
        cognitive_level: payload.cognitive_level,
        num_questions: state.clamp_questions(payload.num_questions),
    };
    Ok(Json(state.quiz_service.generate(request).await))
}

#[utoipa::path(
    post,
    path = "/generate/pdf",
    request_body(content = crate::dto::generate_dto::PdfUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Quiz envelope titled after the uploaded file", body = crate::models::quiz::Quiz),
        (status = 400, description = "Missing file or invalid form fields"),
        (status = 413, description = "Upload too large"),
        (status = 429, description = "Rate limit exceeded"),
    ),
)]
#[axum::debug_handler]
pub async fn generate_from_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut file = None;
    let mut mode = None;
    let mut cognitive_level = None;
    let mut num_questions = None;

    while let Some(field) = multipart.next_field().await.map_err(Error::Multipart)? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "file" => {
                let filename = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(Error::Multipart)?;
                file = Some((filename, bytes));
            }
            "mode" => {
                let raw = field.text().await.map_err(Error::Multipart)?;
                mode = Some(raw.parse::<Mode>().map_err(Error::BadRequest)?);
            }
            "cognitive_level" => {
                let raw = field.text().await.map_err(Error::Multipart)?;
                if !raw.trim().is_empty() {
                    cognitive_level = Some(raw.trim().to_string());
                }
            }
            "num_questions" => {
                let raw = field.text().await.map_err(Error::Multipart)?;
                let n = raw.trim().parse::<usize>().map_err(|_| {
                    Error::BadRequest(format!("num_questions must be a positive integer, got '{}'", raw))
                })?;
                num_questions = Some(n);
            }
            _ => {}
        }
    }

    let (filename, bytes) = file.ok_or_else(|| Error::BadRequest("PDF file is required".into()))?;
    let mode = mode.ok_or_else(|| Error::BadRequest("mode is required".into()))?;
    let num_questions = num_questions
        .filter(|n| *n >= 1)
        .ok_or_else(|| Error::BadRequest("num_questions must be at least 1".into()))?;

    let request = GenerationRequest {
        source: QuizSource::Pdf { filename, bytes },
        mode,
        cognitive_level: cognitive_level.unwrap_or_else(default_cognitive_level),
        num_questions: state.clamp_questions(num_questions),
    };
    Ok(Json(state.quiz_service.generate(request).await))
}
