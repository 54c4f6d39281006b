use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::dto::generate_dto::{
    ExplainPayload, ExplainResponse, PassagePayload, PdfUploadForm, TopicPayload, WebpagePayload,
};
use crate::models::{generation::Mode, question::Question, quiz::Quiz};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::generate::generate_from_topic,
        crate::routes::generate::generate_from_passage,
        crate::routes::generate::generate_from_webpage,
        crate::routes::generate::generate_from_pdf,
        crate::routes::explain::explain_answer,
        crate::routes::health::healthz,
    ),
    components(schemas(
        Mode,
        Question,
        Quiz,
        TopicPayload,
        PassagePayload,
        WebpagePayload,
        PdfUploadForm,
        ExplainPayload,
        ExplainResponse,
    )),
    tags((name = "quizgen", description = "Quiz generation and answer explanations"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
