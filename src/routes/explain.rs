use crate::{
    dto::generate_dto::{ExplainPayload, ExplainResponse},
    error::Result,
    AppState,
};
use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

#[utoipa::path(
    post,
    path = "/explain",
    request_body = ExplainPayload,
    responses(
        (status = 200, description = "Explanation of why the chosen answer is wrong", body = ExplainResponse),
        (status = 400, description = "Invalid request payload"),
        (status = 429, description = "Rate limit exceeded"),
    ),
)]
#[axum::debug_handler]
pub async fn explain_answer(
    State(state): State<AppState>,
    Json(payload): Json<ExplainPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let explanation = state
        .quiz_service
        .explain(&payload.question, &payload.user_answer, &payload.correct_answer)
        .await;
    Ok(Json(ExplainResponse { explanation }))
}
