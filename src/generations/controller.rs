use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    app::models::{
        api_error::ApiError, api_response::ApiResponse, json_from_request::JsonFromRequest,
    },
    AppState,
};

use super::{
    dtos::generate_dto::GenerateDto, errors::GenerationsApiError,
    models::generation_result::GenerationResult, service,
};

pub async fn generate(
    State(state): State<AppState>,
    JsonFromRequest(dto): JsonFromRequest<GenerateDto>,
) -> Result<Json<ApiResponse<Vec<GenerationResult>>>, ApiError> {
    let dto = dto.sanitized();
    dto.validate()
        .map_err(|e| GenerationsApiError::from_validation(&e).value())?;

    Ok(Json(service::generate(&dto, &state).await?.into()))
}

/// CORS preflight: answered without touching the body.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
