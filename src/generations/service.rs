use tracing::Instrument;
use uuid::Uuid;

use crate::{
    app::{models::api_error::ApiError, util::redact::mask_secret},
    AppState,
};

use super::{
    apis::replicate,
    dtos::generate_dto::GenerateDto,
    errors::GenerationsApiError,
    models::{generation_params::GenerationParams, generation_result::GenerationResult},
};

/// Runs one generation end to end. Every call submits its own prediction.
pub async fn generate(
    dto: &GenerateDto,
    state: &AppState,
) -> Result<Vec<GenerationResult>, ApiError> {
    let Some(replicate_api_key) = dto.api_key.as_deref().filter(|key| !key.is_empty())
    else {
        return Err(GenerationsApiError::ApiKeyRequired.value());
    };

    let params = GenerationParams::from_dto(dto);
    let span = tracing::info_span!("generate", request_id = %Uuid::new_v4());

    async move {
        tracing::info!(
            "generating {} images with {} (seed {}, key {})",
            params.num_outputs,
            params.model_version,
            params.seed,
            mask_secret(replicate_api_key)
        );

        match replicate::service::generate_images(&params, replicate_api_key, &state.envy).await {
            Ok(results) => {
                tracing::info!("generated {} images", results.len());
                Ok(results)
            }
            Err(e) => {
                tracing::error!("generate failed: {}", e.message);
                Err(e)
            }
        }
    }
    .instrument(span)
    .await
}
