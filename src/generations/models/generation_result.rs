use serde::Serialize;

use super::generation_params::GenerationParams;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub url: String,
    pub seed: i64,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    pub width: u32,
    pub height: u32,
    pub model: String,
}

impl GenerationResult {
    pub fn from_params(url: &str, params: &GenerationParams) -> GenerationResult {
        return GenerationResult {
            url: url.to_string(),
            seed: params.seed,
            prompt: params.prompt.to_string(),
            negative_prompt: params.negative_prompt.clone(),
            width: params.width,
            height: params.height,
            model: params.model.to_string(),
        };
    }
}
