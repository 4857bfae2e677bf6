use std::fmt;

use serde::Deserialize;
use validator::Validate;

use crate::app::util::redact::mask_secret;

#[derive(Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDto {
    #[validate(required, length(min = 1))]
    pub prompt: Option<String>,
    pub negative_prompt: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub seed: Option<i64>,
    pub num_outputs: Option<u32>,
    pub aspect_ratio: Option<String>,
    pub lora_weights: Option<String>,
    pub lora_scale: Option<f64>,
    pub model_version: Option<String>,
    pub model: Option<String>,
    #[validate(required, length(min = 1))]
    pub api_key: Option<String>,
}

impl GenerateDto {
    pub fn sanitized(&self) -> Self {
        Self {
            prompt: self
                .prompt
                .as_ref()
                .map(|prompt| prompt.trim().to_string()),
            api_key: self.api_key.as_ref().map(|key| key.trim().to_string()),
            ..self.clone()
        }
    }
}

// The credential must never reach logs through `{:?}`.
impl fmt::Debug for GenerateDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerateDto")
            .field("prompt", &self.prompt)
            .field("negative_prompt", &self.negative_prompt)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("seed", &self.seed)
            .field("num_outputs", &self.num_outputs)
            .field("aspect_ratio", &self.aspect_ratio)
            .field("lora_weights", &self.lora_weights)
            .field("lora_scale", &self.lora_scale)
            .field("model_version", &self.model_version)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_deref().map(mask_secret))
            .finish()
    }
}
