use rand::Rng;

use crate::generations::{
    apis::replicate::enums::replicate_model_version::ReplicateModelVersion,
    dtos::generate_dto::GenerateDto,
};

pub const DEFAULT_DIMENSION: u32 = 1024;
pub const DEFAULT_NUM_OUTPUTS: u32 = 1;
pub const DEFAULT_ASPECT_RATIO: &str = "1:1";
pub const DEFAULT_LORA_SCALE: f64 = 1.0;
pub const MAX_RANDOM_SEED: i64 = 1_000_000;

/// A generation request with every default resolved.
///
/// The same value feeds the upstream input and every echoed result, so callers
/// always see exactly what was submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub width: u32,
    pub height: u32,
    pub seed: i64,
    pub num_outputs: u32,
    pub aspect_ratio: String,
    pub lora_weights: Option<String>,
    pub lora_scale: f64,
    pub model_version: String,
    pub model: String,
}

impl GenerationParams {
    pub fn from_dto(dto: &GenerateDto) -> Self {
        let model_version = dto
            .model_version
            .clone()
            .filter(|version| !version.is_empty())
            .unwrap_or(ReplicateModelVersion::FLUX_DEV_LORA.to_string());

        Self {
            prompt: dto.prompt.clone().unwrap_or_default(),
            negative_prompt: dto.negative_prompt.clone().filter(|n| !n.is_empty()),
            width: dto.width.unwrap_or(DEFAULT_DIMENSION),
            height: dto.height.unwrap_or(DEFAULT_DIMENSION),
            seed: dto
                .seed
                .unwrap_or_else(|| rand::thread_rng().gen_range(0..MAX_RANDOM_SEED)),
            num_outputs: dto.num_outputs.unwrap_or(DEFAULT_NUM_OUTPUTS),
            aspect_ratio: dto
                .aspect_ratio
                .clone()
                .unwrap_or(DEFAULT_ASPECT_RATIO.to_string()),
            lora_weights: dto.lora_weights.clone().filter(|w| !w.is_empty()),
            lora_scale: dto.lora_scale.unwrap_or(DEFAULT_LORA_SCALE),
            model: dto.model.clone().unwrap_or(model_version.to_string()),
            model_version,
        }
    }
}
