use serde::Serialize;

use crate::generations::models::generation_params::GenerationParams;

#[derive(Debug, Serialize)]
pub struct InputSpec {
    pub version: String,
    pub input: InputFluxLora,
}

#[derive(Debug, Serialize)]
pub struct InputFluxLora {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    pub width: u32,
    pub height: u32,
    pub seed: i64,
    pub num_outputs: u32,
    pub aspect_ratio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lora_weights: Option<String>,
    pub lora_scale: f64,
}

impl InputSpec {
    pub fn from_params(params: &GenerationParams) -> InputSpec {
        InputSpec {
            version: params.model_version.to_string(),
            input: InputFluxLora {
                prompt: params.prompt.to_string(),
                negative_prompt: params.negative_prompt.clone(),
                width: params.width,
                height: params.height,
                seed: params.seed,
                num_outputs: params.num_outputs,
                aspect_ratio: params.aspect_ratio.to_string(),
                lora_weights: params.lora_weights.clone(),
                lora_scale: params.lora_scale,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn omits_absent_optional_inputs() {
        let params = GenerationParams {
            prompt: "a lighthouse".to_string(),
            negative_prompt: None,
            width: 1024,
            height: 1024,
            seed: 7,
            num_outputs: 1,
            aspect_ratio: "1:1".to_string(),
            lora_weights: None,
            lora_scale: 1.0,
            model_version: "v1".to_string(),
            model: "v1".to_string(),
        };

        let value = serde_json::to_value(InputSpec::from_params(&params)).unwrap();

        assert_eq!(
            value,
            json!({
                "version": "v1",
                "input": {
                    "prompt": "a lighthouse",
                    "width": 1024,
                    "height": 1024,
                    "seed": 7,
                    "num_outputs": 1,
                    "aspect_ratio": "1:1",
                    "lora_scale": 1.0
                }
            })
        );
    }
}
