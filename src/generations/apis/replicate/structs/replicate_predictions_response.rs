use serde::Deserialize;
use serde_json::Value;

use crate::generations::apis::replicate::enums::replicate_prediction_status::ReplicatePredictionStatus;

use super::replicate_output::ReplicateOutput;

#[derive(Debug, Deserialize)]
pub struct ReplicatePredictionsResponse {
    pub id: String,
    pub status: ReplicatePredictionStatus,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub logs: Option<String>,
    #[serde(default)]
    pub metrics: Option<ReplicateMetrics>,
}

#[derive(Debug, Deserialize)]
pub struct ReplicateMetrics {
    pub predict_time: Option<f32>,
}

impl ReplicatePredictionsResponse {
    pub fn output_urls(&self) -> Vec<String> {
        match ReplicateOutput::from_value(self.output.as_ref()) {
            Some(output) => output.into_urls(),
            None => vec![],
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match &self.error {
            None | Some(Value::Null) => None,
            Some(Value::String(error)) if error.is_empty() => None,
            Some(Value::String(error)) => Some(error.to_string()),
            Some(error) => Some(error.to_string()),
        }
    }
}
