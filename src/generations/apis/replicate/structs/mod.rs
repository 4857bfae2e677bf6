pub mod replicate_output;
pub mod replicate_predictions_response;
