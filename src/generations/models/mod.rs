pub mod generation_params;
pub mod generation_result;
