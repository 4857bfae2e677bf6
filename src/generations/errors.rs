use axum::http::StatusCode;
use validator::ValidationErrors;

use crate::app::models::api_error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationsApiError {
    PromptRequired,
    ApiKeyRequired,
    RateLimited,
    InvalidApiKey,
    GenerationFailed,
    PredictionFailed(Option<String>),
    PredictionCanceled,
    TimedOut,
    Unexpected(String),
}

impl GenerationsApiError {
    pub fn value(&self) -> ApiError {
        match self {
            Self::PromptRequired => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Prompt is required.".to_string(),
            },
            Self::ApiKeyRequired => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "API key is required.".to_string(),
            },
            Self::RateLimited => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Rate limit exceeded. Please wait a moment and try again.".to_string(),
            },
            Self::InvalidApiKey => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Invalid API key. Please check your Replicate API token.".to_string(),
            },
            Self::GenerationFailed => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Image generation failed.".to_string(),
            },
            Self::PredictionFailed(Some(error)) => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Generation failed: {}", error),
            },
            Self::PredictionFailed(None) => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Generation failed.".to_string(),
            },
            Self::PredictionCanceled => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Generation was canceled.".to_string(),
            },
            Self::TimedOut => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Generation timed out.".to_string(),
            },
            Self::Unexpected(message) => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: message.to_string(),
            },
        }
    }

    /// Maps upstream error text onto a user-facing error.
    ///
    /// Matching is on vendor wording, so a change in the upstream phrasing
    /// degrades to `GenerationFailed` rather than failing differently.
    pub fn from_upstream_text(text: &str) -> Self {
        let text = text.to_lowercase();

        if text.contains("rate limit") {
            Self::RateLimited
        } else if text.contains("invalid token") {
            Self::InvalidApiKey
        } else {
            Self::GenerationFailed
        }
    }

    /// The prompt is checked before the credential.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let fields = errors.field_errors();

        if fields.contains_key("prompt") {
            Self::PromptRequired
        } else if fields.contains_key("api_key") {
            Self::ApiKeyRequired
        } else {
            Self::Unexpected(errors.to_string())
        }
    }
}
