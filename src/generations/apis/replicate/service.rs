use reqwest::header::{self, HeaderValue};
use tokio::time::sleep;
use tokio_retry::{strategy::FixedInterval, RetryIf};

use crate::{
    app::{env::Envy, models::api_error::ApiError},
    generations::{
        errors::GenerationsApiError,
        models::{generation_params::GenerationParams, generation_result::GenerationResult},
    },
};

use super::{
    enums::replicate_prediction_status::ReplicatePredictionStatus, models::input_spec::InputSpec,
    structs::replicate_predictions_response::ReplicatePredictionsResponse,
};

/// Outcome of a single poll that did not yield a succeeded prediction.
#[derive(Debug)]
enum PollError {
    Pending(ReplicatePredictionStatus),
    Transient,
    Failed(Option<String>),
    Canceled,
}

impl PollError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Pending(_) | Self::Transient)
    }
}

/// Submits one prediction, waits for it to finish and maps its output to results.
pub async fn generate_images(
    params: &GenerationParams,
    replicate_api_key: &str,
    envy: &Envy,
) -> Result<Vec<GenerationResult>, ApiError> {
    let client = provide_client(envy)?;
    let prediction = await_prediction_completion(&client, params, replicate_api_key, envy).await?;

    let urls = prediction.output_urls();
    if urls.is_empty() {
        tracing::warn!("prediction {} succeeded without usable output", prediction.id);
    }

    if let Some(predict_time) = prediction.metrics.as_ref().and_then(|m| m.predict_time) {
        tracing::info!(
            "prediction {} produced {} images in {}s",
            prediction.id,
            urls.len(),
            predict_time
        );
    }

    Ok(urls
        .iter()
        .map(|url| GenerationResult::from_params(url, params))
        .collect())
}

async fn await_prediction_completion(
    client: &reqwest::Client,
    params: &GenerationParams,
    replicate_api_key: &str,
    envy: &Envy,
) -> Result<ReplicatePredictionsResponse, ApiError> {
    let api_url = envy.replicate_api_url();
    let input_spec = InputSpec::from_params(params);

    let prediction = create_prediction(client, &input_spec, replicate_api_key, api_url).await?;
    tracing::debug!(
        "created prediction {} ({})",
        prediction.id,
        prediction.status.value()
    );

    let id = prediction.id.as_str();
    let wait_time = envy.poll_interval();
    let max_attempts = envy.max_poll_attempts();

    // the first poll happens after one interval, the remaining ones are spaced by the strategy
    let retry_strategy = FixedInterval::new(wait_time).take(max_attempts as usize - 1);
    let mut attempt: u32 = 0;

    sleep(wait_time).await;
    let result = RetryIf::spawn(
        retry_strategy,
        move || {
            attempt += 1;
            poll_prediction(client, id, attempt, replicate_api_key, api_url)
        },
        PollError::is_retryable,
    )
    .await;

    match result {
        Ok(prediction) => Ok(prediction),
        Err(PollError::Failed(error)) => {
            tracing::error!("prediction {} failed: {:?}", id, error);
            Err(GenerationsApiError::PredictionFailed(error).value())
        }
        Err(PollError::Canceled) => {
            tracing::error!("prediction {} was canceled", id);
            Err(GenerationsApiError::PredictionCanceled.value())
        }
        Err(e) => {
            tracing::error!(
                "prediction {} ran out of time after {} polls (last: {:?})",
                id,
                max_attempts,
                e
            );
            Err(GenerationsApiError::TimedOut.value())
        }
    }
}

async fn poll_prediction(
    client: &reqwest::Client,
    id: &str,
    attempt: u32,
    replicate_api_key: &str,
    api_url: &str,
) -> Result<ReplicatePredictionsResponse, PollError> {
    tracing::debug!("checking prediction {} (attempt {})", id, attempt);

    let Ok(prediction) = get_prediction_by_id(client, id, replicate_api_key, api_url).await
    else {
        return Err(PollError::Transient);
    };

    match prediction.status {
        ReplicatePredictionStatus::Succeeded => Ok(prediction),
        ReplicatePredictionStatus::Failed => Err(PollError::Failed(prediction.error_message())),
        ReplicatePredictionStatus::Canceled => Err(PollError::Canceled),
        status => {
            tracing::debug!("prediction {} is {}", id, status.value());
            Err(PollError::Pending(status))
        }
    }
}

async fn create_prediction(
    client: &reqwest::Client,
    input_spec: &InputSpec,
    replicate_api_key: &str,
    api_url: &str,
) -> Result<ReplicatePredictionsResponse, ApiError> {
    let headers = provide_headers(replicate_api_key)?;
    let url = format!("{}/predictions", api_url);

    let result = client
        .post(url)
        .headers(headers)
        .json(input_spec)
        .send()
        .await;

    let res = match result {
        Ok(res) => res,
        Err(e) => {
            tracing::warn!("create_prediction (1): {}", e);
            return Err(GenerationsApiError::Unexpected(e.to_string()).value());
        }
    };

    let status = res.status();
    let text = match res.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("create_prediction (2): {}", e);
            return Err(GenerationsApiError::Unexpected(e.to_string()).value());
        }
    };

    if !status.is_success() {
        tracing::warn!("create_prediction rejected with {}: {}", status, text);
        return Err(GenerationsApiError::from_upstream_text(&text).value());
    }

    match serde_json::from_str(&text) {
        Ok(replicate_predictions_response) => Ok(replicate_predictions_response),
        Err(e) => {
            tracing::warn!("create_prediction (3): {} {:?}", e, text);
            Err(GenerationsApiError::Unexpected(
                "Failed to parse prediction response.".to_string(),
            )
            .value())
        }
    }
}

async fn get_prediction_by_id(
    client: &reqwest::Client,
    id: &str,
    replicate_api_key: &str,
    api_url: &str,
) -> Result<ReplicatePredictionsResponse, ApiError> {
    let headers = provide_headers(replicate_api_key)?;
    let url = format!("{}/predictions/{}", api_url, id);

    let result = client.get(url).headers(headers).send().await;

    match result {
        Ok(res) if res.status().is_success() => match res.text().await {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(replicate_predictions_response) => Ok(replicate_predictions_response),
                Err(_) => {
                    tracing::warn!("get_prediction_by_id (1): {:?}", text);
                    Err(GenerationsApiError::GenerationFailed.value())
                }
            },
            Err(e) => {
                tracing::warn!("get_prediction_by_id (2): {:?}", e);
                Err(GenerationsApiError::GenerationFailed.value())
            }
        },
        Ok(res) => {
            tracing::warn!("get_prediction_by_id (3): status {}", res.status());
            Err(GenerationsApiError::GenerationFailed.value())
        }
        Err(e) => {
            tracing::warn!("get_prediction_by_id (4): {:?}", e);
            Err(GenerationsApiError::GenerationFailed.value())
        }
    }
}

fn provide_client(envy: &Envy) -> Result<reqwest::Client, ApiError> {
    match reqwest::Client::builder()
        .timeout(envy.request_timeout())
        .build()
    {
        Ok(client) => Ok(client),
        Err(e) => {
            tracing::error!("provide_client: {}", e);
            Err(GenerationsApiError::Unexpected(e.to_string()).value())
        }
    }
}

fn provide_headers(replicate_api_key: &str) -> Result<header::HeaderMap, ApiError> {
    let Ok(mut authorization) = HeaderValue::from_str(&format!("Bearer {}", replicate_api_key))
    else {
        return Err(GenerationsApiError::InvalidApiKey.value());
    };
    authorization.set_sensitive(true);

    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::AUTHORIZATION, authorization);

    Ok(headers)
}
