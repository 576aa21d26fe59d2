use super::SiliconFlowImageGenerator;
use crate::{
    config::GenerationConfig,
    error::{ImageGenError, Result},
    logger,
    models::{
        GenerationMetadata, GenerationRequest, GenerationResult, ImageGenerationResponse,
        DATA_URI_PREFIX, DEFAULT_NEGATIVE_PROMPT, IMAGES_PER_REQUEST, IMAGE_HEIGHT, IMAGE_WIDTH,
        MODEL_LABEL,
    },
    retry::RetryPolicy,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

impl SiliconFlowImageGenerator {
    pub fn build_request(&self, prompt: &str, negative_prompt: Option<&str>) -> GenerationRequest {
        build_request(&self.config(), prompt, negative_prompt)
    }

    pub async fn perform_request(&self, request: &GenerationRequest) -> Result<Value> {
        self.perform_request_with(&self.config(), request).await
    }

    pub fn parse_response(&self, response: &Value) -> Result<GenerationResult> {
        parse_response(&self.config(), response)
    }

    /// Builds the request, posts it with retry and decodes the first image.
    /// Every failure comes back as [`ImageGenError::GenerationFailed`].
    pub async fn generate_image(
        &self,
        prompt: &str,
        negative_prompt: Option<&str>,
    ) -> Result<GenerationResult> {
        let request_id = Uuid::new_v4();
        let config = self.config();
        let _timer = logger::timer(format!("[req:{}] generation", request_id));

        log::info!(
            "[req:{}] Generating image: steps={}, style={}",
            request_id,
            config.default_steps,
            config.default_style
        );

        let request = build_request(&config, prompt, negative_prompt);
        let outcome = self
            .perform_request_with(&config, &request)
            .await
            .and_then(|response| parse_response(&config, &response));

        match outcome {
            Ok(result) => {
                log::info!("[req:{}] Image generated, seed={}", request_id, result.seed);
                Ok(result)
            }
            Err(e) => {
                log::error!("[req:{}] SiliconFlow generation failed: {}", request_id, e);
                Err(ImageGenError::generation_failed(e))
            }
        }
    }

    async fn perform_request_with(
        &self,
        config: &GenerationConfig,
        request: &GenerationRequest,
    ) -> Result<Value> {
        let body = serde_json::to_value(request)
            .map_err(|e| ImageGenError::SerializationError(e.to_string()))?;
        let policy = RetryPolicy::new(config.retry_count, config.retry_delay);

        policy
            .run(self.delay.as_ref(), |attempt| {
                log::debug!("POST attempt {}/{} to {}", attempt, policy.attempts(), config.endpoint);
                self.transport
                    .post_json(&config.endpoint, &config.api_key, &body)
            })
            .await
    }
}

pub fn build_request(
    config: &GenerationConfig,
    prompt: &str,
    negative_prompt: Option<&str>,
) -> GenerationRequest {
    let negative_prompt = negative_prompt
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_NEGATIVE_PROMPT);

    GenerationRequest {
        prompt: prompt.to_string(),
        negative_prompt: negative_prompt.to_string(),
        width: IMAGE_WIDTH,
        height: IMAGE_HEIGHT,
        steps: config.default_steps,
        style: config.default_style,
        num_images: IMAGES_PER_REQUEST,
    }
}

pub fn parse_response(config: &GenerationConfig, response: &Value) -> Result<GenerationResult> {
    let parsed = ImageGenerationResponse::deserialize(response)
        .map_err(|e| ImageGenError::MalformedResponse(e.to_string()))?;

    let first = parsed
        .data
        .and_then(|data| data.into_iter().next())
        .ok_or_else(|| ImageGenError::MalformedResponse("missing or empty data list".into()))?;

    let image_data = first
        .b64_json
        .as_ref()
        .and_then(Value::as_str)
        .filter(|b64| !b64.is_empty())
        .ok_or(ImageGenError::MissingImageData)?;

    let seed = first
        .seed
        .as_ref()
        .and_then(Value::as_u64)
        .unwrap_or_else(current_timestamp_millis);

    Ok(GenerationResult {
        url: format!("{}{}", DATA_URI_PREFIX, image_data),
        seed,
        metadata: GenerationMetadata {
            model: MODEL_LABEL.to_string(),
            steps: config.default_steps,
            style: config.default_style,
        },
    })
}

fn current_timestamp_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}
