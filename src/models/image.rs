use crate::{
    config::StylePreset,
    error::{ImageGenError, Result},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

pub const IMAGE_WIDTH: u32 = 1024;
pub const IMAGE_HEIGHT: u32 = 1024;
pub const IMAGES_PER_REQUEST: u32 = 1;
pub const DEFAULT_NEGATIVE_PROMPT: &str = "low quality, blurry, malformed";
pub const MODEL_LABEL: &str = "SiliconFlow-v2";
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Body of the POST to the images/generations endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub negative_prompt: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    #[serde(rename = "style_preset")]
    pub style: StylePreset,
    pub num_images: u32,
}

#[derive(Debug, Deserialize)]
pub struct ImageGenerationResponse {
    pub data: Option<Vec<ImageData>>,
}

/// Loosely typed so an odd `seed` or `b64_json` never hides a usable entry.
#[derive(Debug, Deserialize)]
pub struct ImageData {
    pub b64_json: Option<serde_json::Value>,
    pub seed: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub model: String,
    pub steps: u32,
    pub style: StylePreset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// `data:image/png;base64,...`
    pub url: String,
    pub seed: u64,
    pub metadata: GenerationMetadata,
}

impl GenerationResult {
    pub fn base64_payload(&self) -> &str {
        self.url
            .strip_prefix(DATA_URI_PREFIX)
            .or_else(|| self.url.split_once(',').map(|(_, payload)| payload))
            .unwrap_or(&self.url)
    }

    pub fn image_bytes(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.base64_payload())
            .map_err(|e| ImageGenError::ImageDecode(e.to_string()))
    }
}
