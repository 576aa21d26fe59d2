use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageGenError {
    /// Non-2xx status, transport failure or an undecodable response body.
    #[error("Network failure: {message}")]
    NetworkFailure {
        status: Option<u16>,
        message: String,
    },

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("No image data found in API response")]
    MissingImageData,

    #[error("Image generation failed: {message}")]
    GenerationFailed {
        message: String,
        #[source]
        source: Box<ImageGenError>,
    },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Image decode error: {0}")]
    ImageDecode(String),
}

impl ImageGenError {
    pub fn http_status(status: u16) -> Self {
        ImageGenError::NetworkFailure {
            status: Some(status),
            message: format!("HTTP {}", status),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ImageGenError::NetworkFailure {
            status: None,
            message: message.into(),
        }
    }

    /// Wraps any failure into the umbrella error callers observe.
    pub fn generation_failed(cause: ImageGenError) -> Self {
        ImageGenError::GenerationFailed {
            message: cause.to_string(),
            source: Box::new(cause),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ImageGenError::NetworkFailure { .. })
    }

    /// The innermost error, unwrapping `GenerationFailed` layers.
    pub fn root_cause(&self) -> &ImageGenError {
        match self {
            ImageGenError::GenerationFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ImageGenError>;
