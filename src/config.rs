use crate::error::{ImageGenError, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.siliconflow.cn/v1/images/generations";
pub const DEFAULT_STEPS: u32 = 50;
pub const MIN_STEPS: u32 = 20;
pub const MAX_STEPS: u32 = 150;
pub const DEFAULT_RETRY_COUNT: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StylePreset {
    #[default]
    DigitalArt,
    Photographic,
    FantasyArt,
}

impl StylePreset {
    pub const ALL: [StylePreset; 3] = [
        StylePreset::DigitalArt,
        StylePreset::Photographic,
        StylePreset::FantasyArt,
    ];

    /// Token sent as `style_preset` on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            StylePreset::DigitalArt => "digital-art",
            StylePreset::Photographic => "photographic",
            StylePreset::FantasyArt => "fantasy-art",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StylePreset::DigitalArt => "Digital art",
            StylePreset::Photographic => "Photographic",
            StylePreset::FantasyArt => "Fantasy art",
        }
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StylePreset {
    type Err = ImageGenError;

    fn from_str(s: &str) -> Result<Self> {
        StylePreset::ALL
            .iter()
            .copied()
            .find(|style| style.as_str() == s.trim())
            .ok_or_else(|| ImageGenError::InvalidSettings(format!("Unknown style: {}", s)))
    }
}

#[derive(Clone)]
pub struct GenerationConfig {
    pub api_key: SecretString,
    pub endpoint: String,
    pub default_steps: u32,
    pub default_style: StylePreset,
    pub retry_count: u32,
    pub retry_delay: Duration,
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("api_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("default_steps", &self.default_steps)
            .field("default_style", &self.default_style)
            .field("retry_count", &self.retry_count)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            api_key: SecretString::from(String::new()),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_steps: DEFAULT_STEPS,
            default_style: StylePreset::default(),
            retry_count: DEFAULT_RETRY_COUNT,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = SecretString::from(api_key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.default_steps = steps;
        self
    }

    pub fn with_style(mut self, style: StylePreset) -> Self {
        self.default_style = style;
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_STEPS..=MAX_STEPS).contains(&self.default_steps) {
            return Err(ImageGenError::InvalidSettings(format!(
                "default_steps must be between {} and {}, got {}",
                MIN_STEPS, MAX_STEPS, self.default_steps
            )));
        }
        if self.retry_count == 0 {
            return Err(ImageGenError::InvalidSettings(
                "retry_count must be at least 1".into(),
            ));
        }
        if self.endpoint.trim().is_empty() {
            return Err(ImageGenError::InvalidSettings("endpoint is empty".into()));
        }
        Ok(())
    }

    /// Applies values submitted from the settings form.
    ///
    /// Recognised keys are `api_key`, `default_steps` and `default_style`;
    /// anything else is ignored. Either every value is applied or, on error,
    /// none of them is.
    pub fn apply_settings(&mut self, values: &HashMap<String, String>) -> Result<()> {
        let mut updated = self.clone();

        if let Some(api_key) = values.get("api_key") {
            updated.api_key = SecretString::from(api_key.trim().to_string());
        }

        if let Some(steps) = values.get("default_steps") {
            updated.default_steps = steps.trim().parse().map_err(|_| {
                ImageGenError::InvalidSettings(format!("default_steps is not an integer: {}", steps))
            })?;
        }

        if let Some(style) = values.get("default_style") {
            updated.default_style = style.parse()?;
        }

        updated.validate()?;
        *self = updated;

        log::info!(
            "Settings updated: steps={}, style={}",
            self.default_steps,
            self.default_style
        );
        Ok(())
    }
}
