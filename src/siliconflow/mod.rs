pub mod image_client;
pub mod settings;

use crate::{
    config::GenerationConfig,
    error::Result,
    generator::{GeneratorRegistry, ImageGenerator},
    models::{GenerationResult, SettingsForm},
    retry::{Delay, TokioDelay},
    transport::{ReqwestTransport, Transport},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

pub const GENERATOR_ID: &str = "SiliconFlow";
pub const GENERATOR_NAME: &str = "SiliconFlow Image";

pub struct SiliconFlowImageGenerator {
    config: RwLock<GenerationConfig>,
    transport: Arc<dyn Transport>,
    delay: Arc<dyn Delay>,
}

impl SiliconFlowImageGenerator {
    pub fn new(config: GenerationConfig) -> Result<Self> {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Fails with `InvalidSettings` when the config is out of range, the
    /// same checks the settings form applies.
    pub fn with_transport(config: GenerationConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: RwLock::new(config),
            transport,
            delay: Arc::new(TokioDelay),
        })
    }

    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    /// Snapshot of the current configuration. Each generation works on its
    /// own snapshot, so a settings change never affects a call in flight.
    pub fn config(&self) -> GenerationConfig {
        match self.config.read() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Registers a shared handle of this generator with the host registry.
    pub fn register(self: Arc<Self>, registry: &mut dyn GeneratorRegistry) {
        log::info!("Registering image generator: {}", GENERATOR_ID);
        registry.register(self);
    }
}

#[async_trait]
impl ImageGenerator for SiliconFlowImageGenerator {
    fn id(&self) -> &str {
        GENERATOR_ID
    }

    fn display_name(&self) -> &str {
        GENERATOR_NAME
    }

    async fn generate_image(
        &self,
        prompt: &str,
        negative_prompt: Option<&str>,
    ) -> Result<GenerationResult> {
        SiliconFlowImageGenerator::generate_image(self, prompt, negative_prompt).await
    }

    fn settings_view(&self) -> SettingsForm {
        SiliconFlowImageGenerator::settings_view(self)
    }
}
