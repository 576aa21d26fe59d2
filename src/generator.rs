use crate::{
    error::Result,
    models::{GenerationResult, SettingsForm},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Capability a host application sees for every image provider.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    fn id(&self) -> &str;

    fn display_name(&self) -> &str;

    async fn generate_image(
        &self,
        prompt: &str,
        negative_prompt: Option<&str>,
    ) -> Result<GenerationResult>;

    fn settings_view(&self) -> SettingsForm;
}

/// Implemented by the host; generators are registered explicitly at startup.
pub trait GeneratorRegistry {
    fn register(&mut self, generator: Arc<dyn ImageGenerator>);
}
