use siliconflow_imagegen::{
    logger::{self, LogLevel, LoggerConfig},
    GenerationConfig, GeneratorRegistry, ImageGenerator, SiliconFlowImageGenerator,
};
use std::env;
use std::fs;
use std::sync::Arc;

/// Host-side registry for the demo; a real host brings its own.
#[derive(Default)]
struct DemoRegistry {
    generators: Vec<Arc<dyn ImageGenerator>>,
}

impl GeneratorRegistry for DemoRegistry {
    fn register(&mut self, generator: Arc<dyn ImageGenerator>) {
        self.generators.push(generator);
    }
}

impl DemoRegistry {
    fn get(&self, id: &str) -> Option<Arc<dyn ImageGenerator>> {
        self.generators.iter().find(|g| g.id() == id).cloned()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(LoggerConfig::development().with_level(LogLevel::Debug))?;

    if dotenv_loaded {
        log::info!(".env file loaded");
    } else {
        log::warn!("No .env file found, using system environment variables");
    }

    let mut args = env::args().skip(1);
    let prompt = args
        .next()
        .unwrap_or_else(|| "A serene landscape with mountains and a lake at sunset".to_string());
    let negative_prompt = args.next();

    let mut config = GenerationConfig::new();
    match env::var("SILICONFLOW_API_KEY") {
        Ok(key) => config = config.with_api_key(key),
        Err(_) => log::warn!("SILICONFLOW_API_KEY not set; the API will reject the request"),
    }
    if let Ok(endpoint) = env::var("SILICONFLOW_ENDPOINT") {
        config = config.with_endpoint(endpoint);
    }

    let mut registry = DemoRegistry::default();
    Arc::new(SiliconFlowImageGenerator::new(config)?).register(&mut registry);

    let generator = registry
        .get("SiliconFlow")
        .ok_or("SiliconFlow generator was not registered")?;
    log::info!("Using generator: {}", generator.display_name());

    let result = generator
        .generate_image(&prompt, negative_prompt.as_deref())
        .await?;

    log::info!("Model: {}", result.metadata.model);
    log::info!("Seed: {}", result.seed);

    let image_bytes = result.image_bytes()?;
    let filename = format!("generated_image_{}.png", result.seed);
    fs::write(&filename, image_bytes)?;
    log::info!("Image saved to: {}", filename);

    Ok(())
}
