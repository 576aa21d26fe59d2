//! SiliconFlow image generation adapter.
//!
//! Turns a text prompt into a request for the SiliconFlow images endpoint,
//! posts it with a fixed-delay bounded retry and returns the first image as a
//! `data:` URI ready for display.
//!
//! ```rust,no_run
//! use siliconflow_imagegen::{GenerationConfig, SiliconFlowImageGenerator};
//!
//! # async fn example() -> siliconflow_imagegen::Result<()> {
//! let generator = SiliconFlowImageGenerator::new(
//!     GenerationConfig::new().with_api_key("sk-..."),
//! )?;
//! let image = generator.generate_image("a red fox in the snow", None).await?;
//! println!("seed {}: {} bytes", image.seed, image.image_bytes()?.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod logger;
pub mod models;
pub mod retry;
pub mod siliconflow;
pub mod transport;

pub use config::{GenerationConfig, StylePreset};
pub use error::{ImageGenError, Result};
pub use generator::{GeneratorRegistry, ImageGenerator};
pub use models::{GenerationMetadata, GenerationRequest, GenerationResult, SettingsForm};
pub use retry::{Delay, RetryPolicy, TokioDelay};
pub use siliconflow::SiliconFlowImageGenerator;
pub use transport::{ReqwestTransport, Transport};
