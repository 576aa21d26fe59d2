pub mod image;
pub mod settings;

pub use image::*;
pub use settings::*;
