pub mod client;
pub mod keyselect;

pub use client::{AspectRatio, GenClient, GenerateImageOptions, GeneratedImage};
pub use keyselect::{AmbientKeySelection, KeySelection};
