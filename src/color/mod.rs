//! Color values and sampling
//!
//! This module holds the 8-bit RGB color type with its hex and distance
//! helpers, and the sampler that reduces an image patch to one
//! representative color.

pub mod rgb;
pub mod sampler;

pub use rgb::Rgb;
pub use sampler::{ColorSampler, PixelBuffer, RawPixels, SamplingRegion};
