//! Representative color extraction from a rectangular image patch
//!
//! The sampler averages each channel independently over a region of a
//! [`PixelBuffer`]. Regions that stick out of the buffer are clipped to it;
//! only a region with no overlap at all is rejected.

use std::fmt;

use image::{DynamicImage, GenericImageView, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    color::{rgb::clamp_channel, Rgb},
    constants::sampling::{MIN_REGION_SIDE, REGION_FRACTION},
    MatchError, Result,
};

/// Read-only access to a row-major grid of pixels
///
/// Implementors expose only the color channels; alpha is never consulted.
pub trait PixelBuffer {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// RGB of the pixel at column `x`, row `y`
    ///
    /// Callers guarantee `x < width()` and `y < height()`.
    fn rgb_at(&self, x: u32, y: u32) -> [u8; 3];
}

impl PixelBuffer for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }
}

impl PixelBuffer for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        [r, g, b]
    }
}

impl PixelBuffer for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        [r, g, b]
    }
}

impl<T: PixelBuffer + ?Sized> PixelBuffer for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        (**self).rgb_at(x, y)
    }
}

/// Borrowed view over interleaved 8-bit RGB or RGBA bytes
///
/// This is the layout of a browser canvas `ImageData` or a camera frame
/// after decoding: rows top to bottom, pixels left to right, no padding.
#[derive(Debug, Clone, Copy)]
pub struct RawPixels<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    channels: usize,
}

impl<'a> RawPixels<'a> {
    /// View over `width * height * 3` bytes of RGB data
    pub fn from_rgb(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        Self::new(data, width, height, 3)
    }

    /// View over `width * height * 4` bytes of RGBA data
    pub fn from_rgba(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        Self::new(data, width, height, 4)
    }

    fn new(data: &'a [u8], width: u32, height: u32, channels: usize) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| MatchError::InvalidPixelBuffer {
                reason: format!("{width}x{height} image is too large"),
            })?;

        if data.len() != expected {
            return Err(MatchError::InvalidPixelBuffer {
                reason: format!(
                    "{width}x{height} with {channels} channels needs {expected} bytes, got {}",
                    data.len()
                ),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }
}

impl PixelBuffer for RawPixels<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * self.channels;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}

/// Rectangle in pixel coordinates
///
/// The origin may be negative or beyond the image; the sampler clips the
/// rectangle to whatever part overlaps the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingRegion {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl SamplingRegion {
    pub const fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whole-image region
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Square patch centered on a `width` x `height` image
    ///
    /// The side is `fraction` of the shorter dimension, rounded, and never
    /// smaller than `min_side` nor larger than the shorter dimension.
    pub fn centered(width: u32, height: u32, fraction: f64, min_side: u32) -> Self {
        let shorter = width.min(height);
        let side = ((f64::from(shorter) * fraction).round() as u32)
            .max(min_side)
            .min(shorter.max(min_side));
        let x = (i64::from(width) - i64::from(side)) / 2;
        let y = (i64::from(height) - i64::from(side)) / 2;
        Self::new(x, y, side, side)
    }

    /// Default center patch: 20/300 of the shorter dimension, at least 1px
    pub fn default_for(width: u32, height: u32) -> Self {
        Self::centered(width, height, REGION_FRACTION, MIN_REGION_SIDE)
    }

    /// Clip to a `width` x `height` buffer
    ///
    /// Returns `(x0, y0, x1, y1)` with exclusive upper bounds, or `None` if
    /// nothing of the region lies inside the buffer.
    pub fn clip(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.x.saturating_add(i64::from(self.width)).min(i64::from(width));
        let y1 = self.y.saturating_add(i64::from(self.height)).min(i64::from(height));

        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl fmt::Display for SamplingRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(x={}, y={}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Mean-color sampler
///
/// Stateless; one instance can serve any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorSampler;

impl ColorSampler {
    pub fn new() -> Self {
        Self
    }

    /// Average color of `region` within `buffer`
    ///
    /// Each channel mean is rounded half up using exact integer arithmetic,
    /// so 127.5 becomes 128.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::SamplingError` if the region does not overlap
    /// the buffer at all.
    pub fn sample<B: PixelBuffer + ?Sized>(
        &self,
        buffer: &B,
        region: SamplingRegion,
    ) -> Result<Rgb> {
        let (width, height) = (buffer.width(), buffer.height());
        let (x0, y0, x1, y1) = region.clip(width, height).ok_or(MatchError::SamplingError {
            region,
            width,
            height,
        })?;

        let mut sums = [0u64; 3];
        for y in y0..y1 {
            for x in x0..x1 {
                let px = buffer.rgb_at(x, y);
                sums[0] += u64::from(px[0]);
                sums[1] += u64::from(px[1]);
                sums[2] += u64::from(px[2]);
            }
        }

        let count = u64::from(x1 - x0) * u64::from(y1 - y0);
        let mean = |sum: u64| clamp_channel(((2 * sum + count) / (2 * count)) as i64);
        let color = Rgb::new(mean(sums[0]), mean(sums[1]), mean(sums[2]));

        debug!(
            %region,
            clipped = ?(x0, y0, x1, y1),
            pixels = count,
            color = %color,
            "sampled region"
        );

        Ok(color)
    }

    /// Average color of the default center patch
    pub fn sample_center<B: PixelBuffer + ?Sized>(&self, buffer: &B) -> Result<Rgb> {
        self.sample(buffer, SamplingRegion::default_for(buffer.width(), buffer.height()))
    }
}
