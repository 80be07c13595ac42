//! # Shade Match
//!
//! A Rust crate for finding catalog products whose color is closest to a
//! color photographed by the user.
//!
//! The pipeline has two steps:
//! - Sample one representative RGB color from a small patch of the photo
//! - Rank a product catalog by Euclidean RGB similarity to that color
//!
//! Both steps are pure functions over borrowed inputs. Loading photos and
//! catalogs from disk lives in [`image_loader`] and [`matching::Catalog`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use shade_match::{image_loader::load_image, match_shades, Catalog, MatcherConfig};
//! use std::path::Path;
//!
//! let config = MatcherConfig::default();
//! let photo = load_image(Path::new("photo.jpg"), config.sampling.analysis_size)?;
//! let report = match_shades(&photo, &Catalog::builtin(), &config)?;
//! println!("Sampled {}, best match {:?}", report.hex, report.matches.first());
//! # Ok::<(), shade_match::MatchError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod image_loader;
pub mod matching;

pub use color::{ColorSampler, PixelBuffer, RawPixels, Rgb, SamplingRegion};
pub use config::{MatcherConfig, RankingConfig, SamplingConfig};
pub use error::{MatchError, Result};
pub use matching::{
    Catalog, CatalogEntry, ColorSpec, RankedResult, SimilarityRanker, SimilarityScale,
};

/// Outcome of one photo analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Representative color of the sampled patch
    pub color: Rgb,
    /// Uppercase hex of `color`, as shown to the user
    pub hex: String,
    /// Patch that was averaged, before clipping
    pub region: SamplingRegion,
    /// Best matches, highest similarity first
    pub matches: Vec<RankedResult>,
}

/// Average color of `region` within `buffer`
///
/// # Errors
///
/// Returns `MatchError::SamplingError` if the region lies entirely outside
/// the buffer.
pub fn sample_color<B: PixelBuffer + ?Sized>(buffer: &B, region: SamplingRegion) -> Result<Rgb> {
    ColorSampler::new().sample(buffer, region)
}

/// Top `top_k` catalog entries by similarity to `target`
///
/// Uses the exact similarity scale. Entries with unparseable colors score 0
/// and are still returned.
///
/// # Errors
///
/// Returns `MatchError::InvalidCatalog` if no catalog is supplied. An empty
/// catalog is valid and yields no results.
pub fn rank_catalog(
    target: Rgb,
    catalog: Option<&[CatalogEntry]>,
    top_k: usize,
) -> Result<Vec<RankedResult>> {
    let catalog = catalog.ok_or_else(|| MatchError::InvalidCatalog {
        reason: "no catalog supplied".into(),
    })?;
    Ok(SimilarityRanker::new().rank(target, catalog, top_k))
}

/// Sample the center patch of `buffer` and rank `catalog` against it
///
/// Patch size, result count and similarity scale come from `config`.
pub fn match_shades<B: PixelBuffer + ?Sized>(
    buffer: &B,
    catalog: &Catalog,
    config: &MatcherConfig,
) -> Result<MatchReport> {
    let region = config.sampling.region_for(buffer.width(), buffer.height());
    let color = ColorSampler::new().sample(buffer, region)?;
    let matches = SimilarityRanker::with_scale(config.ranking.scale).rank(
        color,
        catalog.entries(),
        config.ranking.top_k,
    );

    Ok(MatchReport {
        color,
        hex: color.to_hex_upper(),
        region,
        matches,
    })
}

/// Load a photo and the configured catalog, then run [`match_shades`]
///
/// # Errors
///
/// Returns `MatchError` if the configuration is invalid, the photo or the
/// catalog cannot be loaded, or sampling fails.
pub fn analyze_photo(image_path: &Path, config: &MatcherConfig) -> Result<MatchReport> {
    config.validate()?;
    let catalog = config.load_catalog()?;
    let image = image_loader::load_image(image_path, config.sampling.analysis_size)?;
    match_shades(&image, &catalog, config)
}
