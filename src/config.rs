//! Configuration structures for the shade_match pipeline.
//!
//! This module defines the tunable parameters for sampling and ranking.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use shade_match::MatcherConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = MatcherConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = MatcherConfig::default();
//! # Ok::<(), shade_match::MatchError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`SamplingConfig`]: analysis canvas and center patch size
//! - [`RankingConfig`]: number of results and similarity scale

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{
    color::SamplingRegion,
    constants::{ranking, sampling},
    matching::{Catalog, SimilarityScale},
    MatchError, Result,
};

/// Complete pipeline configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Catalog JSON file; the built-in catalog is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// Sampling configuration
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Ranking configuration
    #[serde(default)]
    pub ranking: RankingConfig,
}

/// Where and how much of the image is averaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Center patch side as a fraction of the shorter image dimension (0.0-1.0]
    pub region_fraction: f64,

    /// Smallest patch side in pixels
    pub min_region_side: u32,

    /// Resize loaded images to this square canvas before sampling
    pub analysis_size: Option<u32>,
}

/// How many matches are returned and how they are scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Number of results to return
    pub top_k: usize,

    /// Distance-to-percentage divisor
    pub scale: SimilarityScale,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            region_fraction: sampling::REGION_FRACTION,
            min_region_side: sampling::MIN_REGION_SIDE,
            analysis_size: Some(sampling::ANALYSIS_CANVAS_SIZE),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_k: ranking::DEFAULT_TOP_K,
            scale: SimilarityScale::default(),
        }
    }
}

impl SamplingConfig {
    /// Center patch for a `width` x `height` image
    pub fn region_for(&self, width: u32, height: u32) -> SamplingRegion {
        SamplingRegion::centered(width, height, self.region_fraction, self.min_region_side)
    }
}

impl MatcherConfig {
    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        let fraction = self.sampling.region_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(MatchError::invalid_parameter("sampling.region_fraction", fraction));
        }
        if self.sampling.min_region_side == 0 {
            return Err(MatchError::invalid_parameter("sampling.min_region_side", 0));
        }
        if self.sampling.analysis_size == Some(0) {
            return Err(MatchError::invalid_parameter("sampling.analysis_size", 0));
        }
        Ok(())
    }

    /// Catalog named by `catalog_path`, or the built-in catalog
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::from_json_file(path),
            None => Ok(Catalog::builtin()),
        }
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MatchError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            MatchError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| MatchError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            MatchError::config(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(())
    }
}
