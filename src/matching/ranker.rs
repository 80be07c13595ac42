//! Nearest-color ranking over a catalog
//!
//! Similarity is a linear inverse of Euclidean RGB distance:
//! `max(0, 100 - distance / divisor)`, rounded to the nearest integer.
//! Results are ordered by similarity, highest first. Equal rounded scores
//! fall back to the raw distance, and identical similarity keeps catalog
//! order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    color::Rgb,
    constants::similarity::{EXACT_DIVISOR, LEGACY_DIVISOR, MAX_PERCENT},
    matching::CatalogEntry,
};

/// Divisor used to turn a distance into a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityScale {
    /// Maximum RGB distance / 100 (≈ 4.4167); opposite corners score exactly 0
    #[default]
    Exact,
    /// Rounded 4.41, as shipped in the first release
    Legacy,
}

impl SimilarityScale {
    pub fn divisor(self) -> f64 {
        match self {
            SimilarityScale::Exact => EXACT_DIVISOR,
            SimilarityScale::Legacy => LEGACY_DIVISOR,
        }
    }

    /// Similarity percent for a distance, clamped to [0, 100]
    pub fn percent(self, distance: f64) -> u8 {
        let raw = 100.0 - distance / self.divisor();
        raw.round().clamp(0.0, f64::from(MAX_PERCENT)) as u8
    }
}

/// A catalog entry together with its score against the target color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub entry: CatalogEntry,
    /// 0 (opposite corner of the RGB cube, or unparseable) to 100 (identical)
    pub similarity_percent: u8,
    /// RGB distance to the target; `None` when the entry color did not parse
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// Scores and orders catalog entries by closeness to a target color
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityRanker {
    scale: SimilarityScale,
}

impl SimilarityRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scale(scale: SimilarityScale) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> SimilarityScale {
        self.scale
    }

    /// Score a single entry
    ///
    /// An entry whose color does not parse scores 0 with no distance.
    pub fn score(&self, target: Rgb, entry: &CatalogEntry) -> (u8, Option<f64>) {
        match entry.rgb() {
            Ok(color) => {
                let distance = target.distance(&color);
                (self.scale.percent(distance), Some(distance))
            }
            Err(err) => {
                warn!(id = entry.id, name = %entry.name, error = %err, "unparseable catalog color");
                (0, None)
            }
        }
    }

    /// Top `k` entries of `catalog` by similarity to `target`
    ///
    /// Returns `min(k, catalog.len())` results. A closer entry never ranks
    /// after a farther one, and entries at the same distance appear in
    /// catalog order. `k == 0` yields an empty list.
    pub fn rank(&self, target: Rgb, catalog: &[CatalogEntry], k: usize) -> Vec<RankedResult> {
        if k == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, u8, Option<f64>)> = catalog
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let (similarity, distance) = self.score(target, entry);
                (index, similarity, distance)
            })
            .collect();

        // Rounded percent first, then raw distance (unparseable last), then catalog order
        scored.sort_unstable_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| match (a.2, b.2) {
                    (Some(da), Some(db)) => da.total_cmp(&db),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                })
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(k);

        let results: Vec<RankedResult> = scored
            .into_iter()
            .map(|(index, similarity_percent, distance)| RankedResult {
                entry: catalog[index].clone(),
                similarity_percent,
                distance,
            })
            .collect();

        debug!(
            color = %target,
            catalog = catalog.len(),
            returned = results.len(),
            best = ?results.first().map(|r| r.similarity_percent),
            "ranked catalog"
        );

        results
    }
}
