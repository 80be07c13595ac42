//! Catalog matching module
//!
//! This module handles the product catalog and the similarity ranking of
//! its entries against a sampled color.

pub mod catalog;
pub mod ranker;

pub use catalog::{Catalog, CatalogEntry, ColorSpec};
pub use ranker::{RankedResult, SimilarityRanker, SimilarityScale};
