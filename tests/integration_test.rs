//! Integration tests for the sample-then-rank pipeline
//!
//! These tests exercise the public API end to end:
//! - Sampling from `image` buffers and raw canvas bytes
//! - Ranking the built-in and JSON-loaded catalogs
//! - Error handling for bad regions, missing catalogs and bad files

use image::{Rgb as ImgRgb, RgbImage, Rgba, RgbaImage};
use shade_match::{
    analyze_photo, match_shades, rank_catalog, sample_color, Catalog, CatalogEntry, MatchError,
    MatcherConfig, RawPixels, Rgb, SamplingRegion, SimilarityRanker, SimilarityScale,
};
use std::path::Path;

fn shade_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(1, "Velvet Veil", "Espresso Bean", "#3d2b1f", "¥3,500"),
        CatalogEntry::new(2, "Ethereal Glow", "Rose Quartz", "#e5989b", "¥2,800"),
        CatalogEntry::new(3, "Luster Cosmetics", "Golden Sunset", "#d4a373", "¥3,200"),
        CatalogEntry::new(4, "Midnight Muse", "Royal Velvet", "#4b3f72", "¥4,500"),
        CatalogEntry::new(5, "Pure Skin", "Peach Fizz", "#ffbe0b", "¥2,100"),
    ]
}

// ============================================================================
// Sampling
// ============================================================================

#[test]
fn test_sample_uniform_region() {
    let image = RgbImage::from_pixel(50, 50, ImgRgb([10, 20, 30]));
    let color = sample_color(&image, SamplingRegion::new(15, 15, 20, 20)).unwrap();
    assert_eq!(color, Rgb::new(10, 20, 30));
}

#[test]
fn test_sample_black_white_halves() {
    let image = RgbImage::from_fn(20, 10, |_, y| {
        if y < 5 {
            ImgRgb([0, 0, 0])
        } else {
            ImgRgb([255, 255, 255])
        }
    });
    let color = sample_color(&image, SamplingRegion::full(20, 10)).unwrap();
    assert_eq!(color, Rgb::new(128, 128, 128));
}

#[test]
fn test_sample_canvas_bytes() {
    // 2x2 RGBA canvas data with varying alpha
    let data = [
        200, 100, 50, 255, 200, 100, 50, 0, //
        100, 50, 25, 128, 100, 50, 25, 255,
    ];
    let pixels = RawPixels::from_rgba(&data, 2, 2).unwrap();
    let color = sample_color(&pixels, SamplingRegion::full(2, 2)).unwrap();
    assert_eq!(color, Rgb::new(150, 75, 38));
}

#[test]
fn test_sample_region_clamped_or_rejected() {
    let image = RgbaImage::from_pixel(8, 8, Rgba([90, 80, 70, 255]));

    let clipped = sample_color(&image, SamplingRegion::new(6, 6, 100, 100)).unwrap();
    assert_eq!(clipped, Rgb::new(90, 80, 70));

    match sample_color(&image, SamplingRegion::new(100, 100, 10, 10)) {
        Err(MatchError::SamplingError { .. }) => {}
        other => panic!("Expected SamplingError, got: {:?}", other),
    }
}

#[test]
fn test_sample_is_repeatable_across_threads() {
    let image = RgbImage::from_fn(64, 64, |x, y| ImgRgb([(x * 4) as u8, (y * 4) as u8, 77]));
    let region = SamplingRegion::default_for(64, 64);
    let expected = sample_color(&image, region).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| sample_color(&image, region).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

// ============================================================================
// Ranking
// ============================================================================

#[test]
fn test_end_to_end_golden_sunset() {
    let target = Rgb::from_hex("#d4a373").unwrap();
    assert_eq!(target, Rgb::new(212, 163, 115));

    let catalog = shade_catalog();
    let results = rank_catalog(target, Some(catalog.as_slice()), 5).unwrap();

    assert_eq!(results.len(), 5);
    assert_eq!(results[0].entry.id, 3);
    assert_eq!(results[0].similarity_percent, 100);
    assert!(results.windows(2).all(|w| w[0].similarity_percent >= w[1].similarity_percent));
}

#[test]
fn test_top_k_on_six_entries() {
    let mut catalog = shade_catalog();
    catalog.push(CatalogEntry::new(6, "Urban Noir", "Graphite Shine", "#333533", "¥4,000"));
    let target = Rgb::new(120, 120, 120);

    let top3 = rank_catalog(target, Some(catalog.as_slice()), 3).unwrap();
    assert_eq!(top3.len(), 3);
    assert!(top3.windows(2).all(|w| w[0].similarity_percent >= w[1].similarity_percent));

    assert_eq!(rank_catalog(target, Some(catalog.as_slice()), 100).unwrap().len(), 6);
    assert!(rank_catalog(target, Some(catalog.as_slice()), 0).unwrap().is_empty());
}

#[test]
fn test_missing_catalog_is_error() {
    match rank_catalog(Rgb::new(1, 2, 3), None, 3) {
        Err(MatchError::InvalidCatalog { .. }) => {}
        other => panic!("Expected InvalidCatalog, got: {:?}", other),
    }
}

#[test]
fn test_bad_entry_degrades_gracefully() {
    let json = r##"[
        {"id": 1, "brand": "A", "name": "Broken", "hex": "#12", "price": "¥1"},
        {"id": 2, "brand": "B", "name": "Sunset", "hex": "#d4a373", "price": "¥2"},
        {"id": 3, "brand": "C", "name": "Night", "color": {"r": 20, "g": 20, "b": 40},
         "price": "¥3"}
    ]"##;
    let catalog = Catalog::from_json_str(json).unwrap();
    let results = rank_catalog(Rgb::new(212, 163, 115), Some(catalog.entries()), 10).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].entry.name, "Sunset");
    let broken = results.iter().find(|r| r.entry.id == 1).unwrap();
    assert_eq!(broken.similarity_percent, 0);
    assert!(broken.distance.is_none());
}

#[test]
fn test_legacy_scale_never_exceeds_exact() {
    let catalog = shade_catalog();
    let target = Rgb::new(30, 200, 90);
    let exact = SimilarityRanker::with_scale(SimilarityScale::Exact).rank(target, &catalog, 5);
    let legacy = SimilarityRanker::with_scale(SimilarityScale::Legacy).rank(target, &catalog, 5);

    for result in &legacy {
        let same = exact.iter().find(|r| r.entry.id == result.entry.id).unwrap();
        assert!(result.similarity_percent <= same.similarity_percent);
    }
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_match_shades_respects_config() {
    let image = RgbImage::from_pixel(120, 80, ImgRgb([229, 152, 155]));
    let mut config = MatcherConfig::default();
    config.ranking.top_k = 2;

    let report = match_shades(&image, &Catalog::builtin(), &config).unwrap();
    assert_eq!(report.hex, "#E5989B");
    assert_eq!(report.matches.len(), 2);
    assert_eq!(report.matches[0].entry.name, "Rose Quartz");
}

#[test]
fn test_analyze_photo_from_disk() {
    let dir = std::env::temp_dir();
    let photo = dir.join(format!("shade_match_it_{}.png", std::process::id()));
    RgbImage::from_fn(640, 480, |x, y| {
        // Eye-area patch in the middle, background around it
        if (200..440).contains(&x) && (120..360).contains(&y) {
            ImgRgb([75, 63, 114])
        } else {
            ImgRgb([240, 240, 240])
        }
    })
    .save(&photo)
    .unwrap();

    let report = analyze_photo(&photo, &MatcherConfig::default());
    std::fs::remove_file(&photo).ok();

    let report = report.unwrap();
    assert!(report.color.distance(&Rgb::new(75, 63, 114)) <= 2.0);
    assert_eq!(report.matches[0].entry.name, "Royal Velvet");
    assert_eq!(report.matches.len(), 5);
}

#[test]
fn test_analyze_photo_file_not_found() {
    let result = analyze_photo(Path::new("nonexistent_file.jpg"), &MatcherConfig::default());
    match result {
        Err(MatchError::ImageLoadError { .. }) => {}
        other => panic!("Expected ImageLoadError, got: {:?}", other),
    }
}

#[test]
fn test_analyze_photo_rejects_invalid_config() {
    let mut config = MatcherConfig::default();
    config.sampling.region_fraction = 2.0;
    let result = analyze_photo(Path::new("photo.jpg"), &config);
    assert!(matches!(result, Err(MatchError::InvalidParameter { .. })));
}

#[test]
fn test_bundled_catalog_file_matches_builtin() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/catalog.json");
    let catalog = Catalog::from_json_file(&path).unwrap();
    assert_eq!(catalog, Catalog::builtin());
}
