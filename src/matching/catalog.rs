//! Product catalog records and loaders
//!
//! A catalog is an ordered, read-only list of products, each carrying the
//! color it is matched by. Order matters: ties in similarity are broken by
//! catalog position.
//!
//! Colors are accepted as a hex string (`"#d4a373"`) or a channel object
//! (`{"r": 212, "g": 163, "b": 115}`). Anything else still loads; the entry
//! is kept with an unparseable color and ranks at similarity 0.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{color::Rgb, MatchError, Result};

/// Color as written in catalog data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// `#rrggbb` or `rrggbb`
    Hex(String),
    /// Explicit channels; values outside 0-255 are invalid
    Channels { r: i64, g: i64, b: i64 },
    /// Whatever else the source contained
    Unrecognized(serde_json::Value),
}

impl ColorSpec {
    /// Resolve to a concrete color
    ///
    /// # Errors
    ///
    /// Returns `MatchError::ColorParse` for malformed hex text, channels out
    /// of range, or unrecognized values.
    pub fn resolve(&self) -> Result<Rgb> {
        match self {
            ColorSpec::Hex(hex) => Rgb::from_hex(hex),
            ColorSpec::Channels { r, g, b } => Rgb::try_from_channels(*r, *g, *b),
            ColorSpec::Unrecognized(value) => Err(MatchError::color_parse(
                value.to_string(),
                "expected a hex string or an {r, g, b} object",
            )),
        }
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        ColorSpec::Unrecognized(serde_json::Value::Null)
    }
}

impl From<Rgb> for ColorSpec {
    fn from(color: Rgb) -> Self {
        ColorSpec::Hex(color.to_hex())
    }
}

/// One product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CatalogRecord")]
pub struct CatalogEntry {
    pub id: u32,
    pub brand: String,
    pub name: String,
    /// Product color
    pub color: ColorSpec,
    /// Display price, already formatted
    pub price: String,
    /// Optional product image URL or asset key
    #[serde(rename = "image", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

/// Catalog record as written on disk
///
/// Older data names the color `hex`. When a record carries both keys,
/// `color` wins.
#[derive(Deserialize)]
struct CatalogRecord {
    id: u32,
    brand: String,
    name: String,
    #[serde(default)]
    color: Option<ColorSpec>,
    #[serde(default)]
    hex: Option<ColorSpec>,
    price: String,
    #[serde(default)]
    image: Option<String>,
}

impl From<CatalogRecord> for CatalogEntry {
    fn from(record: CatalogRecord) -> Self {
        Self {
            id: record.id,
            brand: record.brand,
            name: record.name,
            color: record.color.or(record.hex).unwrap_or_default(),
            price: record.price,
            image_ref: record.image,
        }
    }
}

impl CatalogEntry {
    pub fn new(
        id: u32,
        brand: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<ColorSpec>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            id,
            brand: brand.into(),
            name: name.into(),
            color: color.into(),
            price: price.into(),
            image_ref: None,
        }
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// The entry's color, if it parses
    pub fn rgb(&self) -> Result<Rgb> {
        self.color.resolve()
    }
}

impl From<&str> for ColorSpec {
    fn from(hex: &str) -> Self {
        ColorSpec::Hex(hex.to_string())
    }
}

/// Ordered product list, loaded once and shared read-only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// The nine products shipped with the shade finder
    pub fn builtin() -> Self {
        const SUNSET_PHOTO: &str =
            "https://images.unsplash.com/photo-1583241475879-da985E7edc32?w=150&h=150&fit=crop";
        const PHOTO: &str =
            "https://images.unsplash.com/photo-1590156221122-c748e7898a23?w=150&h=150&fit=crop";

        Self::new(vec![
            CatalogEntry::new(1, "Luster Cosmetics", "Golden Sunset", "#d4a373", "¥3,200")
                .with_image(SUNSET_PHOTO),
            CatalogEntry::new(2, "Midnight Muse", "Royal Velvet", "#4b3f72", "¥4,500")
                .with_image(PHOTO),
            CatalogEntry::new(3, "Ethereal Glow", "Rose Quartz", "#e5989b", "¥2,800")
                .with_image(PHOTO),
            CatalogEntry::new(4, "Terra Aura", "Sienna Dust", "#a44a3f", "¥3,800")
                .with_image(PHOTO),
            CatalogEntry::new(5, "Luster Cosmetics", "Icy Platinum", "#e5e5e5", "¥3,200"),
            CatalogEntry::new(6, "Velvet Veil", "Espresso Bean", "#3d2b1f", "¥3,500"),
            CatalogEntry::new(7, "Pure Skin", "Peach Fizz", "#ffbe0b", "¥2,100"),
            CatalogEntry::new(8, "Urban Noir", "Graphite Shine", "#333533", "¥4,000"),
            CatalogEntry::new(9, "Flora", "Lavender Mist", "#b5a4a3", "¥2,500"),
        ])
    }

    /// Parse a JSON array of catalog records
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MatchError::catalog_load("Invalid catalog JSON", e))
    }

    /// Load a JSON array of catalog records from disk
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MatchError::catalog_load(format!("Failed to read catalog: {}", path.display()), e)
        })?;
        let catalog = Self::from_json_str(&content)?;
        tracing::debug!(path = %path.display(), entries = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }
}

impl AsRef<[CatalogEntry]> for Catalog {
    fn as_ref(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

impl From<Vec<CatalogEntry>> for Catalog {
    fn from(entries: Vec<CatalogEntry>) -> Self {
        Self::new(entries)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
