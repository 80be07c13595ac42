//! Reference values for sampling and similarity scoring
//!
//! Compile-time constants shared by the sampler, the ranker and the
//! default configuration.

/// RGB space limits and distances
pub mod rgb {
    /// Largest value a single channel may take
    pub const CHANNEL_MAX: u8 = 255;

    /// Largest possible Euclidean distance between two RGB colors: √(3·255²)
    pub const MAX_DISTANCE: f64 = 441.672_955_930_063_7;
}

/// Distance-to-percentage scaling
pub mod similarity {
    use super::rgb;

    /// Divisor derived from the formal maximum distance (≈ 4.4167)
    pub const EXACT_DIVISOR: f64 = rgb::MAX_DISTANCE / 100.0;

    /// Rounded divisor used by the first release of the product finder
    pub const LEGACY_DIVISOR: f64 = 4.41;

    /// Score given to identical colors
    pub const MAX_PERCENT: u8 = 100;
}

/// Default sampling policy
pub mod sampling {
    /// Side of the analysis canvas the capture is drawn onto, in pixels
    pub const ANALYSIS_CANVAS_SIZE: u32 = 300;

    /// Side of the sampled patch on the analysis canvas, in pixels
    pub const PATCH_SIZE: u32 = 20;

    /// Patch side as a fraction of the image's shorter dimension
    pub const REGION_FRACTION: f64 = PATCH_SIZE as f64 / ANALYSIS_CANVAS_SIZE as f64;

    /// Smallest patch side the default policy will produce
    pub const MIN_REGION_SIDE: u32 = 1;
}

/// Default ranking policy
pub mod ranking {
    /// Number of recommendations shown to the user
    pub const DEFAULT_TOP_K: usize = 5;
}
