//! Error types for the shade_match library

use thiserror::Error;

use crate::color::SamplingRegion;

/// Result type alias for shade_match operations
pub type Result<T> = std::result::Result<T, MatchError>;

/// Error types for sampling, ranking and the loaders around them
#[derive(Error, Debug)]
pub enum MatchError {
    /// Sampling region has no overlap with the pixel buffer
    #[error("Sampling region {region} has zero area inside a {width}x{height} image")]
    SamplingError {
        region: SamplingRegion,
        width: u32,
        height: u32,
    },

    /// Catalog reference is missing
    #[error("Invalid catalog: {reason}")]
    InvalidCatalog { reason: String },

    /// Color text or channel values could not be interpreted
    #[error("Invalid color '{input}': {reason}")]
    ColorParse { input: String, reason: String },

    /// Raw pixel data does not match the declared dimensions
    #[error("Invalid pixel buffer: {reason}")]
    InvalidPixelBuffer { reason: String },

    /// Image file could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Catalog file could not be read or parsed
    #[error("Failed to load catalog: {message}")]
    CatalogLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration file could not be read, parsed or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },
}

impl MatchError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a catalog load error with context
    pub fn catalog_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::CatalogLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub(crate) fn color_parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ColorParse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_sampling_error_message() {
        let err = MatchError::SamplingError {
            region: SamplingRegion::new(500, 500, 20, 20),
            width: 300,
            height: 300,
        };
        let message = err.to_string();
        assert!(message.contains("x=500"));
        assert!(message.contains("300x300"));
    }

    #[test]
    fn test_image_load_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = MatchError::image_load("Failed to open photo.jpg", io);
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Failed to load image: Failed to open photo.jpg");
    }

    #[test]
    fn test_invalid_parameter_message() {
        let err = MatchError::invalid_parameter("sampling.region_fraction", 1.5);
        assert_eq!(err.to_string(), "Invalid parameter: sampling.region_fraction = 1.5");
    }
}
