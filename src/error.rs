//! Error types for dominant-color extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// The path does not resolve to a readable, decodable image.
    #[error("could not read image at {}: {reason}", .path.display())]
    ImageLoad {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<image::ImageError>,
    },

    /// A caller-supplied parameter is out of range.
    #[error("invalid parameter: {parameter} = {value} ({reason})")]
    InvalidParameter {
        parameter: &'static str,
        value: String,
        reason: &'static str,
    },

    /// K-means could not produce the requested partition.
    #[error("clustering failed: {reason}")]
    Clustering { reason: String },
}

impl ExtractError {
    pub(crate) fn invalid(
        parameter: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            parameter,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn clustering(reason: impl Into<String>) -> Self {
        Self::Clustering {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_message_names_the_parameter() {
        let err = ExtractError::invalid("k", 0, "must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid parameter: k = 0 (must be at least 1)"
        );
    }

    #[test]
    fn image_load_message_includes_path() {
        let err = ExtractError::ImageLoad {
            path: PathBuf::from("/tmp/missing.png"),
            reason: "file not found".into(),
            source: None,
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.png"), "got: {msg}");
        assert!(msg.contains("file not found"), "got: {msg}");
    }
}
