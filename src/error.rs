//! Error types for regionlink library.

use std::io;
use thiserror::Error;

/// Result type alias for regionlink operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconciling regions and selections.
///
/// Malformed payload data is never reported here: bad regions are dropped
/// during normalization and bad cell tokens decode to `None`. The variants
/// below cover I/O, caller mistakes, and lookups of things the index does
/// not contain.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading payload files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The payload text is not valid JSON.
    #[error("Invalid payload JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A numeric argument is outside its valid domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The page is not part of the current region index.
    #[error("Page {0} is not in the region index")]
    PageNotFound(u32),

    /// No region with this id exists on the given page.
    #[error("Region {content_id} not found on page {page}")]
    RegionNotFound {
        /// Canonical form of the requested id
        content_id: String,
        /// Page that was searched
        page: u32,
    },

    /// The region exists but is marked inactive, so the overlay cannot select it.
    #[error("Region {content_id} on page {page} is inactive")]
    RegionInactive {
        /// Canonical form of the requested id
        content_id: String,
        /// Page the region is on
        page: u32,
    },

    /// Error while serializing the normalized index.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PageNotFound(4);
        assert_eq!(err.to_string(), "Page 4 is not in the region index");

        let err = Error::RegionNotFound {
            content_id: "7".to_string(),
            page: 2,
        };
        assert_eq!(err.to_string(), "Region 7 not found on page 2");

        let err = Error::RegionInactive {
            content_id: "3".to_string(),
            page: 1,
        };
        assert_eq!(err.to_string(), "Region 3 on page 1 is inactive");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
