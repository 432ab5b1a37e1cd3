//! Error types for web archive extraction.

use thiserror::Error;

/// Result type alias using `ExtractError`.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that abort a whole extraction run.
///
/// Per-resource anomalies are not errors; they are [`SkipReason`]s carried
/// in the run report. Only document-level failures surface here.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The property-list container could not be decoded.
    #[error("failed to decode property-list container: {0}")]
    Decode(#[from] plist::Error),

    /// The decoded container does not match the web archive schema.
    #[error("malformed web archive: {0}")]
    MalformedArchive(String),

    /// The container lists more resources than the configured limit.
    #[error("archive lists {count} resources, limit is {max}")]
    ResourceLimit {
        /// Number of resources in the container.
        count: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl ExtractError {
    /// Returns `true` if the error indicates bad input rather than an
    /// environment fault.
    ///
    /// # Examples
    ///
    /// ```
    /// use unwebarchive_core::ExtractError;
    ///
    /// let err = ExtractError::MalformedArchive("missing WebMainResource".into());
    /// assert!(err.is_malformed_input());
    ///
    /// let err = ExtractError::Io(std::io::Error::other("disk full"));
    /// assert!(!err.is_malformed_input());
    /// ```
    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::Decode(_) | Self::MalformedArchive(_) | Self::ResourceLimit { .. }
        )
    }

    /// Returns a context string for this error, if available.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::MalformedArchive(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Why a single resource was omitted from the output tree.
///
/// A skip never aborts the run; the record is reported and extraction
/// continues with the next resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The locator uses a scheme other than `file`, `http`, or `https`.
    UnsupportedScheme,
    /// The locator resolves to a path that would escape the export root,
    /// or to no usable path at all.
    UnsafePath,
    /// The resolved path and its disambiguated variant are both taken.
    CollisionUnresolvable,
}

impl SkipReason {
    /// Stable identifier used in reports and machine-readable output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnsupportedScheme => "unsupported-scheme",
            Self::UnsafePath => "unsafe-path",
            Self::CollisionUnresolvable => "collision-unresolvable",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExtractError::MalformedArchive("missing WebMainResource".into());
        assert_eq!(
            err.to_string(),
            "malformed web archive: missing WebMainResource"
        );

        let err = ExtractError::ResourceLimit {
            count: 20_000,
            max: 10_000,
        };
        assert!(err.to_string().contains("20000"));
        assert!(err.to_string().contains("10000"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExtractError = io_err.into();
        assert!(matches!(err, ExtractError::Io(_)));
        assert!(!err.is_malformed_input());
    }

    #[test]
    fn test_context() {
        let err = ExtractError::MalformedArchive("WebSubresources is not an array".into());
        assert_eq!(err.context(), Some("WebSubresources is not an array"));

        let err = ExtractError::Io(std::io::Error::other("boom"));
        assert_eq!(err.context(), None);
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::UnsupportedScheme.to_string(), "unsupported-scheme");
        assert_eq!(SkipReason::UnsafePath.to_string(), "unsafe-path");
        assert_eq!(
            SkipReason::CollisionUnresolvable.to_string(),
            "collision-unresolvable"
        );
    }
}
