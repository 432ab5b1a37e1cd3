//! Extraction configuration.

/// Limits applied to an extraction run.
///
/// Defaults are safe for untrusted archives. The struct is cheap to copy;
/// pass by reference when threading it through the pipeline.
///
/// # Examples
///
/// ```
/// use unwebarchive_core::ExtractConfig;
///
/// let config = ExtractConfig::default();
///
/// let custom = ExtractConfig {
///     max_path_depth: 8,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Maximum number of components allowed in a resolved output path.
    pub max_path_depth: usize,

    /// Maximum number of resources (main + subresources) accepted in one
    /// container. Exceeding it aborts the run before any file is written.
    pub max_resource_count: usize,
}

impl Default for ExtractConfig {
    /// Default values:
    /// - `max_path_depth`: 32
    /// - `max_resource_count`: 10,000
    fn default() -> Self {
        Self {
            max_path_depth: 32,
            max_resource_count: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractConfig::default();
        assert_eq!(config.max_path_depth, 32);
        assert_eq!(config.max_resource_count, 10_000);
    }
}
