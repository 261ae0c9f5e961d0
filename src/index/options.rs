//! Index building options.

/// Options for building a [`super::RegionIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    /// Whether to normalize pages in parallel
    pub parallel: bool,

    /// Whether to look inside a `{"result": {...}}` wrapper
    pub unwrap_envelope: bool,
}

impl IndexOptions {
    /// Create new index options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable unwrapping of the `result` envelope.
    pub fn with_unwrap_envelope(mut self, unwrap: bool) -> Self {
        self.unwrap_envelope = unwrap;
        self
    }
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            unwrap_envelope: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_options_builder() {
        let options = IndexOptions::new().sequential().with_unwrap_envelope(false);
        assert!(!options.parallel);
        assert!(!options.unwrap_envelope);
    }

    #[test]
    fn test_default_options() {
        let options = IndexOptions::default();
        assert!(options.parallel);
        assert!(options.unwrap_envelope);
    }
}
