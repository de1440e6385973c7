//! Configuration management for the radix engine

use crate::error::{SortError, SortResult};
use std::str::FromStr;

/// Inputs shorter than this are insertion sorted instead of radix sorted
pub const NUMERIC_SMALL_THRESHOLD: usize = 1000;
pub const STRING_SMALL_THRESHOLD: usize = 32;

const MAX_THREADS: usize = 1024;

/// How shorter strings are extended to the common width of a string sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringPadding {
    /// Virtual end-of-string symbol that ranks below every byte.
    /// Produces plain byte-wise order for any input.
    #[default]
    EndSentinel,
    /// Right-pad with ASCII space. Only correct when no input byte is below 0x20.
    Space,
}

/// Main configuration structure for the engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Numeric inputs below this length use the small-input sorter
    pub numeric_threshold: usize,
    /// String inputs below this length use the small-input sorter
    pub string_threshold: usize,
    /// Fan digit passes out to worker tasks
    pub parallel: bool,
    /// Number of worker threads (defaults to the CPU count)
    pub parallel_threads: Option<usize>,
    /// Padding rule for the string engine
    pub string_padding: StringPadding,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            numeric_threshold: NUMERIC_SMALL_THRESHOLD,
            string_threshold: STRING_SMALL_THRESHOLD,
            parallel: true,
            parallel_threads: None,
            string_padding: StringPadding::EndSentinel,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_numeric_threshold(mut self, threshold: usize) -> Self {
        self.numeric_threshold = threshold;
        self
    }

    pub fn with_string_threshold(mut self, threshold: usize) -> Self {
        self.string_threshold = threshold;
        self
    }

    /// Enable or disable the parallel counting pass
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_parallel_threads(mut self, threads: Option<usize>) -> Self {
        self.parallel_threads = threads;
        self
    }

    pub fn with_string_padding(mut self, padding: StringPadding) -> Self {
        self.string_padding = padding;
        self
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> SortResult<()> {
        if self.numeric_threshold == 0 {
            return Err(SortError::invalid_threshold(
                "numeric threshold must be positive",
            ));
        }
        if self.string_threshold == 0 {
            return Err(SortError::invalid_threshold(
                "string threshold must be positive",
            ));
        }

        if let Some(threads) = self.parallel_threads {
            if threads == 0 {
                return Err(SortError::invalid_thread_count(
                    "thread count must be positive",
                ));
            }
            if threads > MAX_THREADS {
                return Err(SortError::invalid_thread_count(
                    "too many threads (maximum 1024)",
                ));
            }
        }

        Ok(())
    }

    /// Get effective thread count
    pub fn effective_thread_count(&self) -> usize {
        self.parallel_threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

impl FromStr for StringPadding {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "end" | "sentinel" | "end-sentinel" => Ok(StringPadding::EndSentinel),
            "space" => Ok(StringPadding::Space),
            _ => Err(SortError::internal(&format!("unknown padding mode: {s}"))),
        }
    }
}

impl std::fmt::Display for StringPadding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StringPadding::EndSentinel => "end",
            StringPadding::Space => "space",
        };
        write!(f, "{name}")
    }
}

/// Builder pattern for creating configurations
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Force every digit pass onto the calling thread
    pub fn sequential(mut self) -> Self {
        self.config.parallel = false;
        self
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.config.parallel_threads = Some(threads);
        self
    }

    pub fn numeric_threshold(mut self, threshold: usize) -> Self {
        self.config.numeric_threshold = threshold;
        self
    }

    pub fn string_threshold(mut self, threshold: usize) -> Self {
        self.config.string_threshold = threshold;
        self
    }

    pub fn string_padding(mut self, padding: StringPadding) -> Self {
        self.config.string_padding = padding;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SortResult<EngineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Preset configurations for common use cases
pub mod presets {
    use super::*;

    /// Every digit pass runs on the calling thread
    pub fn sequential() -> EngineConfig {
        EngineConfig::new().with_parallel(false)
    }

    /// Literal space padding for the string engine
    pub fn space_padded() -> EngineConfig {
        EngineConfig::new().with_string_padding(StringPadding::Space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.numeric_threshold, 1000);
        assert_eq!(config.string_threshold, 32);
        assert!(config.parallel);
        assert_eq!(config.string_padding, StringPadding::EndSentinel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = EngineConfigBuilder::new()
            .sequential()
            .threads(4)
            .string_padding(StringPadding::Space)
            .build()
            .expect("Failed to build test config");

        assert!(!config.parallel);
        assert_eq!(config.effective_thread_count(), 4);
        assert_eq!(config.string_padding, StringPadding::Space);
    }

    #[test]
    fn test_validate_thread_count() {
        assert!(EngineConfigBuilder::new().threads(0).build().is_err());
        assert!(EngineConfigBuilder::new().threads(2048).build().is_err());
        assert!(EngineConfigBuilder::new().threads(1024).build().is_ok());
    }

    #[test]
    fn test_validate_thresholds() {
        assert!(EngineConfig::new().with_numeric_threshold(0).validate().is_err());
        assert!(EngineConfig::new().with_string_threshold(0).validate().is_err());
    }

    #[test]
    fn test_padding_from_str() {
        assert_eq!(
            "space"
                .parse::<StringPadding>()
                .expect("Failed to parse space padding"),
            StringPadding::Space
        );
        assert_eq!(
            "END".parse::<StringPadding>().expect("Failed to parse end padding"),
            StringPadding::EndSentinel
        );
        assert!("tab".parse::<StringPadding>().is_err());
        assert_eq!(StringPadding::Space.to_string(), "space");
    }

    #[test]
    fn test_presets() {
        assert!(!presets::sequential().parallel);
        assert_eq!(presets::space_padded().string_padding, StringPadding::Space);
    }
}
