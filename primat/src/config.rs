//! Configuration for the parallel execution engine
//!
//! Replaces a process-wide "parallel enabled" switch with an explicit value
//! handed to each [`ParallelExecutor`](crate::ParallelExecutor).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration deciding when bulk operations fan out to workers
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ParallelConfig {
    /// Whether bulk operations may run in parallel at all
    pub enabled: bool,
    /// Element (or operation) count a bulk call must exceed to run in parallel
    pub min_count_for_parallel: u64,
    /// Size of a dedicated worker pool; `None` uses the global rayon pool
    pub workers: Option<usize>,
}

impl ParallelConfig {
    /// Default threshold above which a bulk call is split across workers
    pub const DEFAULT_MIN_COUNT: u64 = 8192;

    /// Config that never leaves the calling thread
    pub fn serial() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Enable or disable parallel execution
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the element count threshold
    pub fn with_threshold(mut self, min_count_for_parallel: u64) -> Self {
        self.min_count_for_parallel = min_count_for_parallel;
        self
    }

    /// Run on a dedicated pool of `workers` threads
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Parse a config from JSON, missing fields take their defaults
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_count_for_parallel: Self::DEFAULT_MIN_COUNT,
            workers: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ParallelConfig::default()
            .with_threshold(16)
            .with_workers(3);
        assert!(config.enabled);
        assert_eq!(config.min_count_for_parallel, 16);
        assert_eq!(config.workers, Some(3));

        assert!(!ParallelConfig::serial().enabled);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_fills_defaults() {
        let config = ParallelConfig::from_json(r#"{ "workers": 2 }"#).unwrap();
        assert_eq!(config.workers, Some(2));
        assert!(config.enabled);
        assert_eq!(config.min_count_for_parallel, ParallelConfig::DEFAULT_MIN_COUNT);

        let disabled = ParallelConfig::from_json(r#"{ "enabled": false }"#).unwrap();
        assert_eq!(disabled, ParallelConfig::serial());
    }
}
