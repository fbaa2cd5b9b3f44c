use serde::{Deserialize, Serialize};

use crate::error::{DagError, DagResult};

/// Default leaf chunk size: 256 KiB.
pub const DEFAULT_CHUNK_SIZE: usize = 256 * 1024;

/// Default maximum number of links in one list object.
pub const DEFAULT_MAX_FANOUT: usize = 4096;

/// Chunking parameters.
///
/// Digests depend on both values: the same file added with different
/// parameters produces a different graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DagConfig {
    /// Maximum bytes in one leaf blob.
    pub chunk_size: usize,
    /// Maximum links in one list object.
    pub max_fanout: usize,
}

impl Default for DagConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_fanout: DEFAULT_MAX_FANOUT,
        }
    }
}

impl DagConfig {
    /// Config with explicit parameters. Call [`validate`](Self::validate)
    /// before use.
    pub fn new(chunk_size: usize, max_fanout: usize) -> Self {
        Self {
            chunk_size,
            max_fanout,
        }
    }

    /// Reject a zero chunk size or a fan-out below two.
    pub fn validate(&self) -> DagResult<()> {
        if self.chunk_size == 0 {
            return Err(DagError::InvalidConfig("chunk_size must be at least 1".into()));
        }
        if self.max_fanout < 2 {
            return Err(DagError::InvalidConfig(format!(
                "max_fanout must be at least 2, got {}",
                self.max_fanout
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = DagConfig::default();
        assert_eq!(c.chunk_size, 262_144);
        assert_eq!(c.max_fanout, 4096);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let err = DagConfig::new(0, 4).validate().unwrap_err();
        assert!(matches!(err, DagError::InvalidConfig(_)));
    }

    #[test]
    fn fanout_below_two_rejected() {
        assert!(DagConfig::new(4, 1).validate().is_err());
        assert!(DagConfig::new(4, 2).validate().is_ok());
    }

    #[test]
    fn toml_fills_missing_fields_with_defaults() {
        let c: DagConfig = toml::from_str("chunk_size = 1024").unwrap();
        assert_eq!(c.chunk_size, 1024);
        assert_eq!(c.max_fanout, DEFAULT_MAX_FANOUT);

        let empty: DagConfig = toml::from_str("").unwrap();
        assert_eq!(empty, DagConfig::default());
    }
}
