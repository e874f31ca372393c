//! Configuration for bytelines
//!
//! Centralized configuration with sensible defaults.

use crate::error::{ByteError, Result};

/// Default capacity of a fresh `ByteBuffer`
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// Default capacity of a `LineReader` window
pub const DEFAULT_WINDOW_CAPACITY: usize = 1024;

/// Default number of buckets in a `ByteKeyedMap`
pub const DEFAULT_BUCKET_COUNT: usize = 100;

/// Sizing configuration shared by buffers, readers and maps
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Buffer Configuration
    // -------------------------------------------------------------------------
    /// Capacity a standalone buffer starts with (in bytes)
    pub buffer_capacity: usize,

    // -------------------------------------------------------------------------
    // Reader Configuration
    // -------------------------------------------------------------------------
    /// Initial capacity of the reader's fill/scan window (in bytes)
    pub window_capacity: usize,

    /// Size of the scratch array used for incremental reads (in bytes)
    pub scratch_size: usize,

    // -------------------------------------------------------------------------
    // Map Configuration
    // -------------------------------------------------------------------------
    /// Fixed bucket count; never changes after construction
    pub bucket_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            scratch_size: DEFAULT_WINDOW_CAPACITY,
            bucket_count: DEFAULT_BUCKET_COUNT,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings the reader or map cannot operate with
    pub fn validate(&self) -> Result<()> {
        if self.scratch_size == 0 {
            return Err(ByteError::Config(
                "scratch_size must be greater than zero".to_string(),
            ));
        }
        if self.bucket_count == 0 {
            return Err(ByteError::Config(
                "bucket_count must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the default buffer capacity (in bytes)
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.config.buffer_capacity = capacity;
        self
    }

    /// Set the initial reader window capacity (in bytes)
    pub fn window_capacity(mut self, capacity: usize) -> Self {
        self.config.window_capacity = capacity;
        self
    }

    /// Set the scratch array size for incremental reads (in bytes)
    pub fn scratch_size(mut self, size: usize) -> Self {
        self.config.scratch_size = size;
        self
    }

    /// Set the map bucket count
    pub fn bucket_count(mut self, count: usize) -> Self {
        self.config.bucket_count = count;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
