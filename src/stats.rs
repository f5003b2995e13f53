//! Per-encoder counters
//!
//! With the `diagnostics` feature the counters serialize, and an encoder can
//! produce a timestamped JSON report of its configuration and activity.

#[cfg(feature = "diagnostics")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "diagnostics")]
use crate::config::EncoderConfig;

/// What an encoder has done since it was constructed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize, Deserialize))]
pub struct StreamStats {
    /// Successful `encode` calls
    pub encode_calls: u64,
    /// Samples per channel handed to the library
    pub samples_per_channel: u64,
    /// Bytes returned by `encode`
    pub bytes_encoded: u64,
    /// Bytes returned by `flush`
    pub bytes_flushed: u64,
    /// Streams closed by `flush`
    pub streams_completed: u64,
}

impl StreamStats {
    pub(crate) fn record_encode(&mut self, samples_per_channel: usize, bytes: usize) {
        self.encode_calls += 1;
        self.samples_per_channel += samples_per_channel as u64;
        self.bytes_encoded += bytes as u64;
    }

    pub(crate) fn record_flush(&mut self, bytes: usize) {
        self.bytes_flushed += bytes as u64;
        self.streams_completed += 1;
    }

    /// Total MP3 bytes produced so far
    pub fn total_bytes(&self) -> u64 {
        self.bytes_encoded + self.bytes_flushed
    }
}

/// Snapshot of an encoder for offline inspection
#[cfg(feature = "diagnostics")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamReport {
    /// When the snapshot was taken
    pub generated_at: chrono::DateTime<chrono::Utc>,
    /// Settings the library accepted
    pub config: EncoderConfig,
    /// Whether a stream was open at snapshot time
    pub encoding: bool,
    pub stats: StreamStats,
}

#[cfg(feature = "diagnostics")]
impl StreamReport {
    pub(crate) fn new(config: EncoderConfig, encoding: bool, stats: StreamStats) -> Self {
        Self {
            generated_at: chrono::Utc::now(),
            config,
            encoding,
            stats,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the report as JSON to `path`
    pub fn save_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::from)?;
        std::fs::write(path, json)?;
        log::info!("Stream report saved to: {}", path.display());
        Ok(())
    }
}
