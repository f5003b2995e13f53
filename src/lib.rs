//! # pylame
//!
//! Thin bindings to the LAME MP3 encoder. An [`Encoder`] owns one LAME
//! handle, forwards configuration to it, turns 16-bit PCM into MP3 bytes and
//! drains the stream on [`Encoder::flush`]. The encoding itself happens inside
//! libmp3lame.
//!
//! ```no_run
//! use pylame::Encoder;
//!
//! let mut encoder = Encoder::new()?;
//! encoder.set_in_sample_rate(44100)?;
//! encoder.set_quality(7)?;
//!
//! let mut mp3 = encoder.encode(&vec![0i16; 44100])?;
//! mp3.extend(encoder.flush()?);
//! # Ok::<(), pylame::EncoderError>(())
//! ```
//!
//! With the `python` feature the crate builds the `pylame` extension module.

pub mod config;
pub mod encoder;
pub mod error;
pub mod stats;

mod ffi;
mod handle;
mod silence;

#[cfg(feature = "python")]
mod python;

pub use config::{encode_buffer_size, EncoderConfig, StereoMode, VbrMode, FLUSH_BUFFER_SIZE};
pub use encoder::Encoder;
pub use error::{EncoderError, Result};
pub use stats::StreamStats;

#[cfg(feature = "diagnostics")]
pub use stats::StreamReport;
