//! Encoder configuration
//!
//! `EncoderConfig` carries the values an encoder forwards to LAME. It does no
//! validation of its own: the library decides what it accepts, and rejected
//! values surface as [`ConfigError`](crate::error::ConfigError) from the
//! encoder setters.

use std::os::raw::c_int;

use crate::ffi;

/// Channel count applied at construction
pub const DEFAULT_CHANNELS: i32 = 1;
/// Input sample rate applied at construction (Hz)
pub const DEFAULT_IN_SAMPLE_RATE: i32 = 22050;
/// Bitrate applied at construction (kbps)
pub const DEFAULT_BITRATE: i32 = 128;
/// Quality applied at construction (0 = best, 9 = fastest)
pub const DEFAULT_QUALITY: i32 = 5;

/// Bitrate above which multi-channel streams are forced to plain stereo
pub const STEREO_BITRATE_THRESHOLD: i32 = 128;

/// Size of the scratch buffer handed to `lame_encode_flush`
pub const FLUSH_BUFFER_SIZE: usize = 8 * 1024;

/// Worst-case MP3 output for `samples_per_channel` input samples.
///
/// This is the bound documented in `lame.h`: 1.25 × samples + 7200 bytes.
pub fn encode_buffer_size(samples_per_channel: usize) -> usize {
    samples_per_channel + samples_per_channel / 4 + 7200
}

/// Stereo encoding modes (LAME `MPEG_mode`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize, serde::Deserialize))]
pub enum StereoMode {
    /// Standard stereo
    Stereo,
    /// Joint stereo (mid/side when it pays off)
    JointStereo,
    /// Two independent channels
    DualChannel,
    /// Mono
    Mono,
    /// Let the library choose at finalization
    NotSet,
}

impl StereoMode {
    /// Raw LAME value
    pub fn to_raw(self) -> c_int {
        match self {
            StereoMode::Stereo => ffi::STEREO,
            StereoMode::JointStereo => ffi::JOINT_STEREO,
            StereoMode::DualChannel => ffi::DUAL_CHANNEL,
            StereoMode::Mono => ffi::MONO,
            StereoMode::NotSet => ffi::NOT_SET,
        }
    }

    pub fn from_raw(raw: c_int) -> Option<Self> {
        match raw {
            ffi::STEREO => Some(StereoMode::Stereo),
            ffi::JOINT_STEREO => Some(StereoMode::JointStereo),
            ffi::DUAL_CHANNEL => Some(StereoMode::DualChannel),
            ffi::MONO => Some(StereoMode::Mono),
            ffi::NOT_SET => Some(StereoMode::NotSet),
            _ => None,
        }
    }

    /// Mode forced at finalization, if any.
    ///
    /// One channel always encodes as mono. More channels switch to plain
    /// stereo only above [`STEREO_BITRATE_THRESHOLD`]; at or below it nothing
    /// is forced and LAME keeps its own choice.
    pub fn forced_for(channels: i32, bitrate: i32) -> Option<Self> {
        if channels == 1 {
            Some(StereoMode::Mono)
        } else if bitrate > STEREO_BITRATE_THRESHOLD {
            Some(StereoMode::Stereo)
        } else {
            None
        }
    }
}

/// Bitrate control modes (LAME `vbr_mode`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize, serde::Deserialize))]
pub enum VbrMode {
    /// Constant bitrate
    Off,
    Mt,
    Rh,
    /// Average bitrate
    Abr,
    /// LAME's default VBR algorithm
    #[default]
    Mtrh,
}

impl VbrMode {
    /// Raw LAME value
    pub fn to_raw(self) -> c_int {
        match self {
            VbrMode::Off => ffi::VBR_OFF,
            VbrMode::Mt => ffi::VBR_MT,
            VbrMode::Rh => ffi::VBR_RH,
            VbrMode::Abr => ffi::VBR_ABR,
            VbrMode::Mtrh => ffi::VBR_MTRH,
        }
    }

    pub fn from_raw(raw: c_int) -> Option<Self> {
        match raw {
            ffi::VBR_OFF => Some(VbrMode::Off),
            ffi::VBR_MT => Some(VbrMode::Mt),
            ffi::VBR_RH => Some(VbrMode::Rh),
            ffi::VBR_ABR => Some(VbrMode::Abr),
            ffi::VBR_MTRH => Some(VbrMode::Mtrh),
            _ => None,
        }
    }
}

/// Values forwarded to the library when an encoder is set up
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize, serde::Deserialize))]
pub struct EncoderConfig {
    /// Number of interleaved channels in the input (1 or 2)
    pub channels: i32,
    /// Input sample rate in Hz
    pub in_sample_rate: i32,
    /// Output sample rate in Hz; `None` lets LAME pick one
    pub out_sample_rate: Option<i32>,
    /// Target bitrate in kbps
    pub bitrate: i32,
    /// Algorithm quality, 0 (best) to 9 (fastest)
    pub quality: i32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            channels: DEFAULT_CHANNELS,
            in_sample_rate: DEFAULT_IN_SAMPLE_RATE,
            out_sample_rate: None,
            bitrate: DEFAULT_BITRATE,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl EncoderConfig {
    /// Create a configuration holding the baseline defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channels(mut self, channels: i32) -> Self {
        self.channels = channels;
        self
    }

    pub fn in_sample_rate(mut self, rate: i32) -> Self {
        self.in_sample_rate = rate;
        self
    }

    pub fn out_sample_rate(mut self, rate: i32) -> Self {
        self.out_sample_rate = Some(rate);
        self
    }

    pub fn bitrate(mut self, bitrate: i32) -> Self {
        self.bitrate = bitrate;
        self
    }

    pub fn quality(mut self, quality: i32) -> Self {
        self.quality = quality;
        self
    }
}
