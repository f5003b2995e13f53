//! The encoder adapter
//!
//! [`Encoder`] owns one LAME handle and drives it through a stream:
//! setters configure it, the first [`Encoder::encode`] finalizes the
//! parameters, [`Encoder::flush`] drains the last frames and closes the
//! stream. A closed stream can be followed by another one on the same
//! encoder, with whatever configuration is current at that point.

use std::fmt;
use std::os::raw::c_int;

use log::{debug, trace, warn};

use crate::config::{encode_buffer_size, EncoderConfig, StereoMode, VbrMode, FLUSH_BUFFER_SIZE};
use crate::error::{
    ConfigError, EncodingError, InitError, InputDataError, Parameter, Result, StateError,
};
use crate::ffi;
use crate::handle::Handle;
use crate::silence;
use crate::stats::StreamStats;

#[cfg(feature = "diagnostics")]
use crate::stats::StreamReport;

/// Where the handle is in its stream lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Parameters not finalized yet
    Configuring,
    /// `lame_init_params` succeeded; the channel layout is locked for this stream
    Encoding { channels: usize },
    /// The stream was flushed. The handle cannot be finalized a second time
    /// and is reopened before the next stream.
    Drained,
}

/// MP3 encoder backed by a single LAME handle.
///
/// The encoder is `Send` but not `Sync`: every operation takes `&mut self`,
/// so access to one instance is serialized by the borrow checker.
pub struct Encoder {
    handle: Handle,
    /// Values the library accepted, replayed when the handle is reopened
    config: EncoderConfig,
    state: State,
    stats: StreamStats,
}

impl Encoder {
    /// Create an encoder with the baseline defaults: mono, 22050 Hz input,
    /// 128 kbps, quality 5, no VBR tag, default VBR mode, library output
    /// silenced.
    pub fn new() -> Result<Self> {
        let config = EncoderConfig::default();
        let handle = open_handle(&config)?;
        debug!("Created LAME encoder with {:?}", config);

        Ok(Self {
            handle,
            config,
            state: State::Configuring,
            stats: StreamStats::default(),
        })
    }

    /// Create an encoder and forward every value of `config` through the
    /// regular setters.
    pub fn with_config(config: &EncoderConfig) -> Result<Self> {
        let mut encoder = Self::new()?;
        encoder.set_channels(config.channels)?;
        encoder.set_in_sample_rate(config.in_sample_rate)?;
        encoder.set_bitrate(config.bitrate)?;
        encoder.set_quality(config.quality)?;
        if let Some(rate) = config.out_sample_rate {
            encoder.set_out_sample_rate(rate)?;
        }
        Ok(encoder)
    }

    /// Set the number of input channels.
    ///
    /// Like every setter, this takes effect at the next finalization; an
    /// open stream keeps the layout it started with.
    pub fn set_channels(&mut self, channels: i32) -> Result<()> {
        self.forward(Parameter::Channels, channels)
    }

    /// Set the target bitrate in kbps
    pub fn set_bitrate(&mut self, bitrate: i32) -> Result<()> {
        self.forward(Parameter::Bitrate, bitrate)
    }

    /// Set the input sample rate in Hz
    pub fn set_in_sample_rate(&mut self, rate: i32) -> Result<()> {
        self.forward(Parameter::InSampleRate, rate)
    }

    /// Set the output sample rate in Hz
    pub fn set_out_sample_rate(&mut self, rate: i32) -> Result<()> {
        self.forward(Parameter::OutSampleRate, rate)
    }

    /// Set the algorithm quality, 0 (best) to 9 (fastest)
    pub fn set_quality(&mut self, quality: i32) -> Result<()> {
        self.forward(Parameter::Quality, quality)
    }

    /// Point LAME's error, debug and message reporters at a no-op again
    pub fn silence(&mut self) -> Result<()> {
        silence::install(&mut self.handle)?;
        Ok(())
    }

    /// Encode interleaved 16-bit PCM and return the MP3 bytes produced.
    ///
    /// The first call of a stream finalizes the configuration. The result
    /// may be empty while LAME buffers input; it is never longer than
    /// [`encode_buffer_size`] for the per-channel sample count.
    pub fn encode(&mut self, pcm: &[i16]) -> Result<Vec<u8>> {
        if pcm.is_empty() {
            return Err(InputDataError::EmptyInput.into());
        }

        let channels = match self.state {
            State::Encoding { channels } => channels,
            State::Configuring | State::Drained => self.pending_channels(),
        };
        if pcm.len() % channels != 0 {
            return Err(InputDataError::NotInterleaved {
                len: pcm.len(),
                channels,
            }
            .into());
        }

        let sample_count = pcm.len() / channels;
        let capacity = encode_buffer_size(sample_count);
        let (nsamples, mp3buf_size) =
            match (c_int::try_from(sample_count), c_int::try_from(capacity)) {
                (Ok(nsamples), Ok(size)) => (nsamples, size),
                _ => return Err(InputDataError::TooLong { len: pcm.len() }.into()),
            };

        if !self.is_encoding() {
            let locked = self.init_encoder()?;
            debug_assert_eq!(locked, channels);
        }

        let mut output = vec![0u8; capacity];
        let written = if channels > 1 {
            self.handle
                .encode_interleaved(pcm, nsamples, &mut output, mp3buf_size)
        } else {
            self.handle.encode_mono(pcm, nsamples, &mut output, mp3buf_size)
        };

        if written < 0 {
            warn!("lame_encode_buffer failed with status {}", written);
            return Err(EncodingError::Library { code: written }.into());
        }

        output.truncate(written as usize);
        self.stats.record_encode(sample_count, output.len());
        trace!(
            "Encoded {} samples x {} channels into {} bytes",
            sample_count,
            channels,
            output.len()
        );
        Ok(output)
    }

    /// Drain the frames LAME still holds and close the stream.
    ///
    /// The next [`Encoder::encode`] starts a new stream and picks up any
    /// configuration changes made in between.
    pub fn flush(&mut self) -> Result<Vec<u8>> {
        if !self.is_encoding() {
            return Err(StateError::NotEncoding.into());
        }

        let mut output = vec![0u8; FLUSH_BUFFER_SIZE];
        let written = self.handle.flush(&mut output);
        self.state = State::Drained;

        if written < 0 {
            warn!("lame_encode_flush failed with status {}", written);
            return Err(EncodingError::Flush { code: written }.into());
        }

        output.truncate(written as usize);
        self.stats.record_flush(output.len());
        debug!("Flushed {} bytes, stream closed", output.len());
        Ok(output)
    }

    /// Whether a stream is open (parameters finalized and not yet flushed)
    pub fn is_encoding(&self) -> bool {
        matches!(self.state, State::Encoding { .. })
    }

    pub fn channels(&self) -> i32 {
        self.handle.num_channels()
    }

    pub fn bitrate(&self) -> i32 {
        self.handle.brate()
    }

    pub fn in_sample_rate(&self) -> i32 {
        self.handle.in_samplerate()
    }

    /// Output sample rate; 0 until LAME picks one at finalization, unless set
    pub fn out_sample_rate(&self) -> i32 {
        self.handle.out_samplerate()
    }

    pub fn quality(&self) -> i32 {
        self.handle.quality()
    }

    /// Stereo mode as the library currently reports it
    pub fn stereo_mode(&self) -> Option<StereoMode> {
        StereoMode::from_raw(self.handle.mode())
    }

    pub fn vbr_mode(&self) -> Option<VbrMode> {
        VbrMode::from_raw(self.handle.vbr())
    }

    /// Settings the library has accepted so far
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    /// Timestamped snapshot of configuration and counters
    #[cfg(feature = "diagnostics")]
    pub fn report(&self) -> StreamReport {
        StreamReport::new(self.config.clone(), self.is_encoding(), self.stats.clone())
    }

    /// Channel count the next finalization will lock in
    fn pending_channels(&self) -> usize {
        // LAME never reports fewer than one channel.
        self.handle.num_channels().max(1) as usize
    }

    fn forward(&mut self, parameter: Parameter, value: i32) -> Result<()> {
        let code = apply(&mut self.handle, parameter, value);
        if code < 0 {
            warn!("LAME rejected {} = {} (status {})", parameter, value, code);
            return Err(ConfigError::Rejected {
                parameter,
                value,
                code,
            }
            .into());
        }

        match parameter {
            Parameter::Channels => self.config.channels = value,
            Parameter::Bitrate => self.config.bitrate = value,
            Parameter::InSampleRate => self.config.in_sample_rate = value,
            Parameter::OutSampleRate => self.config.out_sample_rate = Some(value),
            Parameter::Quality => self.config.quality = value,
        }
        Ok(())
    }

    /// Finalize the parameters and open a stream. Returns the locked channel count.
    fn init_encoder(&mut self) -> Result<usize> {
        if self.state == State::Drained {
            self.rearm()?;
        }

        let channels = self.handle.num_channels();
        let bitrate = self.handle.brate();
        let forced = StereoMode::forced_for(channels, bitrate);
        if let Some(mode) = forced {
            self.handle.set_mode(mode.to_raw());
        }

        let code = self.handle.init_params();
        if code < 0 {
            warn!("lame_init_params failed with status {}", code);
            return Err(InitError::ParamsRejected { code }.into());
        }

        let locked = self.pending_channels();
        self.state = State::Encoding { channels: locked };
        debug!(
            "Stream opened: {} channel(s), {} kbps, forced mode {:?}",
            locked, bitrate, forced
        );
        Ok(locked)
    }

    /// Replace the spent handle with a fresh one carrying the same settings.
    fn rearm(&mut self) -> Result<()> {
        self.handle = open_handle(&self.config)?;
        self.state = State::Configuring;
        debug!("Reopened LAME handle for a new stream");
        Ok(())
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish()
    }
}

fn apply(handle: &mut Handle, parameter: Parameter, value: i32) -> c_int {
    match parameter {
        Parameter::Channels => handle.set_num_channels(value),
        Parameter::Bitrate => handle.set_brate(value),
        Parameter::InSampleRate => handle.set_in_samplerate(value),
        Parameter::OutSampleRate => handle.set_out_samplerate(value),
        Parameter::Quality => handle.set_quality(value),
    }
}

/// Acquire a handle and load it with `config` plus the fixed baseline:
/// no VBR tag, silenced reporters, default VBR mode.
fn open_handle(config: &EncoderConfig) -> Result<Handle> {
    let mut handle = Handle::open()?;

    let mut settings = vec![
        (Parameter::Channels, config.channels),
        (Parameter::InSampleRate, config.in_sample_rate),
        (Parameter::Bitrate, config.bitrate),
        (Parameter::Quality, config.quality),
    ];
    if let Some(rate) = config.out_sample_rate {
        settings.push((Parameter::OutSampleRate, rate));
    }
    for (parameter, value) in settings {
        let code = apply(&mut handle, parameter, value);
        if code < 0 {
            return Err(ConfigError::Rejected {
                parameter,
                value,
                code,
            }
            .into());
        }
    }

    handle.set_write_vbr_tag(false);
    silence::install(&mut handle)?;
    handle.set_vbr(ffi::VBR_DEFAULT);
    Ok(handle)
}
