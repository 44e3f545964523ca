//! Oversampled arctangent saturation.
//!
//! A memoryless waveshaper generates harmonics without limit, and any
//! harmonic pushed past Nyquist folds back into the audible band. This
//! stage sidesteps that by running the arctangent transfer function at an
//! internally raised rate: blocks are upsampled through a linear-phase
//! half-band cascade, shaped sample by sample, and downsampled through the
//! matched cascade, which strips the out-of-band harmonics before they can
//! alias. The filter pair costs a fixed group delay that the caller reads
//! via [`OversampledSaturator::latency`] and forwards to its
//! delay-compensation mechanism.
//!
//! The stage is driven by a host layer: once per format change it is
//! [`configure`](OversampledSaturator::configure)d, then invoked once per
//! audio block. Only [`set_gain`](OversampledSaturator::set_gain) may be
//! called between blocks, and the driver is responsible for serializing it
//! against the audio thread; the stage itself takes no locks.

use core::fmt;

use satura_core::{
    ArctanShaper, Oversampler, ParamDescriptor, ParamUnit, ParameterInfo, oversampling_factor,
};

/// Internal rate the saturator raises its processing to, in Hz.
///
/// The oversampling factor is whatever power of two brings the configured
/// sample rate closest to this from below: 4x at 44.1/48 kHz, 2x at
/// 88.2/96 kHz, none at 176.4 kHz and up.
pub const TARGET_INTERNAL_RATE: f64 = 192_000.0;

/// Audio format negotiated by the host before any audio flows.
///
/// Immutable between reconfigurations; every `process` call is validated
/// against the most recently accepted spec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Largest block length a single `process` call may carry.
    pub max_block_size: usize,
    /// Channel count of every block.
    pub channels: usize,
}

/// A configuration the stage refused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Sample rate was zero, negative, or non-finite.
    InvalidSampleRate(f64),
    /// Maximum block size was zero.
    InvalidBlockSize,
    /// Channel count was zero.
    InvalidChannelCount,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSampleRate(rate) => {
                write!(f, "sample rate must be a positive finite number, got {rate}")
            }
            Self::InvalidBlockSize => write!(f, "maximum block size must be nonzero"),
            Self::InvalidChannelCount => write!(f, "channel count must be nonzero"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A `process` call the stage refused, before touching any filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessError {
    /// `process` was called before a successful `configure`.
    NotConfigured,
    /// Input or output channel count differs from the configured spec.
    ChannelMismatch {
        /// Channel count from the accepted spec.
        expected: usize,
        /// Channel count of the offending block.
        got: usize,
    },
    /// Channel lengths are ragged, or input and output lengths disagree.
    LengthMismatch,
    /// Block is longer than the configured maximum.
    BlockTooLarge {
        /// Maximum from the accepted spec.
        max: usize,
        /// Length of the offending block.
        got: usize,
    },
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "process called before configure"),
            Self::ChannelMismatch { expected, got } => {
                write!(f, "expected {expected} channels, got {got}")
            }
            Self::LengthMismatch => {
                write!(f, "input and output channel lengths must all match")
            }
            Self::BlockTooLarge { max, got } => {
                write!(f, "block of {got} samples exceeds the configured maximum {max}")
            }
        }
    }
}

impl std::error::Error for ProcessError {}

/// Anti-aliased arctangent saturation stage.
///
/// Owns one [`Oversampler`] per channel (the multirate filter pair), a
/// shared oversampled scratch buffer, and the current [`ArctanShaper`].
/// The stage has two states: unconfigured after construction, where
/// `process` returns [`ProcessError::NotConfigured`] and `latency` reads
/// zero, and configured after a successful [`configure`](Self::configure),
/// where processing, reset, and latency queries are all valid.
/// Reconfiguring is always legal and starts from fresh filter state.
///
/// # Example
///
/// ```rust
/// use satura_effects::{OversampledSaturator, ProcessSpec};
///
/// let mut saturator = OversampledSaturator::new();
/// saturator
///     .configure(ProcessSpec {
///         sample_rate: 48_000.0,
///         max_block_size: 512,
///         channels: 2,
///     })
///     .unwrap();
/// saturator.set_gain(4.0);
///
/// let latency = saturator.latency(); // forward to the host
///
/// let left = [0.5_f32; 512];
/// let right = [0.5_f32; 512];
/// let mut out_l = [0.0_f32; 512];
/// let mut out_r = [0.0_f32; 512];
/// saturator
///     .process(
///         &[&left, &right],
///         &mut [&mut out_l, &mut out_r],
///         false,
///     )
///     .unwrap();
/// # assert!(latency > 0);
/// ```
#[derive(Debug)]
pub struct OversampledSaturator {
    /// Most recently accepted format, `None` while unconfigured.
    spec: Option<ProcessSpec>,
    /// Power-of-two rate multiplier derived from the spec.
    factor: usize,
    /// `sample_rate * factor`, zero while unconfigured.
    oversampled_rate: f64,
    /// Rounded group delay of the filter pair in input-rate samples.
    latency: usize,
    /// One multirate filter pair per channel.
    resamplers: Vec<Oversampler>,
    /// Scratch block at the oversampled rate, shared across channels.
    os_buffer: Vec<f32>,
    /// Current transfer function; replaced wholesale by `set_gain`.
    shaper: ArctanShaper,
}

impl OversampledSaturator {
    /// Create an unconfigured stage with unity gain.
    pub fn new() -> Self {
        Self {
            spec: None,
            factor: 1,
            oversampled_rate: 0.0,
            latency: 0,
            resamplers: Vec::new(),
            os_buffer: Vec::new(),
            shaper: ArctanShaper::default(),
        }
    }

    /// Adopt a new audio format, rebuilding the filter bank.
    ///
    /// Derives the oversampling factor from [`TARGET_INTERNAL_RATE`],
    /// replaces the per-channel filter pairs, sizes the oversampled scratch
    /// buffer for `max_block_size`, and zeroes all delay lines. The
    /// previous bank is discarded up front: a rejected spec leaves the
    /// stage unconfigured rather than running on stale filters.
    ///
    /// Not safe to call concurrently with [`process`](Self::process); the
    /// driver reconfigures only while processing is stopped.
    pub fn configure(&mut self, spec: ProcessSpec) -> Result<(), ConfigError> {
        self.spec = None;
        self.resamplers.clear();
        self.os_buffer.clear();
        self.latency = 0;
        self.oversampled_rate = 0.0;

        if !(spec.sample_rate.is_finite() && spec.sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate(spec.sample_rate));
        }
        if spec.max_block_size == 0 {
            return Err(ConfigError::InvalidBlockSize);
        }
        if spec.channels == 0 {
            return Err(ConfigError::InvalidChannelCount);
        }

        let factor = oversampling_factor(spec.sample_rate, TARGET_INTERNAL_RATE);
        self.factor = factor;
        self.oversampled_rate = spec.sample_rate * factor as f64;
        self.resamplers = (0..spec.channels)
            .map(|_| Oversampler::new(factor, spec.max_block_size))
            .collect();
        self.os_buffer = vec![0.0; spec.max_block_size * factor];
        self.latency = libm::round(self.resamplers[0].latency()) as usize;
        self.spec = Some(spec);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "saturator configured: {}x oversampling, internal rate {} Hz, latency {} samples",
            self.factor,
            self.oversampled_rate,
            self.latency
        );

        Ok(())
    }

    /// Process one block of planar audio.
    ///
    /// `input` and `output` must both carry the configured channel count,
    /// with every channel slice the same length, at most the configured
    /// maximum. Shape violations are rejected before any delay line is
    /// touched, so a bad call cannot corrupt filter state.
    ///
    /// With `bypassed` set, the output is a sample-exact copy of the input
    /// and the filter state is left untouched. Otherwise each channel is
    /// upsampled, shaped at the oversampled rate, and downsampled back;
    /// filter histories persist across calls, so discontinuous playback
    /// requires a [`reset`](Self::reset). Steady-state processing performs
    /// no allocation.
    pub fn process(
        &mut self,
        input: &[&[f32]],
        output: &mut [&mut [f32]],
        bypassed: bool,
    ) -> Result<(), ProcessError> {
        let spec = self.spec.ok_or(ProcessError::NotConfigured)?;

        if input.len() != spec.channels {
            return Err(ProcessError::ChannelMismatch {
                expected: spec.channels,
                got: input.len(),
            });
        }
        if output.len() != spec.channels {
            return Err(ProcessError::ChannelMismatch {
                expected: spec.channels,
                got: output.len(),
            });
        }

        let block_len = input[0].len();
        if input.iter().any(|ch| ch.len() != block_len)
            || output.iter().any(|ch| ch.len() != block_len)
        {
            return Err(ProcessError::LengthMismatch);
        }
        if block_len > spec.max_block_size {
            return Err(ProcessError::BlockTooLarge {
                max: spec.max_block_size,
                got: block_len,
            });
        }

        if bypassed {
            for (dst, src) in output.iter_mut().zip(input) {
                dst.copy_from_slice(src);
            }
            return Ok(());
        }

        let oversampled = &mut self.os_buffer[..block_len * self.factor];
        for (channel, resampler) in self.resamplers.iter_mut().enumerate() {
            resampler.upsample(oversampled, input[channel]);
            self.shaper.shape_block(oversampled);
            resampler.downsample(&mut *output[channel], oversampled);
        }

        Ok(())
    }

    /// Zero all filter delay lines without reallocating.
    ///
    /// Call on any playback discontinuity (seek, loop point, transport
    /// stop) so stale filter history cannot bleed into the next block.
    /// A no-op while unconfigured.
    pub fn reset(&mut self) {
        for resampler in &mut self.resamplers {
            resampler.reset();
        }
    }

    /// Fixed group delay of the filter pair in input-rate samples.
    ///
    /// Constant between `configure` calls; the host reads it once after
    /// each reconfiguration and feeds it to its latency compensation.
    /// Zero while unconfigured.
    pub fn latency(&self) -> usize {
        self.latency
    }

    /// Set the saturation drive.
    ///
    /// The gain and its normalization `1 / atan(gain)` are replaced
    /// together as one value, so a concurrent block never sees one without
    /// the other. The driver serializes this call against the audio thread
    /// (single writer, single reader).
    ///
    /// # Panics
    /// Panics if `value` is zero or non-finite; the normalization is
    /// undefined at zero and a zero here is a parameter-mapping bug in the
    /// caller, not a runtime condition.
    pub fn set_gain(&mut self, value: f32) {
        self.shaper = ArctanShaper::new(value);
    }

    /// Current saturation drive.
    pub fn gain(&self) -> f32 {
        self.shaper.gain()
    }

    /// Internal processing rate in Hz (sample rate times the oversampling
    /// factor), for diagnostics. Zero while unconfigured.
    pub fn oversampled_rate(&self) -> f64 {
        self.oversampled_rate
    }

    /// Power-of-two oversampling factor in effect.
    pub fn factor(&self) -> usize {
        self.factor
    }

    /// The accepted format, or `None` while unconfigured.
    pub fn spec(&self) -> Option<ProcessSpec> {
        self.spec
    }
}

impl Default for OversampledSaturator {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterInfo for OversampledSaturator {
    fn param_count(&self) -> usize {
        1
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor {
                name: "Gain",
                short_name: "Gain",
                unit: ParamUnit::None,
                min: 0.5,
                max: 10.0,
                default: 1.0,
                step: 0.01,
            }),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.gain(),
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_gain(value.clamp(0.5, 10.0)),
            _ => {}
        }
    }
}
