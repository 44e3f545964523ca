//! Half-band FIR resampling stage.
//!
//! A half-band lowpass has its cutoff at one quarter of the sampling rate,
//! which makes it the natural building block for 2x rate conversion:
//! upsampling zero-stuffs the input and filters out the spectral image,
//! downsampling filters out the top octave and keeps every other sample.
//! Every even-distance tap of the impulse response is zero (except the
//! center tap at 0.5), and the response is symmetric, so the stage is
//! linear-phase with a constant group delay of half the filter order.
//!
//! The coefficients are generated at construction by windowing the ideal
//! half-band impulse response with a Blackman window. This keeps the
//! structural zeros exact and the DC gain normalized, and approaches the
//! minimax behavior of an equiripple design closely enough for audio-rate
//! anti-aliasing (stopband rejection around -70 dB at 63 taps).

use core::f32::consts::PI;

/// Number of taps in each half-band stage.
///
/// 63 taps puts the passband edge near 0.2x the stage rate and the stopband
/// rejection around -70 dB, at a group delay of 31 samples per stage.
pub const HALFBAND_TAPS: usize = 63;

/// Normalized cutoff of the half-band prototype (fs/4).
const HALFBAND_CUTOFF: f32 = 0.25;

/// Design a half-band lowpass FIR by windowing the ideal impulse response.
///
/// The tap count must be of the form `4k + 3` so that the outermost taps
/// land on nonzero positions of the half-band impulse response. Structural
/// zeros are written exactly rather than left to floating-point sine
/// evaluation, and the result is normalized to unity DC gain.
fn design_halfband(taps: usize) -> Vec<f32> {
    debug_assert!(taps >= 7 && taps % 4 == 3, "half-band length must be 4k + 3");

    let center = (taps / 2) as isize;
    let mut coeffs = vec![0.0_f32; taps];

    for (i, coeff) in coeffs.iter_mut().enumerate() {
        let m = i as isize - center;
        if m == 0 {
            *coeff = 2.0 * HALFBAND_CUTOFF;
            continue;
        }
        if m % 2 == 0 {
            // Structural zero of the half-band impulse response.
            continue;
        }

        let x = m as f32;
        let sinc = libm::sinf(2.0 * PI * HALFBAND_CUTOFF * x) / (PI * x);

        // Blackman window
        let t = 2.0 * PI * i as f32 / (taps - 1) as f32;
        let window = 0.42 - 0.5 * libm::cosf(t) + 0.08 * libm::cosf(2.0 * t);

        *coeff = sinc * window;
    }

    let sum: f32 = coeffs.iter().sum();
    for coeff in &mut coeffs {
        *coeff /= sum;
    }

    coeffs
}

/// Shift a new sample into the front of a FIR delay line.
#[inline]
fn push(state: &mut [f32], sample: f32) {
    let n = state.len();
    state.copy_within(..n - 1, 1);
    state[0] = sample;
}

/// Convolution sum of the delay line against the coefficients.
#[inline]
fn convolve(state: &[f32], coeffs: &[f32]) -> f32 {
    state.iter().zip(coeffs).map(|(s, c)| s * c).sum()
}

/// One 2x up/down resampling stage.
///
/// Holds separate delay lines for the upsampling and downsampling
/// directions so a single stage can serve both halves of an
/// oversample-process-decimate round trip without the two paths
/// corrupting each other's history.
#[derive(Debug, Clone)]
pub struct HalfbandStage {
    /// Symmetric half-band lowpass coefficients.
    coeffs: Vec<f32>,
    /// Delay line for the upsampling (interpolation) direction.
    up_state: Vec<f32>,
    /// Delay line for the downsampling (decimation) direction.
    down_state: Vec<f32>,
}

impl HalfbandStage {
    /// Create a stage with freshly designed coefficients and zeroed state.
    pub fn new() -> Self {
        let coeffs = design_halfband(HALFBAND_TAPS);
        Self {
            up_state: vec![0.0; coeffs.len()],
            down_state: vec![0.0; coeffs.len()],
            coeffs,
        }
    }

    /// Zero both delay lines without touching the coefficients.
    pub fn clear(&mut self) {
        self.up_state.fill(0.0);
        self.down_state.fill(0.0);
    }

    /// Group delay of the filter in samples at the stage's doubled rate.
    pub fn group_delay(&self) -> usize {
        (self.coeffs.len() - 1) / 2
    }

    /// Upsample by 2x: zero-stuff, filter out the image, restore level.
    ///
    /// `dst.len()` must be exactly `2 * src.len()`.
    pub fn upsample(&mut self, dst: &mut [f32], src: &[f32]) {
        debug_assert_eq!(dst.len(), src.len() * 2);

        for (i, &sample) in src.iter().enumerate() {
            // Zero-stuffing halves the passband level; the factor of two
            // after filtering restores it.
            push(&mut self.up_state, sample);
            dst[2 * i] = 2.0 * convolve(&self.up_state, &self.coeffs);

            push(&mut self.up_state, 0.0);
            dst[2 * i + 1] = 2.0 * convolve(&self.up_state, &self.coeffs);
        }
    }

    /// Downsample by 2x: filter out the top octave, keep every other sample.
    ///
    /// `src.len()` must be exactly `2 * dst.len()`.
    pub fn downsample(&mut self, dst: &mut [f32], src: &[f32]) {
        debug_assert_eq!(src.len(), dst.len() * 2);

        for (i, out) in dst.iter_mut().enumerate() {
            push(&mut self.down_state, src[2 * i]);
            push(&mut self.down_state, src[2 * i + 1]);

            // Only the kept sample's convolution is evaluated; the dropped
            // sample never leaves the delay line.
            *out = convolve(&self.down_state, &self.coeffs);
        }
    }
}

impl Default for HalfbandStage {
    fn default() -> Self {
        Self::new()
    }
}
