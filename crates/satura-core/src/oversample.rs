//! Multirate oversampling filter pair for anti-aliased nonlinear processing.
//!
//! Nonlinear operations (saturation, waveshaping, clipping) generate
//! harmonics that can exceed Nyquist and alias back into the audible band.
//! Running the nonlinearity at a multiple of the original rate keeps those
//! harmonics representable until the downsampling filter removes them:
//!
//! 1. **Upsample**: raise the rate by a power-of-two factor through cascaded
//!    half-band stages
//! 2. **Process**: apply the nonlinearity at the oversampled rate
//! 3. **Downsample**: filter and decimate back through the matched cascade
//!
//! [`Oversampler`] owns one such up/down cascade for a single channel.
//! Multichannel callers hold one instance per channel; the filter state of
//! each channel stays fully independent.

use crate::halfband::HalfbandStage;

/// Derive the oversampling factor that brings `sample_rate` closest to
/// `target_rate`, floored to a realizable power of two.
///
/// The raw ratio is rounded to the nearest integer and clamped to at least
/// one. A half-band cascade can only realize power-of-two factors, so a
/// non-power-of-two rounding (for example 192 kHz over a 32 kHz stream gives
/// six) degrades to the next power of two below rather than being rejected.
///
/// # Panics
/// Panics if either rate is not a positive finite number; rates are
/// negotiated by the caller before any audio flows, so a bad value here is a
/// caller bug.
pub fn oversampling_factor(sample_rate: f64, target_rate: f64) -> usize {
    assert!(
        sample_rate.is_finite() && sample_rate > 0.0,
        "sample rate must be positive"
    );
    assert!(
        target_rate.is_finite() && target_rate > 0.0,
        "target rate must be positive"
    );

    let raw = libm::round(target_rate / sample_rate) as usize;
    let raw = raw.max(1);
    1 << raw.ilog2()
}

/// Single-channel multirate filter pair.
///
/// Wraps `log2(factor)` cascaded [`HalfbandStage`]s plus the intermediate
/// buffers the cascade needs, all sized at construction so that block
/// processing never allocates. A factor of one degenerates to a pair of
/// copies with no filtering and no latency.
///
/// The up and down directions run through the same stages (each stage keeps
/// separate state per direction), so the pair's passbands match and the
/// total group delay is the sum of both traversals.
#[derive(Debug, Clone)]
pub struct Oversampler {
    /// Power-of-two rate multiplier.
    factor: usize,
    /// Half-band stages, ordered from the input rate outward.
    stages: Vec<HalfbandStage>,
    /// Intermediate buffers between stages (`n_stages - 1` of them).
    work_bufs: Vec<Vec<f32>>,
    /// Largest block length at the input rate.
    max_block_size: usize,
}

impl Oversampler {
    /// Create an oversampler for the given factor and maximum block length.
    ///
    /// # Panics
    /// Panics if `factor` is not a power of two or `max_block_size` is zero.
    pub fn new(factor: usize, max_block_size: usize) -> Self {
        assert!(
            factor.is_power_of_two(),
            "oversampling factor must be a power of two, got {factor}"
        );
        assert!(max_block_size > 0, "maximum block size must be nonzero");

        let n_stages = factor.ilog2() as usize;
        let stages = (0..n_stages).map(|_| HalfbandStage::new()).collect();

        // Stage i converts between 2^i and 2^(i+1) times the input rate, so
        // the buffer feeding stage i+1 holds blocks of 2^(i+1) the length.
        let work_bufs = if n_stages > 1 {
            (0..n_stages - 1)
                .map(|i| vec![0.0_f32; max_block_size * (1 << (i + 1))])
                .collect()
        } else {
            Vec::new()
        };

        Self {
            factor,
            stages,
            work_bufs,
            max_block_size,
        }
    }

    /// The power-of-two rate multiplier this instance realizes.
    pub fn factor(&self) -> usize {
        self.factor
    }

    /// Largest input-rate block length accepted by a single call.
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Zero every stage's delay lines without reallocating.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.clear();
        }
    }

    /// Group delay of the up+down filter pair in input-rate samples.
    ///
    /// Stage `i` runs its filter at `2^(i+1)` times the input rate and is
    /// traversed once in each direction, so its contribution shrinks by half
    /// per cascade level. The value is fractional for multi-stage cascades;
    /// callers reporting whole samples round it.
    pub fn latency(&self) -> f64 {
        let mut total = 0.0;
        for (i, stage) in self.stages.iter().enumerate() {
            let rate_ratio = f64::from(1u32 << (i + 1));
            total += 2.0 * stage.group_delay() as f64 / rate_ratio;
        }
        total
    }

    /// Upsample `src` into `dst` through the cascade.
    ///
    /// `dst.len()` must equal `src.len() * factor()`; the filter state
    /// carries over between calls.
    ///
    /// # Panics
    /// Panics if the buffer lengths disagree or `src` exceeds the maximum
    /// block length.
    pub fn upsample(&mut self, dst: &mut [f32], src: &[f32]) {
        assert_eq!(
            dst.len(),
            src.len() * self.factor,
            "dst length must be src length times the factor"
        );
        assert!(
            src.len() <= self.max_block_size,
            "src length exceeds the configured maximum block size"
        );

        let n_stages = self.stages.len();

        if n_stages == 0 {
            dst.copy_from_slice(src);
            return;
        }
        if n_stages == 1 {
            self.stages[0].upsample(dst, src);
            return;
        }

        self.stages[0].upsample(&mut self.work_bufs[0][..src.len() * 2], src);

        for i in 1..n_stages - 1 {
            let in_len = src.len() * (1 << i);
            let out_len = src.len() * (1 << (i + 1));
            let (before, after) = self.work_bufs.split_at_mut(i);
            self.stages[i].upsample(&mut after[0][..out_len], &before[i - 1][..in_len]);
        }

        let last = n_stages - 1;
        let in_len = src.len() * (1 << last);
        self.stages[last].upsample(dst, &self.work_bufs[last - 1][..in_len]);
    }

    /// Downsample `src` into `dst` through the cascade, in reverse order.
    ///
    /// `src.len()` must equal `dst.len() * factor()`; the filter state
    /// carries over between calls.
    ///
    /// # Panics
    /// Panics if the buffer lengths disagree or `dst` exceeds the maximum
    /// block length.
    pub fn downsample(&mut self, dst: &mut [f32], src: &[f32]) {
        assert_eq!(
            src.len(),
            dst.len() * self.factor,
            "src length must be dst length times the factor"
        );
        assert!(
            dst.len() <= self.max_block_size,
            "dst length exceeds the configured maximum block size"
        );

        let n_stages = self.stages.len();

        if n_stages == 0 {
            dst.copy_from_slice(src);
            return;
        }
        if n_stages == 1 {
            self.stages[0].downsample(dst, src);
            return;
        }

        let last = n_stages - 1;
        let out_len = dst.len() * (1 << last);
        self.stages[last].downsample(&mut self.work_bufs[last - 1][..out_len], src);

        for i in (1..last).rev() {
            let in_len = dst.len() * (1 << (i + 1));
            let out_len = dst.len() * (1 << i);
            let (before, after) = self.work_bufs.split_at_mut(i);
            self.stages[i].downsample(&mut before[i - 1][..out_len], &after[0][..in_len]);
        }

        self.stages[0].downsample(dst, &self.work_bufs[0][..dst.len() * 2]);
    }
}
