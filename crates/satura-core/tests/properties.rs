//! Property-based tests for satura-core DSP primitives.
//!
//! Uses proptest to verify the shaper's transfer-function invariants and
//! the factor derivation across randomized inputs.

use proptest::prelude::*;
use satura_core::{ArctanShaper, Oversampler, oversampling_factor};

proptest! {
    /// The derived factor is always a realizable power of two, for any
    /// positive sample rate a host could negotiate.
    #[test]
    fn factor_is_always_power_of_two(rate in 1_000.0_f64..400_000.0) {
        let factor = oversampling_factor(rate, 192_000.0);
        prop_assert!(factor >= 1);
        prop_assert!(factor.is_power_of_two());
    }

    /// Raising the sample rate never raises the factor.
    #[test]
    fn factor_is_monotone_in_rate(
        low in 1_000.0_f64..200_000.0,
        delta in 0.0_f64..200_000.0,
    ) {
        let f_low = oversampling_factor(low, 192_000.0);
        let f_high = oversampling_factor(low + delta, 192_000.0);
        prop_assert!(f_high <= f_low);
    }

    /// Shaped output is finite and strictly inside the arctangent bound for
    /// every finite input and nonzero gain.
    #[test]
    fn shaper_output_is_bounded(
        gain in prop_oneof![0.01_f32..10.0, -10.0_f32..-0.01],
        x in -1_000.0_f32..1_000.0,
    ) {
        let shaper = ArctanShaper::new(gain);
        let bound = core::f32::consts::FRAC_PI_2 * shaper.normalization().abs();
        let y = shaper.shape(x);
        prop_assert!(y.is_finite());
        prop_assert!(y.abs() <= bound, "shape({x}) = {y} outside bound {bound}");
    }

    /// The transfer function is odd and non-decreasing for positive gain.
    #[test]
    fn shaper_is_odd_and_monotone(
        gain in 0.01_f32..10.0,
        a in -10.0_f32..10.0,
        b in -10.0_f32..10.0,
    ) {
        let shaper = ArctanShaper::new(gain);
        prop_assert!((shaper.shape(a) + shaper.shape(-a)).abs() < 1e-5);

        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(shaper.shape(lo) <= shaper.shape(hi) + 1e-6);
    }

    /// A factor-one oversampler is an exact passthrough in both directions.
    #[test]
    fn unit_factor_passthrough(block in prop::collection::vec(-1.0_f32..1.0, 1..128)) {
        let mut os = Oversampler::new(1, 128);
        let mut up = vec![0.0_f32; block.len()];
        let mut down = vec![0.0_f32; block.len()];
        os.upsample(&mut up, &block);
        os.downsample(&mut down, &up);
        prop_assert_eq!(&up, &block);
        prop_assert_eq!(&down, &block);
    }

    /// Oversampling a bounded signal cannot blow up: the filters have unity
    /// DC gain and modest overshoot, so the round trip stays finite and
    /// within a small multiple of the input bound.
    #[test]
    fn round_trip_stays_bounded(block in prop::collection::vec(-1.0_f32..1.0, 64..256)) {
        let mut os = Oversampler::new(4, 256);
        let mut up = vec![0.0_f32; block.len() * 4];
        let mut down = vec![0.0_f32; block.len()];
        os.upsample(&mut up, &block);
        os.downsample(&mut down, &up);
        for &s in &down {
            prop_assert!(s.is_finite());
            prop_assert!(s.abs() < 3.0, "round trip produced {s} from a unit-bounded block");
        }
    }
}
