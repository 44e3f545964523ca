//! Satura Core - DSP primitives for anti-aliased saturation
//!
//! This crate provides the building blocks the `satura-effects` saturation
//! stage is assembled from, designed for real-time audio processing with
//! zero allocation in the audio path.
//!
//! # Primitives
//!
//! - [`HalfbandStage`] - one linear-phase 2x up/down resampling stage
//! - [`Oversampler`] - cascaded half-band filter pair for power-of-two
//!   oversampling, with latency reporting
//! - [`ArctanShaper`] - memoryless arctangent transfer function with its
//!   normalization factor bundled as one replaceable value
//! - [`oversampling_factor`] - target-rate to power-of-two factor derivation
//!
//! # Host Support
//!
//! - [`ParameterInfo`] / [`ParamDescriptor`] - parameter metadata surface
//!   for host layers
//! - [`db_to_linear`] / [`linear_to_db`] - level conversions
//!
//! # Design Principles
//!
//! - **Real-time safe**: buffers are sized at construction; processing
//!   never allocates, locks, or blocks
//! - **Boundary validation**: block-shape mistakes are caught before any
//!   delay line is touched
//! - **Precondition panics**: construction-time contract violations (zero
//!   gain, non-power-of-two factors) are caller bugs and panic

pub mod halfband;
pub mod math;
pub mod oversample;
pub mod param_info;
pub mod shaper;

pub use halfband::{HALFBAND_TAPS, HalfbandStage};
pub use math::{db_to_linear, linear_to_db};
pub use oversample::{Oversampler, oversampling_factor};
pub use param_info::{ParamDescriptor, ParamUnit, ParameterInfo};
pub use shaper::ArctanShaper;
