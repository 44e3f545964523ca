//! Satura Effects - anti-aliased saturation stage
//!
//! The one component this crate exports, [`OversampledSaturator`], applies
//! an arctangent waveshaper at an internally oversampled rate so the
//! harmonics it generates cannot alias back into the audible band. A host
//! layer drives it: [`OversampledSaturator::configure`] once per format
//! change, [`OversampledSaturator::process`] once per block,
//! [`OversampledSaturator::set_gain`] on parameter changes, and
//! [`OversampledSaturator::latency`] forwarded to the host's delay
//! compensation after each reconfiguration.
//!
//! Enable the `tracing` cargo feature for debug-level reconfiguration logs.

pub mod saturator;

pub use saturator::{
    ConfigError, OversampledSaturator, ProcessError, ProcessSpec, TARGET_INTERNAL_RATE,
};
