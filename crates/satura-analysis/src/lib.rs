//! Satura Analysis - spectral measurement tools
//!
//! Offline FFT-based measurements used by the saturation stage's quality
//! tests: magnitude and power spectra plus band-energy sums for quantifying
//! aliasing suppression. Nothing in this crate is real-time safe; it exists
//! for tests, benchmarks, and offline verification.

pub mod fft;
pub mod spectrum;

pub use fft::{Fft, Window};
pub use spectrum::{band_energy, magnitude_spectrum, power_spectrum_db};
