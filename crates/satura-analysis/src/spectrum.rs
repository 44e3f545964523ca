//! Spectral measurements over real signals.

use crate::fft::{Fft, Window};
use satura_core::linear_to_db;

/// Compute the magnitude spectrum of a time-domain signal.
///
/// Returns `fft_size / 2 + 1` bins covering DC through Nyquist.
pub fn magnitude_spectrum(signal: &[f32], fft_size: usize, window: Window) -> Vec<f32> {
    let fft = Fft::new(fft_size);

    let mut windowed = signal.to_vec();
    windowed.truncate(fft_size);
    window.apply(&mut windowed);

    let spectrum = fft.forward(&windowed);
    spectrum.iter().map(|c| c.norm()).collect()
}

/// Compute the power spectrum in dB.
pub fn power_spectrum_db(signal: &[f32], fft_size: usize, window: Window) -> Vec<f32> {
    magnitude_spectrum(signal, fft_size, window)
        .iter()
        .map(|&m| linear_to_db(m))
        .collect()
}

/// Sum of squared magnitudes over the bins covering `lo_hz..hi_hz`.
///
/// `spectrum` is a half-spectrum as produced by [`magnitude_spectrum`];
/// `sample_rate` is the rate of the signal it was measured from.
pub fn band_energy(spectrum: &[f32], sample_rate: f32, lo_hz: f32, hi_hz: f32) -> f32 {
    let fft_size = (spectrum.len() - 1) * 2;
    let bin_width = sample_rate / fft_size as f32;

    spectrum
        .iter()
        .enumerate()
        .filter(|(i, _)| {
            let freq = *i as f32 * bin_width;
            freq >= lo_hz && freq < hi_hz
        })
        .map(|(_, &m)| m * m)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn bin_sine(bin: usize, fft_size: usize) -> Vec<f32> {
        (0..fft_size)
            .map(|n| (TAU * bin as f32 * n as f32 / fft_size as f32).sin())
            .collect()
    }

    #[test]
    fn band_energy_finds_the_tone() {
        let fft_size = 1024;
        let sample_rate = 48_000.0;
        // Bin 128 of 1024 at 48 kHz is 6 kHz.
        let signal = bin_sine(128, fft_size);
        let spectrum = magnitude_spectrum(&signal, fft_size, Window::Hann);

        let in_band = band_energy(&spectrum, sample_rate, 5_000.0, 7_000.0);
        let out_of_band = band_energy(&spectrum, sample_rate, 10_000.0, 20_000.0);
        assert!(in_band > 1_000.0 * out_of_band);
    }

    #[test]
    fn power_spectrum_peaks_at_the_tone() {
        let fft_size = 512;
        let signal = bin_sine(32, fft_size);
        let db = power_spectrum_db(&signal, fft_size, Window::Hann);

        let peak = db
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 32);
    }

    #[test]
    fn short_signals_are_zero_padded() {
        let spectrum = magnitude_spectrum(&[1.0, 1.0, 1.0, 1.0], 64, Window::Rectangular);
        assert_eq!(spectrum.len(), 33);
        assert!(spectrum[0] > 0.0);
    }
}
