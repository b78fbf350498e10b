//! FFT and spectral analysis.

use num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::{SignalError, SignalResult, ensure_positive};
use crate::operations::traits::SignalTransforms;
use crate::operations::types::Spectrum;
use crate::repr::Signal;

/// Centre frequency in Hz of each bin of an `n`-point FFT at `sample_rate`.
///
/// Bin `k` is `k * sample_rate / n` for `k <= (n - 1) / 2` and
/// `(k - n) * sample_rate / n` above that, so the bins cover
/// `[-sample_rate / 2, sample_rate / 2)`.
///
/// # Errors
/// Returns a parameter error if `sample_rate` is not finite and positive.
///
/// # Examples
/// ```rust
/// use signal_chain::operations::fft_frequencies;
///
/// let freqs = fft_frequencies(4, 8.0).unwrap();
/// assert_eq!(freqs, vec![0.0, 2.0, -4.0, -2.0]);
/// ```
pub fn fft_frequencies(n: usize, sample_rate: f64) -> SignalResult<Vec<f64>> {
    let sample_rate = ensure_positive("sample_rate", sample_rate)?;
    if n == 0 {
        return Ok(Vec::new());
    }
    let spacing = sample_rate / n as f64;
    let positive = (n - 1) / 2 + 1;
    Ok((0..n)
        .map(|k| {
            let k = if k < positive {
                k as f64
            } else {
                k as f64 - n as f64
            };
            k * spacing
        })
        .collect())
}

impl SignalTransforms for Signal {
    fn fft(&self) -> SignalResult<Vec<Complex<f64>>> {
        if self.is_empty() {
            return Err(SignalError::empty_signal("fft"));
        }

        let mut buffer: Vec<Complex<f64>> = self
            .samples()
            .iter()
            .map(|&x| Complex::new(x, 0.0))
            .collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer.len());
        fft.process(&mut buffer);

        Ok(buffer)
    }

    fn spectrum(&self) -> SignalResult<Spectrum> {
        if self.is_empty() {
            return Err(SignalError::empty_signal("spectrum"));
        }

        let magnitudes: Vec<f64> = self.fft()?.iter().map(|c| c.norm()).collect();
        let frequencies = fft_frequencies(magnitudes.len(), self.sample_rate())?;

        tracing::debug!(bins = magnitudes.len(), "computed magnitude spectrum");

        Spectrum::new(frequencies, magnitudes, self.sample_rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::generation::sine_wave;
    use approx_eq::assert_approx_eq;
    use ndarray::array;

    #[test]
    fn test_fft_frequencies_even_and_odd() {
        assert_eq!(
            fft_frequencies(8, 8.0).unwrap(),
            vec![0.0, 1.0, 2.0, 3.0, -4.0, -3.0, -2.0, -1.0]
        );
        assert_eq!(
            fft_frequencies(5, 5.0).unwrap(),
            vec![0.0, 1.0, 2.0, -2.0, -1.0]
        );
        assert_eq!(fft_frequencies(1, 44100.0).unwrap(), vec![0.0]);
        assert!(fft_frequencies(0, 44100.0).unwrap().is_empty());
        assert!(fft_frequencies(8, 0.0).is_err());
    }

    #[test]
    fn test_fft_of_impulse_is_flat() {
        let signal = Signal::new(array![1.0, 0.0, 0.0, 0.0, 0.0], 5.0).unwrap();
        let spectrum = signal.fft().unwrap();
        assert_eq!(spectrum.len(), 5);
        for bin in spectrum {
            assert_approx_eq!(bin.norm(), 1.0, 1e-12);
        }
    }

    #[test]
    fn test_fft_of_constant_is_dc_only() {
        let signal = Signal::new(array![1.0, 1.0, 1.0, 1.0], 4.0).unwrap();
        let spectrum = signal.spectrum().unwrap();
        assert_approx_eq!(spectrum.magnitudes()[0], 4.0, 1e-12);
        assert!(spectrum.magnitudes()[1..].iter().all(|&m| m < 1e-12));
    }

    #[test]
    fn test_pure_tone_peak_recovered_within_one_bin() {
        // 44100 samples is not a power of two.
        for &(frequency, duration) in &[(440.0, 1.0), (1234.5, 0.37), (97.0, 0.5)] {
            let sample_rate = 44100.0;
            let tone = sine_wave(frequency, duration, sample_rate, 1.0).unwrap();
            let spectrum = tone.spectrum().unwrap();

            let peak = spectrum.peak_frequency().unwrap().abs();
            assert!(
                (peak - frequency).abs() <= spectrum.bin_width(),
                "peak {peak} Hz vs tone {frequency} Hz"
            );
        }
    }

    #[test]
    fn test_spectrum_of_full_scale_tone_has_half_n_magnitude() {
        let tone = sine_wave(440.0, 1.0, 44100.0, 1.0).unwrap();
        let spectrum = tone.spectrum().unwrap();
        assert_eq!(spectrum.len(), 44100);
        assert_eq!(spectrum.bin_width(), 1.0);
        assert_approx_eq!(spectrum.magnitudes()[440], 22050.0, 1e-3);
        assert_eq!(spectrum.frequencies()[440], 440.0);
    }

    #[test]
    fn test_empty_signal_rejected() {
        let signal = Signal::zeros(0, 44100.0).unwrap();
        assert!(matches!(
            signal.spectrum(),
            Err(SignalError::EmptySignal { .. })
        ));
        assert!(signal.fft().is_err());
    }
}
