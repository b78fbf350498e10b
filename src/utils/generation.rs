//! Test tone generation.
//!
//! Every generator samples a continuous waveform at `t_i = i / sample_rate`
//! for `i` in `0..floor(duration * sample_rate)`. A duration shorter than one
//! sample period produces an empty signal rather than an error.

use std::f64::consts::PI;

use ndarray::Array1;

use crate::error::{ParameterError, SignalResult, ensure_finite, ensure_positive};
use crate::repr::Signal;

/// Largest number of `f64` samples a single signal buffer can hold.
pub const MAX_SAMPLES: usize = isize::MAX as usize / size_of::<f64>();

/// Number of whole samples that fit in `duration_secs` at `sample_rate`.
///
/// Both arguments must already be validated as finite and positive.
///
/// # Errors
/// Returns [`ParameterError::OutOfRange`] for `duration_secs` when the
/// signal would exceed [`MAX_SAMPLES`].
pub fn sample_count(duration_secs: f64, sample_rate: f64) -> Result<usize, ParameterError> {
    let whole = (duration_secs * sample_rate).floor();
    if whole.is_nan() || whole > MAX_SAMPLES as f64 {
        return Err(ParameterError::out_of_range(
            "duration_secs",
            duration_secs,
            format!("at most {MAX_SAMPLES} samples at {sample_rate} Hz"),
        ));
    }
    Ok(whole as usize)
}

/// Time in seconds of each of the first `num_samples` samples at `sample_rate`.
///
/// # Errors
/// Returns a parameter error if `sample_rate` is not finite and positive.
pub fn time_axis(num_samples: usize, sample_rate: f64) -> SignalResult<Array1<f64>> {
    let sample_rate = ensure_positive("sample_rate", sample_rate)?;
    Ok(Array1::from_iter(
        (0..num_samples).map(|i| i as f64 / sample_rate),
    ))
}

/// Generates a sine wave with the specified parameters.
///
/// # Arguments
/// * `frequency` - Frequency of the sine wave in Hz
/// * `duration_secs` - Duration of the signal in seconds, must be > 0
/// * `sample_rate` - Sample rate in Hz, must be > 0
/// * `amplitude` - Peak amplitude of the wave
///
/// # Errors
/// Returns a parameter error for a non-positive duration or sample rate, or a
/// non-finite frequency or amplitude.
///
/// # Examples
/// ```rust
/// use signal_chain::sine_wave;
///
/// let tone = sine_wave(440.0, 1.0, 44100.0, 1.0).unwrap();
/// assert_eq!(tone.len(), 44100);
/// assert_eq!(tone.samples()[0], 0.0);
/// ```
pub fn sine_wave(
    frequency: f64,
    duration_secs: f64,
    sample_rate: f64,
    amplitude: f64,
) -> SignalResult<Signal> {
    periodic_wave(frequency, duration_secs, sample_rate, amplitude, f64::sin)
}

/// Generates a cosine wave with the specified parameters.
///
/// Same contract as [`sine_wave`], shifted by a quarter period.
///
/// # Errors
/// See [`sine_wave`].
pub fn cosine_wave(
    frequency: f64,
    duration_secs: f64,
    sample_rate: f64,
    amplitude: f64,
) -> SignalResult<Signal> {
    periodic_wave(frequency, duration_secs, sample_rate, amplitude, f64::cos)
}

fn periodic_wave(
    frequency: f64,
    duration_secs: f64,
    sample_rate: f64,
    amplitude: f64,
    wave: fn(f64) -> f64,
) -> SignalResult<Signal> {
    let frequency = ensure_finite("frequency", frequency)?;
    let amplitude = ensure_finite("amplitude", amplitude)?;
    let duration_secs = ensure_positive("duration_secs", duration_secs)?;
    let sample_rate = ensure_positive("sample_rate", sample_rate)?;

    let num_samples = sample_count(duration_secs, sample_rate)?;
    let two_pi_freq = 2.0 * PI * frequency;

    let samples = Array1::from_iter((0..num_samples).map(|i| {
        let t = i as f64 / sample_rate;
        amplitude * wave(two_pi_freq * t)
    }));

    tracing::trace!(
        frequency,
        sample_rate,
        num_samples,
        "generated periodic wave"
    );

    Ok(Signal::from_validated(samples, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_sine_wave_length_and_first_sample() {
        let tone = sine_wave(440.0, 1.0, 44100.0, 1.0).unwrap();
        assert_eq!(tone.len(), 44100);
        assert_eq!(tone.samples()[0], 0.0);
        assert_eq!(tone.sample_rate(), 44100.0);
    }

    #[test]
    fn test_sine_wave_length_is_floor_of_duration_times_rate() {
        for &(duration, rate) in &[(0.5, 1000.0), (0.0123, 44100.0), (2.75, 8000.0), (1.0, 3.5)] {
            let tone = sine_wave(10.0, duration, rate, 1.0).unwrap();
            assert_eq!(tone.len(), (duration * rate).floor() as usize);
        }
    }

    #[test]
    fn test_sine_wave_values_are_bounded() {
        let tone = sine_wave(1234.5, 0.25, 48000.0, 1.0).unwrap();
        assert!(tone.samples().iter().all(|&x| (-1.0..=1.0).contains(&x)));
    }

    #[test]
    fn test_sine_wave_quarter_period_peaks() {
        // 1 Hz sampled at 4 Hz: 0, 1, 0, -1
        let tone = sine_wave(1.0, 1.0, 4.0, 1.0).unwrap();
        let samples = tone.to_vec();
        assert_eq!(samples.len(), 4);
        assert_approx_eq!(samples[1], 1.0, 1e-12);
        assert_approx_eq!(samples[3], -1.0, 1e-12);
        assert!(samples[2].abs() < 1e-12);
    }

    #[test]
    fn test_cosine_wave_starts_at_amplitude() {
        let carrier = cosine_wave(440.0, 0.01, 44100.0, 0.5).unwrap();
        assert_eq!(carrier.samples()[0], 0.5);
    }

    #[test]
    fn test_sub_sample_duration_yields_empty_signal() {
        let tone = sine_wave(440.0, 1e-6, 44100.0, 1.0).unwrap();
        assert!(tone.is_empty());
    }

    #[test]
    fn test_invalid_generation_parameters() {
        assert!(sine_wave(440.0, 0.0, 44100.0, 1.0).is_err());
        assert!(sine_wave(440.0, -1.0, 44100.0, 1.0).is_err());
        assert!(sine_wave(440.0, 1.0, 0.0, 1.0).is_err());
        assert!(sine_wave(f64::NAN, 1.0, 44100.0, 1.0).is_err());
    }

    #[test]
    fn test_oversized_duration_rejected() {
        let err = sample_count(1e30, 44100.0).unwrap_err();
        assert_eq!(err.parameter(), "duration_secs");
        assert!(sample_count(f64::MAX, 2.0).is_err());
        assert_eq!(sample_count(1.0, 44100.0).unwrap(), 44100);

        let result = sine_wave(440.0, 1e30, 44100.0, 1.0);
        assert!(matches!(
            result,
            Err(crate::SignalError::Parameter(ParameterError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_time_axis() {
        let t = time_axis(4, 2.0).unwrap();
        assert_eq!(t.to_vec(), vec![0.0, 0.5, 1.0, 1.5]);
        assert!(time_axis(4, 0.0).is_err());
    }
}
