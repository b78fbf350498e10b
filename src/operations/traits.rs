//! Core trait definitions for signal operations.
//!
//! Each trait covers one stage of the chain and is implemented for
//! [`Signal`]. Every operation returns a fresh signal; inputs are never
//! modified.

use super::types::{FilterResponse, IirFilterDesign, Spectrum};
use crate::{Signal, SignalResult};

pub use num_complex::Complex;

/// IIR filtering operations.
pub trait SignalIirFiltering {
    /// Design the filter described by `design` for this signal's sample rate
    /// and run the signal through it from a zero initial state.
    ///
    /// The output has the same length and sample rate as the input.
    ///
    /// # Errors
    /// Returns a parameter error if the design is invalid for the sample rate
    /// (zero order, cutoff outside `(0, nyquist)`).
    fn apply_iir_filter(&self, design: &IirFilterDesign) -> SignalResult<Signal>;

    /// Apply a Butterworth low-pass filter.
    ///
    /// # Arguments
    /// * `order` - Filter order, at least 1
    /// * `cutoff_frequency` - -3 dB point in Hz, strictly between 0 and Nyquist
    ///
    /// # Errors
    /// See [`SignalIirFiltering::apply_iir_filter`].
    fn butterworth_lowpass(&self, order: usize, cutoff_frequency: f64) -> SignalResult<Signal> {
        self.apply_iir_filter(&IirFilterDesign::butterworth_lowpass(order, cutoff_frequency))
    }

    /// Apply a Butterworth high-pass filter.
    ///
    /// # Errors
    /// See [`SignalIirFiltering::apply_iir_filter`].
    fn butterworth_highpass(&self, order: usize, cutoff_frequency: f64) -> SignalResult<Signal> {
        self.apply_iir_filter(&IirFilterDesign::butterworth_highpass(order, cutoff_frequency))
    }

    /// Apply a Butterworth filter with an explicit response shape.
    ///
    /// # Errors
    /// See [`SignalIirFiltering::apply_iir_filter`].
    fn butterworth(
        &self,
        response: FilterResponse,
        order: usize,
        cutoff_frequency: f64,
    ) -> SignalResult<Signal> {
        match response {
            FilterResponse::LowPass => self.butterworth_lowpass(order, cutoff_frequency),
            FilterResponse::HighPass => self.butterworth_highpass(order, cutoff_frequency),
        }
    }
}

/// Amplitude modulation.
pub trait SignalModulation {
    /// Multiply the signal by `modulation_index * cos(2π · carrier_frequency · t)`,
    /// where `t` is each sample's time derived from the signal's own sample rate.
    ///
    /// # Errors
    /// Returns a parameter error if either argument is not finite.
    fn amplitude_modulate(
        &self,
        modulation_index: f64,
        carrier_frequency: f64,
    ) -> SignalResult<Signal>;
}

/// FFT-backed spectral analysis.
pub trait SignalTransforms {
    /// Complex discrete Fourier transform of the whole signal.
    ///
    /// Unnormalized, forward convention `X_k = Σ x_n e^{-2πikn/N}`.
    ///
    /// # Errors
    /// Returns [`SignalError::EmptySignal`](crate::SignalError::EmptySignal) for an empty signal.
    fn fft(&self) -> SignalResult<Vec<Complex<f64>>>;

    /// Magnitude spectrum with FFT bin frequencies.
    ///
    /// # Errors
    /// Returns [`SignalError::EmptySignal`](crate::SignalError::EmptySignal) for an empty signal.
    fn spectrum(&self) -> SignalResult<Spectrum>;
}
