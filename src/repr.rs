//! Core signal representation.
//!
//! A [`Signal`] is an ordered, fixed-length run of real-valued amplitude
//! samples paired with the uniform sample rate that gives them a time index.
//! Sample `i` sits at `t_i = i / sample_rate`.
//!
//! ```rust
//! use signal_chain::Signal;
//! use ndarray::array;
//!
//! let signal = Signal::new(array![0.0, 0.5, 1.0, 0.5], 4.0).unwrap();
//! assert_eq!(signal.len(), 4);
//! assert_eq!(signal.duration_seconds(), 1.0);
//! ```

use ndarray::{Array1, ArrayView1};
use num_traits::ToPrimitive;

use crate::error::{ParameterError, SignalResult, ensure_positive};

/// A uniformly sampled, real-valued signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Array1<f64>,
    sample_rate: f64,
}

impl Signal {
    /// Create a signal from owned samples.
    ///
    /// # Errors
    /// Returns a [`ParameterError`] if `sample_rate` is not finite and positive.
    pub fn new(samples: Array1<f64>, sample_rate: f64) -> SignalResult<Self> {
        let sample_rate = ensure_positive("sample_rate", sample_rate)?;
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Create a signal by converting any numeric sample slice to `f64`.
    ///
    /// # Errors
    /// Fails if the sample rate is invalid or a sample has no `f64` representation.
    pub fn from_samples<T: ToPrimitive>(samples: &[T], sample_rate: f64) -> SignalResult<Self> {
        let converted = samples
            .iter()
            .enumerate()
            .map(|(i, s)| {
                s.to_f64().ok_or_else(|| {
                    ParameterError::invalid_value("samples", format!("sample {i} is not representable as f64"))
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        Self::new(Array1::from(converted), sample_rate)
    }

    /// Create a signal of `len` zero samples.
    ///
    /// # Errors
    /// Returns a [`ParameterError`] if `sample_rate` is not finite and positive.
    pub fn zeros(len: usize, sample_rate: f64) -> SignalResult<Self> {
        Self::new(Array1::zeros(len), sample_rate)
    }

    /// Builds a signal whose rate has already been validated.
    pub(crate) const fn from_validated(samples: Array1<f64>, sample_rate: f64) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Sample rate in Hz.
    #[inline]
    pub const fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the signal holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds (`len / sample_rate`).
    pub fn duration_seconds(&self) -> f64 {
        self.len() as f64 / self.sample_rate
    }

    /// Nyquist frequency in Hz.
    pub fn nyquist(&self) -> f64 {
        0.5 * self.sample_rate
    }

    /// Time in seconds of sample `index`.
    #[inline]
    pub fn time_of(&self, index: usize) -> f64 {
        index as f64 / self.sample_rate
    }

    /// Borrow the samples as an array view.
    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.samples.view()
    }

    /// Borrow the underlying array.
    pub const fn samples(&self) -> &Array1<f64> {
        &self.samples
    }

    /// Copy the samples into a `Vec`.
    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.to_vec()
    }

    /// Consume the signal, returning its samples.
    pub fn into_samples(self) -> Array1<f64> {
        self.samples
    }

    /// Largest absolute sample value, `0.0` for an empty signal.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |acc, &x| acc.max(x.abs()))
    }

    /// Returns a new signal at the same rate with `f` applied to every sample
    /// together with its index.
    pub fn map_indexed<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, f64) -> f64,
    {
        let samples: Array1<f64> = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, &x)| f(i, x))
            .collect();
        Self::from_validated(samples, self.sample_rate)
    }
}
