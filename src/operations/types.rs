//! Supporting types for filtering and spectral analysis.

use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, SignalError, SignalResult, ensure_positive};

/// IIR filter family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IirFilterType {
    /// Butterworth filter - maximally flat passband response.
    Butterworth,
}

/// Filter response characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterResponse {
    /// Low-pass filter - allows frequencies below cutoff.
    LowPass,
    /// High-pass filter - allows frequencies above cutoff.
    HighPass,
}

/// IIR filter design parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IirFilterDesign {
    /// Type of IIR filter
    pub filter_type: IirFilterType,
    /// Response type (low-pass, high-pass)
    pub response: FilterResponse,
    /// Filter order (number of poles)
    pub order: usize,
    /// Cutoff frequency in Hz
    pub cutoff_frequency: f64,
}

impl IirFilterDesign {
    /// Create a Butterworth low-pass filter design.
    pub const fn butterworth_lowpass(order: usize, cutoff_frequency: f64) -> Self {
        Self {
            filter_type: IirFilterType::Butterworth,
            response: FilterResponse::LowPass,
            order,
            cutoff_frequency,
        }
    }

    /// Create a Butterworth high-pass filter design.
    pub const fn butterworth_highpass(order: usize, cutoff_frequency: f64) -> Self {
        Self {
            filter_type: IirFilterType::Butterworth,
            response: FilterResponse::HighPass,
            order,
            cutoff_frequency,
        }
    }

    /// Cutoff divided by the Nyquist frequency of `sample_rate`.
    pub fn normalized_cutoff(&self, sample_rate: f64) -> f64 {
        self.cutoff_frequency / (0.5 * sample_rate)
    }
}

/// Transfer function coefficients of a digital filter.
///
/// `H(z) = (b[0] + b[1] z^-1 + ... + b[M] z^-M) / (a[0] + a[1] z^-1 + ... + a[N] z^-N)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCoefficients {
    /// Feed-forward (numerator) coefficients.
    pub b: Vec<f64>,
    /// Feed-back (denominator) coefficients, `a[0]` is 1 for designed filters.
    pub a: Vec<f64>,
}

/// Magnitude spectrum of a real signal.
///
/// `frequencies()[k]` is the centre of FFT bin `k` in Hz, `magnitudes()[k]`
/// the absolute value of the transform there. Bins are in FFT order (DC,
/// positive frequencies, then negative frequencies) unless the spectrum was
/// [`shifted`](Spectrum::shifted). Both series always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SpectrumParts")]
pub struct Spectrum {
    frequencies: Vec<f64>,
    magnitudes: Vec<f64>,
    sample_rate: f64,
}

#[derive(Deserialize)]
struct SpectrumParts {
    frequencies: Vec<f64>,
    magnitudes: Vec<f64>,
    sample_rate: f64,
}

impl TryFrom<SpectrumParts> for Spectrum {
    type Error = SignalError;

    fn try_from(parts: SpectrumParts) -> Result<Self, Self::Error> {
        Self::new(parts.frequencies, parts.magnitudes, parts.sample_rate)
    }
}

impl Spectrum {
    /// Pair bin frequencies with their magnitudes.
    ///
    /// # Errors
    /// Returns a parameter error if the two series differ in length or
    /// `sample_rate` is not finite and positive.
    pub fn new(frequencies: Vec<f64>, magnitudes: Vec<f64>, sample_rate: f64) -> SignalResult<Self> {
        let sample_rate = ensure_positive("sample_rate", sample_rate)?;
        if frequencies.len() != magnitudes.len() {
            return Err(ParameterError::invalid_value(
                "magnitudes",
                format!(
                    "{} magnitudes for {} frequency bins",
                    magnitudes.len(),
                    frequencies.len()
                ),
            )
            .into());
        }
        Ok(Self {
            frequencies,
            magnitudes,
            sample_rate,
        })
    }

    /// Bin frequencies in Hz.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Bin magnitudes.
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Sample rate of the analysed signal in Hz.
    pub const fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Consume the spectrum, returning `(frequencies, magnitudes)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.frequencies, self.magnitudes)
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    /// Returns true if the spectrum has no bins.
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Frequency spacing between adjacent bins (`sample_rate / N`).
    pub fn bin_width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.sample_rate / self.len() as f64
        }
    }

    /// Index of the largest magnitude; the first one wins ties.
    pub fn peak_bin(&self) -> Option<usize> {
        self.magnitudes
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &m)| match best {
                Some((_, bm)) if m <= bm => best,
                _ => Some((i, m)),
            })
            .map(|(i, _)| i)
    }

    /// Frequency of the largest magnitude bin.
    pub fn peak_frequency(&self) -> Option<f64> {
        self.peak_bin().and_then(|i| self.frequencies.get(i).copied())
    }

    /// The spectrum reordered so frequencies ascend from `-fs/2` to just below `fs/2`.
    pub fn shifted(&self) -> Self {
        let split = self.len().div_ceil(2);
        let (frequencies, magnitudes) = self
            .iter()
            .skip(split)
            .chain(self.iter().take(split))
            .unzip();
        Self {
            frequencies,
            magnitudes,
            sample_rate: self.sample_rate,
        }
    }

    /// Iterate over `(frequency, magnitude)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.magnitudes.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectrum(frequencies: Vec<f64>, magnitudes: Vec<f64>, sample_rate: f64) -> Spectrum {
        Spectrum::new(frequencies, magnitudes, sample_rate).unwrap()
    }

    #[test]
    fn test_filter_design_struct() {
        let design = IirFilterDesign::butterworth_lowpass(5, 1000.0);
        assert_eq!(design.filter_type, IirFilterType::Butterworth);
        assert_eq!(design.response, FilterResponse::LowPass);
        assert_eq!(design.order, 5);
        assert_eq!(design.cutoff_frequency, 1000.0);
        assert!((design.normalized_cutoff(44100.0) - 1000.0 / 22050.0).abs() < 1e-15);
    }

    #[test]
    fn test_peak_bin_first_wins_ties() {
        let s = spectrum(vec![0.0, 1.0, 2.0, -1.0], vec![1.0, 3.0, 3.0, 0.5], 4.0);
        assert_eq!(s.peak_bin(), Some(1));
        assert_eq!(s.peak_frequency(), Some(1.0));
        assert_eq!(s.bin_width(), 1.0);
    }

    #[test]
    fn test_shifted_even_and_odd() {
        let even = spectrum(vec![0.0, 1.0, -2.0, -1.0], vec![10.0, 11.0, 12.0, 13.0], 4.0);
        let shifted = even.shifted();
        assert_eq!(shifted.frequencies(), &[-2.0, -1.0, 0.0, 1.0]);
        assert_eq!(shifted.magnitudes(), &[12.0, 13.0, 10.0, 11.0]);

        let odd = spectrum(vec![0.0, 1.0, 2.0, -2.0, -1.0], vec![0.0, 1.0, 2.0, 3.0, 4.0], 5.0);
        assert_eq!(odd.shifted().frequencies(), &[-2.0, -1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_empty_spectrum() {
        let s = spectrum(Vec::new(), Vec::new(), 44100.0);
        assert!(s.is_empty());
        assert_eq!(s.peak_bin(), None);
        assert_eq!(s.bin_width(), 0.0);
        assert!(s.shifted().is_empty());
    }

    #[test]
    fn test_mismatched_series_rejected() {
        let err = Spectrum::new(Vec::new(), vec![1.0], 4.0).unwrap_err();
        assert!(matches!(
            err,
            SignalError::Parameter(ParameterError::InvalidValue { .. })
        ));
        assert!(Spectrum::new(vec![0.0], vec![1.0], 0.0).is_err());
    }

    #[test]
    fn test_mismatched_series_rejected_on_deserialize() {
        let json = r#"{"frequencies":[],"magnitudes":[1.0],"sample_rate":4.0}"#;
        assert!(serde_json::from_str::<Spectrum>(json).is_err());

        let json = r#"{"frequencies":[0.0, 1.0],"magnitudes":[1.0, 3.0],"sample_rate":2.0}"#;
        let parsed: Spectrum = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.peak_frequency(), Some(1.0));
        assert_eq!(parsed.shifted().frequencies(), &[1.0, 0.0]);
    }
}
