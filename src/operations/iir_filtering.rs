//! IIR (Infinite Impulse Response) filter design and filtering.
//!
//! Butterworth filters are designed in zero/pole/gain form from the analog
//! prototype, moved to the requested cutoff with a pre-warped frequency, and
//! mapped to the z-plane with the bilinear transform. The resulting transfer
//! function coefficients are applied with the direct-form difference equation.

use std::f64::consts::PI;

use ndarray::Array1;
use num_complex::Complex;

use crate::error::{ParameterError, SignalResult, ensure_finite, ensure_positive};
use crate::operations::traits::SignalIirFiltering;
use crate::operations::types::{FilterCoefficients, FilterResponse, IirFilterDesign, IirFilterType};
use crate::repr::Signal;

/// IIR filter implementation with internal state.
///
/// This structure represents an IIR filter with its coefficients and
/// internal state for recursive filtering operations.
#[derive(Debug, Clone)]
pub struct IirFilter {
    /// Feed-forward coefficients (b coefficients)
    b_coeffs: Vec<f64>,
    /// Feed-back coefficients (a coefficients), `a_coeffs[0]` finite and non-zero
    a_coeffs: Vec<f64>,
    /// Input delay line (x[n-1], x[n-2], ...)
    x_delays: Vec<f64>,
    /// Output delay line (y[n-1], y[n-2], ...)
    y_delays: Vec<f64>,
}

impl IirFilter {
    /// Create a new IIR filter with zeroed state.
    ///
    /// # Errors
    /// Fails if either coefficient vector is empty or `a[0]` is zero or not finite.
    pub fn new(coefficients: FilterCoefficients) -> SignalResult<Self> {
        let FilterCoefficients { b, a } = coefficients;
        if b.is_empty() {
            return Err(ParameterError::invalid_value("b", "numerator coefficients are empty").into());
        }
        match a.first() {
            None => {
                return Err(
                    ParameterError::invalid_value("a", "denominator coefficients are empty").into(),
                );
            }
            Some(&a0) if a0 == 0.0 || !a0.is_finite() => {
                return Err(ParameterError::invalid_value(
                    "a",
                    format!("a[0] must be finite and non-zero, got {a0}"),
                )
                .into());
            }
            Some(_) => {}
        }

        Ok(Self {
            x_delays: vec![0.0; b.len() - 1],
            y_delays: vec![0.0; a.len() - 1],
            b_coeffs: b,
            a_coeffs: a,
        })
    }

    /// Feed-forward (numerator) coefficients.
    pub fn b_coeffs(&self) -> &[f64] {
        &self.b_coeffs
    }

    /// Feed-back (denominator) coefficients.
    pub fn a_coeffs(&self) -> &[f64] {
        &self.a_coeffs
    }

    /// Process a single sample through the filter.
    ///
    /// Applies the difference equation:
    /// y[n] = (b[0]*x[n] + b[1]*x[n-1] + ... + b[M]*x[n-M])
    ///        - (a[1]*y[n-1] + a[2]*y[n-2] + ... + a[N]*y[n-N])
    /// normalized by a[0].
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let feed_forward: f64 = self.b_coeffs[0] * input
            + self.b_coeffs[1..]
                .iter()
                .zip(&self.x_delays)
                .map(|(b, x)| b * x)
                .sum::<f64>();
        let feed_back: f64 = self.a_coeffs[1..]
            .iter()
            .zip(&self.y_delays)
            .map(|(a, y)| a * y)
            .sum();

        let output = (feed_forward - feed_back) / self.a_coeffs[0];

        if !self.x_delays.is_empty() {
            self.x_delays.rotate_right(1);
            self.x_delays[0] = input;
        }
        if !self.y_delays.is_empty() {
            self.y_delays.rotate_right(1);
            self.y_delays[0] = output;
        }

        output
    }

    /// Process a slice of samples through the filter.
    pub fn process_samples(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }

    /// Process a slice of samples through the filter in-place.
    pub fn process_samples_in_place(&mut self, input: &mut [f64]) {
        input.iter_mut().for_each(|x| {
            *x = self.process_sample(*x);
        });
    }

    /// Reset the filter's internal state.
    pub fn reset(&mut self) {
        self.x_delays.fill(0.0);
        self.y_delays.fill(0.0);
    }

    /// Get the frequency response at specified frequencies.
    ///
    /// Returns (magnitude, phase) response vectors.
    pub fn frequency_response(
        &self,
        frequencies: &[f64],
        sample_rate: f64,
    ) -> (Vec<f64>, Vec<f64>) {
        frequencies
            .iter()
            .map(|&freq| {
                let omega = 2.0 * PI * freq / sample_rate;
                let h = evaluate_z_polynomial(&self.b_coeffs, omega)
                    / evaluate_z_polynomial(&self.a_coeffs, omega);
                (h.norm(), h.arg())
            })
            .unzip()
    }
}

/// Sum of `c[i] * e^{-j omega i}`.
fn evaluate_z_polynomial(coeffs: &[f64], omega: f64) -> Complex<f64> {
    coeffs
        .iter()
        .enumerate()
        .map(|(i, &c)| c * Complex::from_polar(1.0, -omega * i as f64))
        .sum()
}

impl SignalIirFiltering for Signal {
    fn apply_iir_filter(&self, design: &IirFilterDesign) -> SignalResult<Signal> {
        let coefficients = design_iir_filter(design, self.sample_rate())?;
        let mut filter = IirFilter::new(coefficients)?;

        let filtered: Array1<f64> = self
            .samples()
            .iter()
            .map(|&x| filter.process_sample(x))
            .collect();

        tracing::debug!(
            response = ?design.response,
            order = design.order,
            cutoff = design.cutoff_frequency,
            samples = filtered.len(),
            "applied IIR filter"
        );

        Ok(Signal::from_validated(filtered, self.sample_rate()))
    }
}

/// Design an IIR filter from a high-level design description.
///
/// Returns `b` and `a`, each of length `order + 1`, with `a[0] == 1`.
///
/// # Errors
/// Returns a parameter error if the order is zero, the sample rate is not
/// positive, or the normalized cutoff `cutoff / (0.5 * sample_rate)` falls
/// outside the open interval `(0, 1)`.
///
/// # Examples
/// ```rust
/// use signal_chain::operations::{IirFilterDesign, design_iir_filter};
///
/// let design = IirFilterDesign::butterworth_lowpass(5, 1000.0);
/// let coeffs = design_iir_filter(&design, 44100.0).unwrap();
/// assert_eq!(coeffs.b.len(), 6);
/// assert_eq!(coeffs.a.len(), 6);
///
/// let at_nyquist = IirFilterDesign::butterworth_lowpass(5, 22050.0);
/// assert!(design_iir_filter(&at_nyquist, 44100.0).is_err());
/// ```
pub fn design_iir_filter(
    design: &IirFilterDesign,
    sample_rate: f64,
) -> SignalResult<FilterCoefficients> {
    let sample_rate = ensure_positive("sample_rate", sample_rate)?;
    match design.filter_type {
        IirFilterType::Butterworth => design_butterworth_filter(design, sample_rate),
    }
}

/// Design a Butterworth filter.
fn design_butterworth_filter(
    design: &IirFilterDesign,
    sample_rate: f64,
) -> SignalResult<FilterCoefficients> {
    let order = design.order;
    if order == 0 {
        return Err(ParameterError::invalid_value("order", "Filter order must be greater than 0").into());
    }

    let cutoff = ensure_finite("cutoff_frequency", design.cutoff_frequency)?;
    let nyquist = 0.5 * sample_rate;
    let normalized = design.normalized_cutoff(sample_rate);
    if !(normalized > 0.0 && normalized < 1.0) {
        return Err(ParameterError::out_of_range(
            "cutoff_frequency",
            cutoff,
            format!("(0, {nyquist}) Hz, normalized cutoff {normalized} must lie in (0, 1)"),
        )
        .into());
    }

    // Bilinear transform constant and pre-warped analog cutoff (rad/s).
    let fs2 = 2.0 * sample_rate;
    let warped = fs2 * (PI * cutoff / sample_rate).tan();
    let prototype = butterworth_prototype_poles(order);

    let (zeros, poles, gain) = match design.response {
        FilterResponse::LowPass => {
            let poles: Vec<Complex<f64>> = prototype.iter().map(|&p| p * warped).collect();
            (Vec::new(), poles, warped.powi(order as i32))
        }
        FilterResponse::HighPass => {
            let poles: Vec<Complex<f64>> = prototype.iter().map(|&p| warped / p).collect();
            (vec![Complex::new(0.0, 0.0); order], poles, 1.0)
        }
    };

    let (zeros, poles, gain) = bilinear_zpk(&zeros, &poles, gain, fs2);

    let b: Vec<f64> = poly(&zeros).iter().map(|c| gain * c.re).collect();
    let a: Vec<f64> = poly(&poles).iter().map(|c| c.re).collect();

    tracing::debug!(
        order,
        cutoff,
        normalized_cutoff = normalized,
        "designed Butterworth filter"
    );

    Ok(FilterCoefficients { b, a })
}

/// Poles of the unit-cutoff analog Butterworth prototype, all in the left half-plane.
fn butterworth_prototype_poles(order: usize) -> Vec<Complex<f64>> {
    let n = order as f64;
    (0..order)
        .map(|k| Complex::from_polar(1.0, PI * (2.0 * k as f64 + n + 1.0) / (2.0 * n)))
        .collect()
}

/// Map analog zeros/poles/gain to the z-plane with `s = fs2 (z - 1) / (z + 1)`.
///
/// Zeros at infinity land at `z = -1`.
fn bilinear_zpk(
    zeros: &[Complex<f64>],
    poles: &[Complex<f64>],
    gain: f64,
    fs2: f64,
) -> (Vec<Complex<f64>>, Vec<Complex<f64>>, f64) {
    let to_z = |s: &Complex<f64>| (fs2 + *s) / (fs2 - *s);

    let mut digital_zeros: Vec<Complex<f64>> = zeros.iter().map(to_z).collect();
    digital_zeros.resize(poles.len().max(zeros.len()), Complex::new(-1.0, 0.0));
    let digital_poles: Vec<Complex<f64>> = poles.iter().map(to_z).collect();

    let zero_product: Complex<f64> = zeros.iter().map(|z| fs2 - *z).product();
    let pole_product: Complex<f64> = poles.iter().map(|p| fs2 - *p).product();
    let digital_gain = gain * (zero_product / pole_product).re;

    (digital_zeros, digital_poles, digital_gain)
}

/// Monic polynomial coefficients (highest power first) with the given roots.
fn poly(roots: &[Complex<f64>]) -> Vec<Complex<f64>> {
    let mut coeffs = vec![Complex::new(1.0, 0.0)];
    for root in roots {
        coeffs.push(Complex::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let previous = coeffs[i - 1];
            coeffs[i] -= *root * previous;
        }
    }
    coeffs
}
