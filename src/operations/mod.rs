//! Signal processing operations.
//!
//! ## Module Organization
//!
//! - [`traits`] - Core trait definitions
//! - [`types`] - Filter designs, coefficients and spectra
//! - [`iir_filtering`] - Butterworth design and IIR filtering
//! - [`modulation`] - Amplitude modulation
//! - [`transforms`] - FFT and spectral analysis
//! - [`plotting`] - Spectrum renderers
//!
//! ## Quick Start
//!
//! ```rust
//! use signal_chain::{sine_wave, operations::*};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tone = sine_wave(440.0, 0.1, 44100.0, 1.0)?;
//!
//! let filtered = tone.butterworth_lowpass(5, 1000.0)?;
//! let modulated = filtered.amplitude_modulate(0.5, 440.0)?;
//! let spectrum = modulated.spectrum()?;
//! assert_eq!(spectrum.len(), tone.len());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod traits;
pub mod types;

pub mod iir_filtering;
pub mod modulation;
pub mod plotting;
pub mod transforms;

pub use traits::{Complex, SignalIirFiltering, SignalModulation, SignalTransforms};

pub use types::{FilterCoefficients, FilterResponse, IirFilterDesign, IirFilterType, Spectrum};

pub use iir_filtering::{IirFilter, design_iir_filter};
pub use plotting::{JsonSpectrumWriter, NullRenderer, SpectrumRenderer};
#[cfg(feature = "plotting")]
pub use plotting::HtmlSpectrumPlot;
pub use transforms::fft_frequencies;
