//! Pipeline configuration.
//!
//! Every tunable of the chain lives in [`PipelineConfig`] and is handed to
//! [`SignalPipeline`](crate::SignalPipeline) explicitly. The defaults
//! describe one second of a 440 Hz tone at 44.1 kHz, low-passed at 1 kHz by a
//! fifth-order Butterworth filter and modulated at index 0.5 onto a 440 Hz
//! carrier.
//!
//! ```rust
//! use signal_chain::PipelineConfig;
//!
//! let config = PipelineConfig {
//!     cutoff_frequency: 2000.0,
//!     ..PipelineConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.sample_rate, 44100.0);
//! ```

use crate::error::{ParameterError, ensure_finite, ensure_positive};
use crate::utils::generation::sample_count;

/// Parameters for a full generate → filter → modulate → analyse run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Length of the generated tone in seconds.
    pub duration_secs: f64,
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Frequency of the generated tone in Hz.
    pub tone_frequency: f64,
    /// Low-pass cutoff in Hz; must be below the Nyquist frequency.
    pub cutoff_frequency: f64,
    /// Butterworth filter order.
    pub filter_order: usize,
    /// Scale applied together with the carrier.
    pub modulation_index: f64,
    /// Carrier frequency in Hz.
    pub carrier_frequency: f64,
}

impl PipelineConfig {
    /// Default signal length in seconds.
    pub const DEFAULT_DURATION_SECS: f64 = 1.0;
    /// Default sample rate in Hz.
    pub const DEFAULT_SAMPLE_RATE: f64 = 44_100.0;
    /// Default tone frequency in Hz (A4).
    pub const DEFAULT_TONE_FREQUENCY: f64 = 440.0;
    /// Default low-pass cutoff in Hz.
    pub const DEFAULT_CUTOFF_FREQUENCY: f64 = 1_000.0;
    /// Default Butterworth order.
    pub const DEFAULT_FILTER_ORDER: usize = 5;
    /// Default modulation index.
    pub const DEFAULT_MODULATION_INDEX: f64 = 0.5;

    /// Nyquist frequency of the configured sample rate.
    pub fn nyquist(&self) -> f64 {
        0.5 * self.sample_rate
    }

    /// Check every field before any processing starts.
    ///
    /// # Errors
    /// Returns the first offending field as a [`ParameterError`].
    pub fn validate(&self) -> Result<(), ParameterError> {
        ensure_positive("duration_secs", self.duration_secs)?;
        ensure_positive("sample_rate", self.sample_rate)?;
        sample_count(self.duration_secs, self.sample_rate)?;
        ensure_finite("tone_frequency", self.tone_frequency)?;
        ensure_finite("modulation_index", self.modulation_index)?;
        ensure_finite("carrier_frequency", self.carrier_frequency)?;

        if self.filter_order == 0 {
            return Err(ParameterError::invalid_value(
                "filter_order",
                "Filter order must be greater than 0",
            ));
        }

        let cutoff = ensure_finite("cutoff_frequency", self.cutoff_frequency)?;
        let nyquist = self.nyquist();
        if cutoff <= 0.0 || cutoff >= nyquist {
            return Err(ParameterError::out_of_range(
                "cutoff_frequency",
                cutoff,
                format!("(0, {nyquist}) Hz"),
            ));
        }

        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            duration_secs: Self::DEFAULT_DURATION_SECS,
            sample_rate: Self::DEFAULT_SAMPLE_RATE,
            tone_frequency: Self::DEFAULT_TONE_FREQUENCY,
            cutoff_frequency: Self::DEFAULT_CUTOFF_FREQUENCY,
            filter_order: Self::DEFAULT_FILTER_ORDER,
            modulation_index: Self::DEFAULT_MODULATION_INDEX,
            carrier_frequency: Self::DEFAULT_TONE_FREQUENCY,
        }
    }
}
