//! The generate → filter → modulate → analyse chain.
//!
//! ```rust
//! use signal_chain::{PipelineConfig, SignalPipeline};
//!
//! let pipeline = SignalPipeline::new(PipelineConfig::default()).unwrap();
//! let output = pipeline.run().unwrap();
//! assert_eq!(output.generated.len(), 44100);
//! assert_eq!(output.spectrum.len(), 44100);
//! ```

use tracing::instrument;

use crate::config::PipelineConfig;
use crate::error::{ParameterError, SignalResult};
use crate::operations::plotting::SpectrumRenderer;
use crate::operations::traits::{SignalIirFiltering, SignalModulation, SignalTransforms};
use crate::operations::types::Spectrum;
use crate::repr::Signal;
use crate::utils::generation::sine_wave;

/// Amplitude of the generated tone.
const TONE_AMPLITUDE: f64 = 1.0;

/// Every intermediate product of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The synthesized tone (the input signal when driven via [`SignalPipeline::process`]).
    pub generated: Signal,
    /// Output of the low-pass stage.
    pub filtered: Signal,
    /// Output of the modulation stage.
    pub modulated: Signal,
    /// Magnitude spectrum of the modulated signal.
    pub spectrum: Spectrum,
}

/// Runs the chain with a fixed, validated configuration.
#[derive(Debug, Clone)]
pub struct SignalPipeline {
    config: PipelineConfig,
}

impl SignalPipeline {
    /// Create a pipeline after validating `config`.
    ///
    /// # Errors
    /// Returns the first invalid configuration field.
    pub fn new(config: PipelineConfig) -> SignalResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this pipeline runs with.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Synthesize the configured tone.
    ///
    /// # Errors
    /// Propagates generator parameter errors.
    pub fn generate(&self) -> SignalResult<Signal> {
        let c = &self.config;
        sine_wave(c.tone_frequency, c.duration_secs, c.sample_rate, TONE_AMPLITUDE)
    }

    /// Generate the tone and push it through every stage.
    ///
    /// # Errors
    /// Any stage failure is returned unchanged; nothing is retried.
    #[instrument(skip(self), fields(duration = self.config.duration_secs, sample_rate = self.config.sample_rate))]
    pub fn run(&self) -> SignalResult<PipelineOutput> {
        let generated = self.generate()?;
        tracing::debug!(samples = generated.len(), "generated tone");
        self.process(generated)
    }

    /// Filter, modulate and analyse an existing signal.
    ///
    /// The signal must carry the configured sample rate.
    ///
    /// # Errors
    /// Returns a parameter error on a sample-rate mismatch, a filter design
    /// error, or [`SignalError::EmptySignal`](crate::SignalError::EmptySignal)
    /// if the signal has no samples.
    #[instrument(skip_all, fields(samples = signal.len()))]
    pub fn process(&self, signal: Signal) -> SignalResult<PipelineOutput> {
        let c = &self.config;
        if signal.sample_rate() != c.sample_rate {
            return Err(ParameterError::invalid_value(
                "sample_rate",
                format!(
                    "signal is sampled at {} Hz but the pipeline is configured for {} Hz",
                    signal.sample_rate(),
                    c.sample_rate
                ),
            )
            .into());
        }

        let filtered = signal.butterworth_lowpass(c.filter_order, c.cutoff_frequency)?;
        let modulated = filtered.amplitude_modulate(c.modulation_index, c.carrier_frequency)?;
        let spectrum = modulated.spectrum()?;

        if let Some(peak) = spectrum.peak_frequency() {
            tracing::info!(
                peak_hz = peak.abs(),
                bin_width_hz = spectrum.bin_width(),
                "pipeline complete"
            );
        }

        Ok(PipelineOutput {
            generated: signal,
            filtered,
            modulated,
            spectrum,
        })
    }

    /// [`run`](Self::run) followed by rendering the spectrum with `renderer`.
    ///
    /// # Errors
    /// Pipeline errors, then renderer errors.
    pub fn run_and_render(&self, renderer: &dyn SpectrumRenderer) -> SignalResult<PipelineOutput> {
        let output = self.run()?;
        renderer.render(&output.spectrum)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SignalError;
    use crate::operations::plotting::NullRenderer;
    use std::cell::Cell;

    struct CountingRenderer {
        calls: Cell<usize>,
    }

    impl SpectrumRenderer for CountingRenderer {
        fn render(&self, spectrum: &Spectrum) -> SignalResult<()> {
            assert!(!spectrum.is_empty());
            self.calls.set(self.calls.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_default_run_shapes() {
        let pipeline = SignalPipeline::new(PipelineConfig::default()).unwrap();
        let output = pipeline.run().unwrap();

        assert_eq!(output.generated.len(), 44100);
        assert_eq!(output.generated.samples()[0], 0.0);
        assert_eq!(output.filtered.len(), 44100);
        assert_eq!(output.modulated.len(), 44100);
        assert_eq!(output.spectrum.len(), 44100);
        assert_eq!(output.spectrum.bin_width(), 1.0);
    }

    #[test]
    fn test_default_run_spectrum_has_sum_and_difference_tones() {
        // A 440 Hz tone modulated onto a 440 Hz carrier lands at 0 Hz and 880 Hz.
        let output = SignalPipeline::new(PipelineConfig::default())
            .unwrap()
            .run()
            .unwrap();
        let spectrum = &output.spectrum;
        let dc = spectrum.magnitudes()[0];
        let sum = spectrum.magnitudes()[880];
        let elsewhere = spectrum.magnitudes()[3000];
        assert!(sum > 100.0 * elsewhere);
        assert!(dc > 100.0 * elsewhere);
    }

    #[test]
    fn test_modulated_tone_peak_moves_with_carrier() {
        let config = PipelineConfig {
            tone_frequency: 300.0,
            carrier_frequency: 5000.0,
            ..PipelineConfig::default()
        };
        let output = SignalPipeline::new(config).unwrap().run().unwrap();
        let peak = output.spectrum.peak_frequency().unwrap().abs();
        assert!(
            (peak - 4700.0).abs() <= 1.0 || (peak - 5300.0).abs() <= 1.0,
            "unexpected peak at {peak} Hz"
        );
    }

    #[test]
    fn test_zero_signal_through_filter_and_modulator() {
        let pipeline = SignalPipeline::new(PipelineConfig::default()).unwrap();
        let output = pipeline.process(Signal::zeros(100, 44100.0).unwrap()).unwrap();
        assert_eq!(output.modulated.len(), 100);
        assert!(output.modulated.samples().iter().all(|&x| x == 0.0));
        assert!(output.spectrum.magnitudes().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_empty_signal_fails_at_spectrum() {
        let pipeline = SignalPipeline::new(PipelineConfig::default()).unwrap();
        let err = pipeline.process(Signal::zeros(0, 44100.0).unwrap()).unwrap_err();
        assert!(matches!(err, SignalError::EmptySignal { .. }));
    }

    #[test]
    fn test_sample_rate_mismatch_rejected() {
        let pipeline = SignalPipeline::new(PipelineConfig::default()).unwrap();
        let err = pipeline.process(Signal::zeros(10, 48000.0).unwrap()).unwrap_err();
        assert!(matches!(err, SignalError::Parameter(_)));
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let config = PipelineConfig {
            cutoff_frequency: 22050.0,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            SignalPipeline::new(config),
            Err(SignalError::Parameter(_))
        ));
    }

    #[test]
    fn test_run_and_render_invokes_renderer_once() {
        let config = PipelineConfig {
            duration_secs: 0.05,
            ..PipelineConfig::default()
        };
        let pipeline = SignalPipeline::new(config).unwrap();
        let renderer = CountingRenderer {
            calls: Cell::new(0),
        };
        let output = pipeline.run_and_render(&renderer).unwrap();
        assert_eq!(renderer.calls.get(), 1);
        assert_eq!(output.spectrum.len(), 2205);

        assert!(pipeline.run_and_render(&NullRenderer).is_ok());
    }
}
