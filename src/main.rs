//! Runs the default signal chain and writes the resulting spectrum to the
//! working directory.

use signal_chain::operations::{JsonSpectrumWriter, SpectrumRenderer};
use signal_chain::{PipelineConfig, SignalPipeline, SignalResult};

fn main() -> SignalResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let pipeline = SignalPipeline::new(PipelineConfig::default())?;
    let output = pipeline.run()?;

    JsonSpectrumWriter::new("spectrum.json").render(&output.spectrum)?;

    #[cfg(feature = "plotting")]
    signal_chain::operations::HtmlSpectrumPlot::new("spectrum.html").render(&output.spectrum)?;

    if let Some(peak) = output.spectrum.peak_frequency() {
        tracing::info!(
            samples = output.generated.len(),
            peak_hz = peak.abs(),
            "spectrum written"
        );
    }

    Ok(())
}
