//! Rendering of magnitude spectra.
//!
//! Computing a spectrum and displaying it are separate steps: anything that
//! implements [`SpectrumRenderer`] can be handed the result of
//! [`SignalTransforms::spectrum`](crate::operations::SignalTransforms::spectrum).
//!
//! - [`HtmlSpectrumPlot`] - interactive plotly line chart written to an HTML file
//!   (requires the `plotting` feature)
//! - [`JsonSpectrumWriter`] - the raw `(frequency, magnitude)` series as JSON
//! - [`NullRenderer`] - discards the spectrum, for headless runs and tests

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{PlottingError, SignalResult};
use crate::operations::types::Spectrum;

/// A sink for a computed spectrum.
pub trait SpectrumRenderer {
    /// Render `spectrum`.
    ///
    /// # Errors
    /// Implementations report output failures as [`PlottingError`]s.
    fn render(&self, spectrum: &Spectrum) -> SignalResult<()>;
}

/// Renderer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl SpectrumRenderer for NullRenderer {
    fn render(&self, spectrum: &Spectrum) -> SignalResult<()> {
        tracing::trace!(bins = spectrum.len(), "discarding spectrum");
        Ok(())
    }
}

fn create_parent_dirs(path: &Path) -> Result<(), PlottingError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| PlottingError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Writes the spectrum to a JSON file.
///
/// The document is the serialized [`Spectrum`]; bins are written in
/// ascending frequency order.
#[derive(Debug, Clone)]
pub struct JsonSpectrumWriter {
    path: PathBuf,
}

impl JsonSpectrumWriter {
    /// Create a writer targeting `path`. Parent directories are created on render.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SpectrumRenderer for JsonSpectrumWriter {
    fn render(&self, spectrum: &Spectrum) -> SignalResult<()> {
        create_parent_dirs(&self.path)?;
        let write_error = |source| PlottingError::Write {
            path: self.path.clone(),
            source,
        };

        let file = File::create(&self.path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &spectrum.shifted())?;
        writer.flush().map_err(write_error)?;

        tracing::info!(path = %self.path.display(), bins = spectrum.len(), "wrote spectrum JSON");
        Ok(())
    }
}

#[cfg(feature = "plotting")]
pub use html::HtmlSpectrumPlot;

#[cfg(feature = "plotting")]
mod html {
    use std::path::{Path, PathBuf};

    use plotly::common::{Mode, Title};
    use plotly::layout::{Axis, Layout};
    use plotly::{Plot, Scatter};

    use super::{SpectrumRenderer, create_parent_dirs};
    use crate::error::{PlottingError, SignalResult};
    use crate::operations::types::Spectrum;

    /// Magnitude-vs-frequency line chart rendered with plotly to a standalone HTML page.
    #[derive(Debug, Clone)]
    pub struct HtmlSpectrumPlot {
        path: PathBuf,
        title: String,
        x_label: String,
        y_label: String,
    }

    impl HtmlSpectrumPlot {
        /// Create a plot targeting `path` with the default title and axis labels.
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self {
                path: path.into(),
                title: "Frequency Spectrum".to_string(),
                x_label: "Frequency (Hz)".to_string(),
                y_label: "Magnitude".to_string(),
            }
        }

        /// Set the chart title.
        pub fn with_title(mut self, title: &str) -> Self {
            self.title = title.to_string();
            self
        }

        /// Set the axis labels.
        pub fn with_labels(mut self, x_label: &str, y_label: &str) -> Self {
            self.x_label = x_label.to_string();
            self.y_label = y_label.to_string();
            self
        }

        /// Destination path.
        pub fn path(&self) -> &Path {
            &self.path
        }

        /// Build the plotly figure for `spectrum`.
        pub fn create_plot(&self, spectrum: &Spectrum) -> Plot {
            let (frequencies, magnitudes) = spectrum.shifted().into_parts();
            let trace = Scatter::new(frequencies, magnitudes)
                .mode(Mode::Lines)
                .name("|X(f)|");

            let layout = Layout::new()
                .title(Title::with_text(&self.title))
                .x_axis(Axis::new().title(Title::with_text(&self.x_label)))
                .y_axis(Axis::new().title(Title::with_text(&self.y_label)));

            let mut plot = Plot::new();
            plot.add_trace(trace);
            plot.set_layout(layout);
            plot
        }

        /// Render `spectrum` to an HTML document string.
        ///
        /// # Errors
        /// Returns [`PlottingError::NoData`] for an empty spectrum.
        pub fn to_html(&self, spectrum: &Spectrum) -> SignalResult<String> {
            if spectrum.is_empty() {
                return Err(PlottingError::NoData("spectrum has no bins".to_string()).into());
            }
            Ok(self.create_plot(spectrum).to_html())
        }
    }

    impl SpectrumRenderer for HtmlSpectrumPlot {
        fn render(&self, spectrum: &Spectrum) -> SignalResult<()> {
            let html = self.to_html(spectrum)?;
            create_parent_dirs(&self.path)?;
            std::fs::write(&self.path, html).map_err(|source| PlottingError::Write {
                path: self.path.clone(),
                source,
            })?;

            tracing::info!(path = %self.path.display(), "wrote spectrum plot");
            Ok(())
        }
    }
}
