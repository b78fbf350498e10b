// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_const_for_fn)] // Suggests making eligible functions `const`
#![warn(missing_docs)]

//! # signal_chain
//!
//! A small signal processing chain: synthesize a tone, low-pass it with a
//! Butterworth filter, amplitude modulate it onto a carrier and take its
//! magnitude spectrum.
//!
//! ## Features
//!
//! - `plotting` (default): plotly-backed HTML spectrum plots
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`SignalResult`]. Invalid arguments are
//! reported as [`ParameterError`]s before any samples are touched; analysing
//! an empty signal is [`SignalError::EmptySignal`].
//!
//! ```rust
//! use signal_chain::{SignalError, sine_wave, operations::SignalIirFiltering};
//!
//! let tone = sine_wave(440.0, 0.01, 44100.0, 1.0).unwrap();
//! // A cutoff at the Nyquist frequency is not a valid low-pass design.
//! match tone.butterworth_lowpass(5, 22050.0) {
//!     Err(SignalError::Parameter(err)) => assert_eq!(err.parameter(), "cutoff_frequency"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use signal_chain::{PipelineConfig, SignalPipeline, operations::NullRenderer};
//!
//! let config = PipelineConfig {
//!     duration_secs: 0.25,
//!     ..PipelineConfig::default()
//! };
//! let output = SignalPipeline::new(config)
//!     .unwrap()
//!     .run_and_render(&NullRenderer)
//!     .unwrap();
//!
//! assert_eq!(output.modulated.len(), 11025);
//! let peak = output.spectrum.peak_frequency().unwrap();
//! println!("peak at {peak} Hz");
//! ```

pub mod config;
pub mod error;
pub mod operations;
pub mod pipeline;
pub mod repr;
pub mod utils;

pub use config::PipelineConfig;
pub use error::{ParameterError, PlottingError, SignalError, SignalResult};
pub use pipeline::{PipelineOutput, SignalPipeline};
pub use repr::Signal;
pub use utils::generation::{cosine_wave, sine_wave, time_axis};
