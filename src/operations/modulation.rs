//! Amplitude modulation.
//!
//! The modulated sample is `x[i] * index * cos(2π · carrier · i / sample_rate)`.
//! There is no DC offset on the message, so this is suppressed-carrier
//! modulation scaled by the index rather than textbook AM.

use std::f64::consts::PI;

use crate::error::{SignalResult, ensure_finite};
use crate::operations::traits::SignalModulation;
use crate::repr::Signal;

impl SignalModulation for Signal {
    fn amplitude_modulate(
        &self,
        modulation_index: f64,
        carrier_frequency: f64,
    ) -> SignalResult<Signal> {
        let modulation_index = ensure_finite("modulation_index", modulation_index)?;
        let carrier_frequency = ensure_finite("carrier_frequency", carrier_frequency)?;

        let omega = 2.0 * PI * carrier_frequency;
        let modulated = self.map_indexed(|i, x| {
            x * modulation_index * (omega * self.time_of(i)).cos()
        });

        tracing::debug!(
            modulation_index,
            carrier_frequency,
            samples = modulated.len(),
            "applied amplitude modulation"
        );

        Ok(modulated)
    }
}
