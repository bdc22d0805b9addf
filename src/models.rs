//! Data model for inbound environmental sensor readings.

use serde::{Deserialize, Serialize};

// ---

/// One sensor observation received over HTTP.
///
/// The required fields are enforced by deserialization; a body missing any of
/// them is rejected before the handler body runs. The calibration offsets are
/// optional on the wire and only persisted when the `offsets` schema variant
/// is active.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Reading {
    // ---
    /// Logical sensor identifier; also names the destination table.
    pub name: String,
    pub temperature_f: f64,
    pub humidity_percentage: f64,
    pub heat_index_f: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_f_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_percentage_offset: Option<f64>,
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    // ---
    (value * 100.0).round() / 100.0
}

/// Simple transformation helpers
impl Reading {
    // ---
    /// Copy of this reading with the three core values rounded for storage.
    ///
    /// Calibration offsets are carried over verbatim, never rounded.
    pub fn rounded(&self) -> Reading {
        // ---
        Reading {
            name: self.name.clone(),
            temperature_f: round2(self.temperature_f),
            humidity_percentage: round2(self.humidity_percentage),
            heat_index_f: round2(self.heat_index_f),
            temperature_f_offset: self.temperature_f_offset,
            humidity_percentage_offset: self.humidity_percentage_offset,
        }
    }
}
