//! Real-world measurement helpers.

use crate::elements::Line;
use crate::host::EngineConfig;
use kurbo::Point;

/// Convert world pixels to centimeters for a given pixels-per-unit ratio.
pub fn px_to_cm(px: f64, pixels_per_unit: f64) -> f64 {
    px / pixels_per_unit
}

/// Observational layout data for a measurement label. The renderer draws
/// it; the engine only computes it.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementLabel {
    /// Formatted measurement, e.g. "120.0 cm".
    pub content: String,
    /// Anchor position in world coordinates.
    pub position: Point,
    /// Text angle in radians (follows the measured segment).
    pub angle: f64,
    /// Font size from the host configuration.
    pub font_size: f64,
}

/// Measurement label for a line: length in centimeters at the midpoint,
/// angled along the segment.
pub fn line_measurement_label(line: &Line, config: &EngineConfig) -> MeasurementLabel {
    let length_cm = px_to_cm(line.length(), config.pixels_per_unit);
    MeasurementLabel {
        content: format!("{length_cm:.1} cm"),
        position: line.midpoint(),
        angle: line.angle(),
        font_size: config.label_font_size,
    }
}

/// Parse user input for a numeric property field.
///
/// Returns `None` for anything that is not a finite number; the caller
/// keeps the prior value instead of propagating an error.
pub fn parse_numeric_field(input: &str) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;
    value.is_finite().then_some(value)
}
