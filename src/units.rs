//! Length conversions used by figure sizes.

const MM_PER_INCH: f64 = 25.4;

/// Convert millimeters to inches. Negative input yields negative output.
pub fn millimeter_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Convert inches to millimeters.
pub fn inches_to_millimeter(inches: f64) -> f64 {
    inches * MM_PER_INCH
}
