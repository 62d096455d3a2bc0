//! JSON export serializer.
//!
//! Writes polylines as arrays of `[x, y]` pairs, the first shape
//! [`polyreduce::input`] accepts, so simplified output can be fed straight
//! back in.

use polyreduce::Polyline;

/// Errors that can occur while serializing output.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// A coordinate could not be represented in JSON (NaN or infinite).
    #[error("non-finite coordinate in polyline {polyline}, point {index}")]
    NonFinite {
        /// Index of the polyline.
        polyline: usize,
        /// Index of the point within the polyline.
        index: usize,
    },

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize polylines as a pretty-printed JSON array of series.
///
/// A single polyline is still wrapped in an outer array.
///
/// # Errors
///
/// Returns [`ExportError::NonFinite`] if any coordinate is NaN or infinite
/// (JSON has no representation for them).
pub fn to_json(polylines: &[Polyline]) -> Result<String, ExportError> {
    let mut series = Vec::with_capacity(polylines.len());
    for (polyline_index, polyline) in polylines.iter().enumerate() {
        let mut pairs = Vec::with_capacity(polyline.len());
        for (index, p) in polyline.points().iter().enumerate() {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(ExportError::NonFinite {
                    polyline: polyline_index,
                    index,
                });
            }
            pairs.push([p.x, p.y]);
        }
        series.push(pairs);
    }
    Ok(serde_json::to_string_pretty(&series)?)
}
