//! Track row parsing and formatting.

use thiserror::Error;

/// An input row did not have the expected shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("expected at least 4 comma-separated fields (lat,lon,date,time), found {found}")]
pub struct RecordParseError {
    /// Number of fields actually present.
    pub found: usize,
}

/// One coordinate of a GPS track.
///
/// Created by parsing an input row; `elevation` is populated after a
/// successful API call, and the record is written once to the output file.
/// Latitude and longitude are kept as the exact strings read from the input
/// so the output row reproduces them byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateRecord {
    /// Latitude, verbatim from the input row.
    pub latitude: String,
    /// Longitude, verbatim from the input row.
    pub longitude: String,
    /// Date field, verbatim from the input row.
    pub date: String,
    /// Time field, verbatim from the input row.
    pub time: String,
    /// Elevation in meters, set once the API call for this row succeeds.
    pub elevation: Option<f64>,
}

impl CoordinateRecord {
    /// Parses a `lat,lon,date,time` row.
    ///
    /// Extra trailing fields are ignored. Fields are not trimmed or
    /// reinterpreted.
    ///
    /// # Errors
    ///
    /// Returns [`RecordParseError`] if the row has fewer than four fields.
    pub fn parse(row: &str) -> Result<Self, RecordParseError> {
        let fields: Vec<&str> = row.split(',').collect();
        if fields.len() < 4 {
            return Err(RecordParseError {
                found: fields.len(),
            });
        }
        Ok(CoordinateRecord {
            latitude: fields[0].to_string(),
            longitude: fields[1].to_string(),
            date: fields[2].to_string(),
            time: fields[3].to_string(),
            elevation: None,
        })
    }

    /// The augmented `lat,lon,date,time,elevation` output row.
    ///
    /// Returns `None` until an elevation has been recorded.
    pub fn output_line(&self) -> Option<String> {
        self.elevation.map(|elevation| {
            format!(
                "{},{},{},{},{}",
                self.latitude, self.longitude, self.date, self.time, elevation
            )
        })
    }
}
