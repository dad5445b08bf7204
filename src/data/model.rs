use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProcessingError;

// ---------------------------------------------------------------------------
// Spectrum – the loaded (wavelength, count) pairs
// ---------------------------------------------------------------------------

/// A single LIFS spectrum, kept in the order the rows were given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Wavelength axis (x).
    pub wavelength: Vec<f64>,
    /// Counts (y) – same length as `wavelength`.
    pub count: Vec<f64>,
}

impl Spectrum {
    /// Build a spectrum from parsed rows. Fails on an empty slice.
    pub fn from_rows(rows: &[(f64, f64)]) -> Result<Self, ProcessingError> {
        if rows.is_empty() {
            return Err(ProcessingError::EmptyInput);
        }
        let (wavelength, count) = rows.iter().copied().unzip();
        Ok(Spectrum { wavelength, count })
    }

    /// Same axis, different counts. Used for the smoothed series.
    pub(crate) fn with_counts(&self, count: Vec<f64>) -> Self {
        debug_assert_eq!(count.len(), self.wavelength.len());
        Spectrum {
            wavelength: self.wavelength.clone(),
            count,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    /// Whether the spectrum has no samples.
    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }

    /// `[x, y]` pairs ready for a line plot.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.wavelength
            .iter()
            .zip(self.count.iter())
            .map(|(&x, &y)| [x, y])
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Processing options and results
// ---------------------------------------------------------------------------

/// What `process` should do. Both steps are on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingOptions {
    pub smoothing_enabled: bool,
    pub summary_enabled: bool,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            smoothing_enabled: true,
            summary_enabled: true,
        }
    }
}

/// Name of the working series, shown in plot legends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesLabel {
    Data,
    Filtered,
}

impl fmt::Display for SeriesLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesLabel::Data => write!(f, "Data"),
            SeriesLabel::Filtered => write!(f, "Filtered"),
        }
    }
}

/// Output of one `process` call. Summary values are 0 when disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingResult {
    /// Raw or smoothed counts on the loaded wavelength axis.
    pub series: Spectrum,
    pub label: SeriesLabel,
    /// Trapezoidal integral of `series` over the wavelength axis.
    pub area: f64,
    pub peak_height: f64,
    /// Wavelength where `peak_height` occurs.
    pub peak_wavelength: f64,
}

impl ProcessingResult {
    /// True when nothing meaningful was computed: an empty or all-zero
    /// series with zero area and height.
    pub fn is_degenerate(&self) -> bool {
        self.series.count.iter().all(|&c| c == 0.0) && self.area == 0.0 && self.peak_height == 0.0
    }

    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            label: self.label,
            points: self.series.len(),
            area: self.area,
            peak_height: self.peak_height,
            peak_wavelength: self.peak_wavelength,
        }
    }
}

/// Compact, serializable view of a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub label: SeriesLabel,
    pub points: usize,
    pub area: f64,
    pub peak_height: f64,
    pub peak_wavelength: f64,
}
