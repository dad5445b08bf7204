use crate::data::export::ExportTable;
use crate::data::integrate::{peak, trapezoid};
use crate::data::model::{ProcessingOptions, ProcessingResult, SeriesLabel, Spectrum};
use crate::data::smoothing::SavitzkyGolay;
use crate::error::ProcessingError;

// ---------------------------------------------------------------------------
// Spectrum processor
// ---------------------------------------------------------------------------

/// Holds the loaded spectrum and the last processing outcome.
///
/// `load` and `process` either fully succeed or leave every field as it
/// was, so a shell can show the error and keep displaying the old state.
#[derive(Debug, Clone, Default)]
pub struct SpectrumProcessor {
    /// Loaded spectrum (None until rows are loaded).
    spectrum: Option<Spectrum>,

    /// Options of the last successful `process`.
    options: Option<ProcessingOptions>,

    /// Result of the last successful `process` since the last `load`.
    result: Option<ProcessingResult>,
}

impl SpectrumProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything and go back to "nothing loaded".
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replace the current spectrum with `rows`.
    pub fn load(&mut self, rows: &[(f64, f64)]) -> Result<(), ProcessingError> {
        let spectrum = Spectrum::from_rows(rows)?;
        log::debug!("Loaded spectrum with {} points", spectrum.len());

        self.spectrum = Some(spectrum);
        self.options = None;
        self.result = None;
        Ok(())
    }

    /// Smooth and/or summarise the loaded spectrum.
    pub fn process(&mut self, options: ProcessingOptions) -> Result<ProcessingResult, ProcessingError> {
        let spectrum = self
            .spectrum
            .as_ref()
            .ok_or(ProcessingError::NoSpectrumLoaded)?;

        let (series, label) = if options.smoothing_enabled {
            let filter = SavitzkyGolay::pipeline_default()?;
            let smoothed = filter.apply(&spectrum.count)?;
            (spectrum.with_counts(smoothed), SeriesLabel::Filtered)
        } else {
            (spectrum.clone(), SeriesLabel::Data)
        };

        let (area, peak_height, peak_wavelength) = if options.summary_enabled {
            let area = trapezoid(&series.wavelength, &series.count);
            let (at, height) = peak(&series.wavelength, &series.count).unwrap_or((0.0, 0.0));
            (area, height, at)
        } else {
            (0.0, 0.0, 0.0)
        };

        let result = ProcessingResult {
            series,
            label,
            area,
            peak_height,
            peak_wavelength,
        };
        log::debug!(
            "Processed {} points as {}: area {:.4}, peak {:.4} at {:.4}",
            result.series.len(),
            result.label,
            result.area,
            result.peak_height,
            result.peak_wavelength
        );

        self.options = Some(options);
        self.result = Some(result.clone());
        Ok(result)
    }

    /// Table of the raw counts next to the last processed series.
    pub fn export_table(&self) -> Result<ExportTable, ProcessingError> {
        let (spectrum, result) = match (&self.spectrum, &self.result) {
            (Some(sp), Some(res)) if !res.is_degenerate() => (sp, res),
            _ => return Err(ProcessingError::NothingToExport),
        };

        Ok(ExportTable::build(
            &spectrum.wavelength,
            &spectrum.count,
            &result.series.count,
            result.area,
            result.peak_height,
        ))
    }

    pub fn is_loaded(&self) -> bool {
        self.spectrum.is_some()
    }

    pub fn spectrum(&self) -> Option<&Spectrum> {
        self.spectrum.as_ref()
    }

    pub fn result(&self) -> Option<&ProcessingResult> {
        self.result.as_ref()
    }

    /// Options used for the current result.
    pub fn options(&self) -> Option<ProcessingOptions> {
        self.options
    }

    /// Plot series of the loaded data.
    pub fn raw_points(&self) -> Vec<[f64; 2]> {
        self.spectrum.as_ref().map(Spectrum::points).unwrap_or_default()
    }

    /// Plot series of the last result.
    pub fn processed_points(&self) -> Vec<[f64; 2]> {
        self.result
            .as_ref()
            .map(|r| r.series.points())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::smoothing::SMOOTHING_WINDOW;

    const SCENARIO: [(f64, f64); 5] = [
        (400.0, 10.0),
        (410.0, 50.0),
        (420.0, 90.0),
        (430.0, 40.0),
        (440.0, 5.0),
    ];

    const RAW_ONLY: ProcessingOptions = ProcessingOptions {
        smoothing_enabled: false,
        summary_enabled: false,
    };

    const SUMMARY_ONLY: ProcessingOptions = ProcessingOptions {
        smoothing_enabled: false,
        summary_enabled: true,
    };

    fn gaussian_rows(n: usize) -> Vec<(f64, f64)> {
        (0..n)
            .map(|i| {
                let wl = 450.0 + i as f64 * 0.75;
                let count = 1000.0 * (-(wl - 480.0).powi(2) / 50.0).exp() + 20.0;
                (wl, count)
            })
            .collect()
    }

    #[test]
    fn process_before_load_fails() {
        let mut p = SpectrumProcessor::new();
        for opts in [RAW_ONLY, SUMMARY_ONLY, ProcessingOptions::default()] {
            assert_eq!(p.process(opts), Err(ProcessingError::NoSpectrumLoaded));
        }
    }

    #[test]
    fn empty_load_fails_and_keeps_previous_spectrum() {
        let mut p = SpectrumProcessor::new();
        assert_eq!(p.load(&[]), Err(ProcessingError::EmptyInput));
        assert!(!p.is_loaded());

        p.load(&SCENARIO).unwrap();
        assert_eq!(p.load(&[]), Err(ProcessingError::EmptyInput));
        assert_eq!(p.spectrum().map(Spectrum::len), Some(5));
    }

    #[test]
    fn identity_path_returns_raw_series() {
        let mut p = SpectrumProcessor::new();
        p.load(&SCENARIO).unwrap();
        let res = p.process(RAW_ONLY).unwrap();
        assert_eq!(res.label, SeriesLabel::Data);
        assert_eq!(res.series, *p.spectrum().unwrap());
        assert_eq!((res.area, res.peak_height, res.peak_wavelength), (0.0, 0.0, 0.0));
    }

    #[test]
    fn summary_scenario() {
        let mut p = SpectrumProcessor::new();
        p.load(&SCENARIO).unwrap();
        let res = p.process(SUMMARY_ONLY).unwrap();
        assert_eq!(res.label, SeriesLabel::Data);
        assert_eq!(res.peak_height, 90.0);
        assert_eq!(res.peak_wavelength, 420.0);
        assert!((res.area - 1875.0).abs() < 1e-9);
    }

    #[test]
    fn smoothing_short_spectrum_fails_without_touching_state() {
        let mut p = SpectrumProcessor::new();
        p.load(&SCENARIO).unwrap();
        let before = p.process(SUMMARY_ONLY).unwrap();

        let err = p.process(ProcessingOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ProcessingError::InsufficientSamples {
                required: SMOOTHING_WINDOW,
                available: 5
            }
        );
        assert_eq!(p.result(), Some(&before));
        assert_eq!(p.options(), Some(SUMMARY_ONLY));
    }

    #[test]
    fn smoothing_labels_and_keeps_axis() {
        let rows = gaussian_rows(120);
        let mut p = SpectrumProcessor::new();
        p.load(&rows).unwrap();
        let res = p.process(ProcessingOptions::default()).unwrap();

        assert_eq!(res.label, SeriesLabel::Filtered);
        assert_eq!(res.series.wavelength, p.spectrum().unwrap().wavelength);
        // smooth input stays close to itself
        assert!((res.peak_height - 1020.0).abs() < 5.0);
        assert!((res.peak_wavelength - 480.0).abs() < 1.0);
        let expected = trapezoid(&res.series.wavelength, &res.series.count);
        assert!((res.area - expected).abs() < 1e-9);
    }

    #[test]
    fn export_requires_a_process_since_load() {
        let mut p = SpectrumProcessor::new();
        assert_eq!(p.export_table(), Err(ProcessingError::NothingToExport));

        p.load(&SCENARIO).unwrap();
        assert_eq!(p.export_table(), Err(ProcessingError::NothingToExport));

        p.process(SUMMARY_ONLY).unwrap();
        assert!(p.export_table().is_ok());

        p.load(&SCENARIO).unwrap();
        assert_eq!(p.export_table(), Err(ProcessingError::NothingToExport));
    }

    #[test]
    fn export_rejects_all_zero_result() {
        let mut p = SpectrumProcessor::new();
        p.load(&[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]).unwrap();
        p.process(SUMMARY_ONLY).unwrap();
        assert_eq!(p.export_table(), Err(ProcessingError::NothingToExport));
    }

    #[test]
    fn export_carries_scalars_in_first_row() {
        let mut p = SpectrumProcessor::new();
        p.load(&SCENARIO).unwrap();
        let res = p.process(SUMMARY_ONLY).unwrap();
        let table = p.export_table().unwrap();

        assert_eq!(table.len(), SCENARIO.len());
        assert_eq!(table.rows[0].area, Some(res.area));
        assert_eq!(table.rows[0].height, Some(res.peak_height));
        assert!(table.rows[1..].iter().all(|r| r.area.is_none() && r.height.is_none()));
        for (row, &(wl, count)) in table.rows.iter().zip(SCENARIO.iter()) {
            assert_eq!((row.wavelength, row.count, row.filtered), (wl, count, count));
        }
    }

    #[test]
    fn export_filtered_column_holds_smoothed_counts() {
        let rows = gaussian_rows(40);
        let mut p = SpectrumProcessor::new();
        p.load(&rows).unwrap();
        let res = p.process(ProcessingOptions::default()).unwrap();
        let table = p.export_table().unwrap();
        let filtered: Vec<f64> = table.rows.iter().map(|r| r.filtered).collect();
        let counts: Vec<f64> = table.rows.iter().map(|r| r.count).collect();
        assert_eq!(filtered, res.series.count);
        assert_eq!(counts, p.spectrum().unwrap().count);
    }

    #[test]
    fn plot_points_and_reset() {
        let mut p = SpectrumProcessor::new();
        assert!(p.raw_points().is_empty());
        p.load(&SCENARIO).unwrap();
        p.process(RAW_ONLY).unwrap();
        assert_eq!(p.raw_points()[2], [420.0, 90.0]);
        assert_eq!(p.processed_points(), p.raw_points());

        p.reset();
        assert!(!p.is_loaded());
        assert!(p.result().is_none());
        assert!(p.processed_points().is_empty());
    }
}
