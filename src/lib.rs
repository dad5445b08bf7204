//! Processing core for laser-induced fluorescence (LIFS) spectra.
//!
//! A shell parses a spectrum file with [`data::loader`], hands the rows to a
//! [`SpectrumProcessor`], renders the returned [`ProcessingResult`] and, on
//! request, writes [`SpectrumProcessor::export_table`] with
//! [`data::export::write_table`].

pub mod data;
pub mod error;
pub mod processor;

pub use data::model::{ProcessingOptions, ProcessingResult, ResultSummary, SeriesLabel, Spectrum};
pub use error::ProcessingError;
pub use processor::SpectrumProcessor;
