//! Data layer: core types, loading, smoothing, integration and export.
//!
//! Architecture:
//! ```text
//!  .txt / .dat / .csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Vec<(wavelength, count)>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────────┐
//!   │ SpectrumProcessor  │  Spectrum → ProcessingResult
//!   └───────────────────┘
//!        │   uses smoothing (Savitzky–Golay) and integrate (trapezoid, peak)
//!        ▼
//!   ┌──────────┐
//!   │  export   │  ExportTable → .csv
//!   └──────────┘
//! ```

pub mod export;
pub mod integrate;
pub mod loader;
pub mod model;
pub mod smoothing;
