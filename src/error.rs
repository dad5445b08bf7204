use thiserror::Error;

/// Recoverable failures of the processing pipeline.
///
/// None of these leave the processor half-updated: the operation that
/// returned the error did not touch the stored spectrum or result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    #[error("no data rows to load")]
    EmptyInput,

    #[error("no spectrum loaded")]
    NoSpectrumLoaded,

    #[error("nothing to export, process a spectrum first")]
    NothingToExport,

    #[error("smoothing needs at least {required} samples, spectrum has {available}")]
    InsufficientSamples { required: usize, available: usize },

    /// Window must be odd and strictly larger than the polynomial order.
    #[error("invalid Savitzky-Golay filter: window {window_length}, order {polyorder}")]
    InvalidFilter {
        window_length: usize,
        polyorder: usize,
    },
}
