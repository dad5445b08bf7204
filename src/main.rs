use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};

use lifs_spectra::data::export;
use lifs_spectra::data::loader::{self, HeaderMode};
use lifs_spectra::{ProcessingError, ProcessingOptions, ProcessingResult, SpectrumProcessor};

const USAGE: &str = "usage: lifs-spectra <spectrum-file> [export-file]";

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args_os().skip(1);
    let input = args.next().map(PathBuf::from).context(USAGE)?;
    let export_path = args.next().map(PathBuf::from);

    let rows = loader::load_file(&input, HeaderMode::Auto)?;
    let mut processor = SpectrumProcessor::new();
    processor
        .load(&rows)
        .with_context(|| format!("loading {}", input.display()))?;
    log::info!("Loaded {} points from {}", rows.len(), input.display());

    let result = process_with_fallback(&mut processor, ProcessingOptions::default())?;
    println!("{}", serde_json::to_string_pretty(&result.summary())?);

    if let Some(path) = export_path {
        let table = processor.export_table()?;
        let written = export::write_table(&table, &path)?;
        log::info!("Wrote {}", written.display());
    }
    Ok(())
}

/// Spectra shorter than the smoothing window are shown unsmoothed.
fn process_with_fallback(
    processor: &mut SpectrumProcessor,
    options: ProcessingOptions,
) -> Result<ProcessingResult> {
    match processor.process(options) {
        Err(ProcessingError::InsufficientSamples { required, available }) => {
            log::warn!("Only {available} points (smoothing needs {required}), showing raw data");
            let raw = ProcessingOptions {
                smoothing_enabled: false,
                ..options
            };
            Ok(processor.process(raw)?)
        }
        other => Ok(other?),
    }
}
