use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Suffix every export file ends up with, whatever the user typed.
pub const EXPORT_EXTENSION: &str = "csv";

// ---------------------------------------------------------------------------
// Export table
// ---------------------------------------------------------------------------

/// One exported sample.
///
/// `area` and `height` are per-file scalars: only the first row carries
/// them, every other row leaves the cells empty. Readers that expect the
/// value on every row will need to forward-fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Wavelength")]
    pub wavelength: f64,
    #[serde(rename = "Count")]
    pub count: f64,
    #[serde(rename = "Filtered")]
    pub filtered: f64,
    #[serde(rename = "Area")]
    pub area: Option<f64>,
    #[serde(rename = "Height")]
    pub height: Option<f64>,
}

/// Row-aligned table with columns `Wavelength, Count, Filtered, Area, Height`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportTable {
    pub rows: Vec<ExportRow>,
}

impl ExportTable {
    /// Zip the three series and attach `area` / `height` to the first row.
    pub fn build(wavelength: &[f64], count: &[f64], filtered: &[f64], area: f64, height: f64) -> Self {
        let rows = wavelength
            .iter()
            .zip(count)
            .zip(filtered)
            .enumerate()
            .map(|(i, ((&wavelength, &count), &filtered))| ExportRow {
                wavelength,
                count,
                filtered,
                area: (i == 0).then_some(area),
                height: (i == 0).then_some(height),
            })
            .collect();
        ExportTable { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Force the export suffix onto `path`, replacing any extension present.
pub fn normalize_export_path(path: &Path) -> PathBuf {
    path.with_extension(EXPORT_EXTENSION)
}

/// Write the table as CSV with a header row.
pub fn write_to<W: Write>(table: &ExportTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if table.rows.is_empty() {
        wtr.write_record(["Wavelength", "Count", "Filtered", "Area", "Height"])
            .context("writing export header")?;
    }
    for (i, row) in table.rows.iter().enumerate() {
        wtr.serialize(row)
            .with_context(|| format!("writing export row {i}"))?;
    }
    wtr.flush().context("flushing export")?;
    Ok(())
}

/// Write the table to `path` (suffix normalized). Returns the path written.
pub fn write_table(table: &ExportTable, path: &Path) -> Result<PathBuf> {
    let target = normalize_export_path(path);
    let file = std::fs::File::create(&target)
        .with_context(|| format!("creating export file {}", target.display()))?;
    write_to(table, file).with_context(|| format!("exporting to {}", target.display()))?;
    log::info!("Exported {} rows to {}", table.len(), target.display());
    Ok(target)
}
