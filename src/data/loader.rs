use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// How to treat the first data line of a spectrum file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Always drop the first line (files exported with column titles).
    Skip,
    /// Every line is data.
    NoHeader,
    /// Drop the first line only if neither of its first two fields is a number.
    #[default]
    Auto,
}

/// Load `(wavelength, count)` rows from a spectrum file.  Dispatch by extension.
///
/// Supported layouts:
/// * `.csv`  – comma-separated columns
/// * other   – tab- or whitespace-separated columns (`.txt`, `.dat`, `.asc`, …)
///
/// Only the first two columns are read; `#` lines and blank lines are skipped.
pub fn load_file(path: &Path, header: HeaderMode) -> Result<Vec<(f64, f64)>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let delimiter = match ext.as_str() {
        "csv" => b',',
        _ => b'\t',
    };

    let file = std::fs::File::open(path)
        .with_context(|| format!("opening spectrum file {}", path.display()))?;
    let rows = parse_rows(file, delimiter, header)
        .with_context(|| format!("parsing {}", path.display()))?;

    log::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Row parser
// ---------------------------------------------------------------------------

/// Parse two-column numeric text.
///
/// Fields are split on `delimiter` and then on any whitespace, so tab files
/// padded with spaces and plain space-separated files both work. Quotes are
/// only honoured for comma-separated input.
pub fn parse_rows<R: Read>(reader: R, delimiter: u8, header: HeaderMode) -> Result<Vec<(f64, f64)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .quoting(delimiter == b',')
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut first = true;

    for result in reader.records() {
        let record = result.context("reading spectrum row")?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let tokens: Vec<&str> = record.iter().flat_map(str::split_whitespace).collect();
        if tokens.is_empty() {
            continue;
        }

        if std::mem::take(&mut first) {
            let skip = match header {
                HeaderMode::Skip => true,
                HeaderMode::NoHeader => false,
                HeaderMode::Auto => looks_like_header(&tokens),
            };
            if skip {
                log::info!("Skipping header line {line}: {:?}", tokens);
                continue;
            }
        }

        if tokens.len() < 2 {
            bail!("Line {line}: expected two columns, found {}", tokens.len());
        }
        let wavelength = parse_number(tokens[0], line, "wavelength")?;
        let count = parse_number(tokens[1], line, "count")?;
        rows.push((wavelength, count));
    }

    Ok(rows)
}

/// A header has no number in its first two fields. A data line with one
/// typo still counts as data so the typo is reported.
fn looks_like_header(tokens: &[&str]) -> bool {
    tokens.iter().take(2).all(|t| t.parse::<f64>().is_err())
}

fn parse_number(tok: &str, line: u64, col: &str) -> Result<f64> {
    let value = tok
        .parse::<f64>()
        .with_context(|| format!("Line {line}, {col}: '{tok}' is not a number"))?;
    if !value.is_finite() {
        bail!("Line {line}, {col}: '{tok}' is not a finite number");
    }
    Ok(value)
}
