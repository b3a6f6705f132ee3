//! Delimited record files exchanged with the dataset loader and the external scorer.

pub mod csv;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("record {0} is not valid UTF-8")]
    Encoding(usize),

    #[error("{0} has no header row")]
    MissingHeader(String),

    #[error("column '{column}' not found in {path} (columns: {available})")]
    MissingColumn {
        column: String,
        path: String,
        available: String,
    },

    #[error("hypothesis rows ({hyps}) != reference lines ({refs})")]
    LengthMismatch { hyps: usize, refs: usize },
}

impl CorpusError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// One parallel-corpus row: its id and the sentence to expand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusRow {
    pub id: String,
    pub source: String,
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, CorpusError> {
    fs::read(path).map_err(|e| CorpusError::io(path, e))
}

fn column_index(header: &[String], column: &str, path: &Path) -> Result<usize, CorpusError> {
    header
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| CorpusError::MissingColumn {
            column: column.to_string(),
            path: path.display().to_string(),
            available: header.join(", "),
        })
}

/// Reads the id and source columns of a headed CSV file.
/// Short rows yield empty strings for missing cells.
pub fn read_corpus(
    path: &Path,
    id_col: &str,
    source_col: &str,
) -> Result<Vec<CorpusRow>, CorpusError> {
    let mut records = csv::read_records(&read_bytes(path)?, b',')?.into_iter();
    let header = records
        .next()
        .ok_or_else(|| CorpusError::MissingHeader(path.display().to_string()))?;
    let id_at = column_index(&header, id_col, path)?;
    let source_at = column_index(&header, source_col, path)?;

    let cell = |record: &[String], at: usize| record.get(at).cloned().unwrap_or_default();
    let rows: Vec<CorpusRow> = records
        .map(|record| CorpusRow {
            id: cell(&record, id_at),
            source: cell(&record, source_at),
        })
        .collect();
    debug!(path = %path.display(), rows = rows.len(), "corpus loaded");
    Ok(rows)
}

/// Plain lines, with `\r\n` endings accepted.
pub fn read_lines(path: &Path) -> Result<Vec<String>, CorpusError> {
    let text = fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
    Ok(text.lines().map(str::to_string).collect())
}

fn create(path: &Path) -> Result<BufWriter<File>, CorpusError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| CorpusError::io(path, e))
}

/// One CSV row of variants per input sentence.
pub fn write_variant_rows(path: &Path, rows: &[Vec<String>]) -> Result<(), CorpusError> {
    let mut out = create(path)?;
    for row in rows {
        csv::write_record(&mut out, row, b',').map_err(|e| CorpusError::io(path, e))?;
    }
    out.flush().map_err(|e| CorpusError::io(path, e))
}

/// `id, variant_1 … variant_K` with short rows padded by empty cells.
/// Returns K.
pub fn write_wide(path: &Path, rows: &[(String, Vec<String>)]) -> Result<usize, CorpusError> {
    let width = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    let mut out = create(path)?;

    let header: Vec<String> = std::iter::once("id".to_string())
        .chain((1..=width).map(|i| format!("variant_{i}")))
        .collect();
    csv::write_record(&mut out, &header, b',').map_err(|e| CorpusError::io(path, e))?;

    for (id, variants) in rows {
        let mut record = Vec::with_capacity(width + 1);
        record.push(id.as_str());
        record.extend(variants.iter().map(String::as_str));
        record.resize(width + 1, "");
        csv::write_record(&mut out, &record, b',').map_err(|e| CorpusError::io(path, e))?;
    }
    out.flush().map_err(|e| CorpusError::io(path, e))?;
    Ok(width)
}

/// Hypotheses from `id<TAB>hypothesis` rows, in file order.
pub fn read_hypotheses(path: &Path) -> Result<Vec<String>, CorpusError> {
    let records = csv::read_records(&read_bytes(path)?, b'\t')?;
    Ok(records
        .into_iter()
        .map(|mut r| {
            if r.len() > 1 {
                r.swap_remove(1)
            } else {
                String::new()
            }
        })
        .collect())
}

/// Fraction of positions where hypothesis and reference are byte-identical.
pub fn exact_match_rate(hyps: &[String], refs: &[String]) -> Result<f64, CorpusError> {
    if hyps.len() != refs.len() {
        return Err(CorpusError::LengthMismatch {
            hyps: hyps.len(),
            refs: refs.len(),
        });
    }
    if hyps.is_empty() {
        return Ok(0.0);
    }
    let matches = hyps.iter().zip(refs).filter(|(h, r)| h == r).count();
    Ok(matches as f64 / hyps.len() as f64)
}
