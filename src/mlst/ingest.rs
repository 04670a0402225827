use crate::mlst::table::{RawTable, ID_COLUMN_COUNT};
use crate::utils::{is_empty_file, open_mlst_reader, tsv_reader, Result};
use std::path::{Path, PathBuf};

/// Result of checking one per-sample mlst file.
#[derive(Debug, PartialEq)]
enum FileCheck {
    Accepted(Vec<String>),
    Empty,
    Dimensions { rows: usize, cols: usize },
    Unreadable(String),
}

/// Reads per-sample mlst files, keeping those holding exactly one row of
/// `nr_loci + 3` fields.
///
/// Empty, badly shaped and undecodable files are skipped with a warning. A
/// file that cannot be found is fatal, as is having no file survive.
pub fn read_mlst_files(mlst_files: &[PathBuf], nr_loci: usize) -> Result<RawTable> {
    let nr_cols = nr_loci + ID_COLUMN_COUNT;
    let mut rows = Vec::with_capacity(mlst_files.len());
    for path in mlst_files {
        match check_mlst_file(path, nr_cols)? {
            FileCheck::Accepted(row) => {
                log::debug!("Accepted {}", path.display());
                rows.push(row);
            }
            FileCheck::Empty => {
                log::warn!("{} is an empty file. Skipping...", path.display());
            }
            FileCheck::Dimensions { rows, cols } => {
                log::warn!(
                    "{} did not have expected dimensions (1 x {}, found {} x {}). Skipping...",
                    path.display(),
                    nr_cols,
                    rows,
                    cols
                );
            }
            FileCheck::Unreadable(e) => {
                log::warn!("{} could not be read ({}). Skipping...", path.display(), e);
            }
        }
    }
    let table = RawTable::concat(rows)?;
    log::info!("Combined {} files", table.len());
    Ok(table)
}

fn check_mlst_file(path: &Path, nr_cols: usize) -> Result<FileCheck> {
    if is_empty_file(path)? {
        return Ok(FileCheck::Empty);
    }
    let reader = match open_mlst_reader(path) {
        Ok(reader) => reader,
        Err(e) => return Ok(FileCheck::Unreadable(e)),
    };
    let mut reader = tsv_reader(reader, true);
    let mut rows = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect::<Vec<_>>()),
            Err(e) => return Ok(FileCheck::Unreadable(e.to_string())),
        }
    }
    match rows.len() {
        0 => Ok(FileCheck::Empty),
        1 if rows[0].len() == nr_cols => Ok(FileCheck::Accepted(rows.remove(0))),
        n => Ok(FileCheck::Dimensions {
            rows: n,
            cols: rows.iter().map(Vec::len).max().unwrap_or(0),
        }),
    }
}

/// Reads a concatenated mlst summary verbatim.
///
/// No per-row checks beyond rectangularity: a row wider or narrower than the
/// first is a parse error.
pub fn read_mlst_summary(mlst_summary: &Path) -> Result<RawTable> {
    let mut reader = tsv_reader(open_mlst_reader(mlst_summary)?, false);
    let mut rows = Vec::new();
    for (line_number, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            format!(
                "Error at {} line {}: {}",
                mlst_summary.display(),
                line_number + 1,
                e
            )
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    let table = RawTable::concat(rows)?;
    log::info!(
        "Read {} records from {}",
        table.len(),
        mlst_summary.display()
    );
    Ok(table)
}
