use super::Result;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read as ioRead};
use std::path::Path;

fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".gzip")
}

pub fn open_mlst_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(format!("Invalid gzip header: {}", path.to_string_lossy()))
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

/// Headerless tab-delimited reader over mlst output.
///
/// With `flexible` unset, a record whose width differs from the first one is
/// reported as an error by the reader.
pub fn tsv_reader<R: ioRead>(reader: R, flexible: bool) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(flexible)
        .from_reader(reader)
}

/// Zero-length files are reported as empty before any parsing is attempted.
pub fn is_empty_file(path: &Path) -> Result<bool> {
    let metadata =
        std::fs::metadata(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(metadata.len() == 0)
}
