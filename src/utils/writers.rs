use super::Result;
use std::fs::File;
use std::path::Path;

pub type TsvWriter = csv::Writer<File>;

/// Creates the tab-delimited writer for `path` and hands it to `f`, flushing
/// once `f` has written all rows.
pub fn create_writer<T, F>(path: &Path, f: F) -> Result<T>
where
    F: FnOnce(&mut TsvWriter) -> Result<T>,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
    let value = f(&mut writer)?;
    writer
        .flush()
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    Ok(value)
}

pub fn write_row<I, S>(writer: &mut TsvWriter, fields: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    writer.write_record(fields).map_err(|e| e.to_string())
}
