use crate::mlst::table::{FailedTable, ProfileTable, Table, ST_COLUMN};
use crate::utils::{create_writer, write_row, Result};
use std::path::Path;

/// Writes the allelic profiles. Without `include_ids` only the ST and loci
/// columns are kept, the layout PhyloViz expects.
pub fn write_profiles(path: &Path, profiles: &ProfileTable, include_ids: bool) -> Result<()> {
    create_writer(path, |writer| {
        let header = profiles.header();
        if include_ids {
            write_row(writer, header.names())?;
        } else {
            write_row(
                writer,
                std::iter::once(ST_COLUMN).chain(header.loci().iter().map(String::as_str)),
            )?;
        }
        for profile in profiles.profiles() {
            let mut fields = Vec::with_capacity(header.width());
            if include_ids {
                fields.push(profile.file.clone());
                fields.push(profile.scheme.clone());
            }
            fields.push(profile.st.clone());
            fields.extend(profile.alleles.iter().map(i32::to_string));
            write_row(writer, &fields)?;
        }
        Ok(())
    })?;
    log::info!(
        "Wrote {} allelic profiles to {}",
        profiles.len(),
        path.display()
    );
    Ok(())
}

/// Writes samples typed with another scheme, unvalidated.
pub fn write_mismatched(path: &Path, table: &Table) -> Result<()> {
    create_writer(path, |writer| {
        write_row(writer, table.header().names())?;
        for record in table.records() {
            write_row(writer, record.fields())?;
        }
        Ok(())
    })?;
    log::info!(
        "Wrote {} samples of other schemes to {}",
        table.len(),
        path.display()
    );
    Ok(())
}

/// Writes samples with failed allele calls or unresolved STs.
pub fn write_failed(path: &Path, failed: &FailedTable) -> Result<()> {
    create_writer(path, |writer| {
        write_row(writer, failed.table().header().names())?;
        for record in failed.table().records() {
            write_row(writer, failed.render(record))?;
        }
        Ok(())
    })?;
    log::info!(
        "Wrote {} samples with failed typing to {}",
        failed.len(),
        path.display()
    );
    Ok(())
}
