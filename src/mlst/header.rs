use crate::mlst::table::{
    Header, RawTable, Record, Table, FILE_COLUMN, ID_COLUMN_COUNT, SCHEME_COLUMN, ST_COLUMN,
    UNTYPED,
};
use crate::utils::Result;

/// Gene symbol of a locus designation such as `adk(10)`.
pub fn gene_name(designation: &str) -> &str {
    designation.split('(').next().unwrap_or(designation)
}

/// Names the columns of `raw` from its first row and converts it to a
/// [`Table`].
///
/// All rows are assumed to share the first row's locus order.
pub fn derive_header(raw: RawTable) -> Result<Table> {
    let first = raw
        .rows()
        .first()
        .ok_or("Cannot derive a header from an empty table")?;
    if first.len() <= ID_COLUMN_COUNT {
        return Err(format!(
            "First record has {} fields, no loci to name: {}",
            first.len(),
            first.join("\t")
        ));
    }

    let mut names = vec![
        FILE_COLUMN.to_string(),
        SCHEME_COLUMN.to_string(),
        ST_COLUMN.to_string(),
    ];
    for (locus, designation) in first[ID_COLUMN_COUNT..].iter().enumerate() {
        let name = gene_name(designation);
        if name == UNTYPED {
            log::warn!(
                "Locus {} of {} was not called, its column is named '{}'",
                locus + 1,
                first[0],
                name
            );
        }
        names.push(name.to_string());
    }
    log::debug!("Derived header: {}", names.join(", "));

    let header = Header::new(names)?;
    let records = raw.into_rows().into_iter().map(Record::new).collect();
    Table::new(header, records)
}

/// A called designation whose gene disagrees with the header.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutMismatch {
    pub file: String,
    pub expected: String,
    pub found: String,
}

/// Compares each called designation's gene with its column name.
///
/// Uncalled loci carry no gene and are not compared.
pub fn check_locus_layout(table: &Table) -> Vec<LayoutMismatch> {
    let loci = table.header().loci();
    let mut mismatches = Vec::new();
    for record in table.records() {
        for (expected, designation) in loci.iter().zip(record.designations()) {
            if !designation.contains('(') || expected == UNTYPED {
                continue;
            }
            let found = gene_name(designation);
            if found != expected {
                mismatches.push(LayoutMismatch {
                    file: record.file().to_string(),
                    expected: expected.clone(),
                    found: found.to_string(),
                });
            }
        }
    }
    mismatches
}
