use crate::mlst::table::{
    AlleleCall, FailedTable, Profile, ProfileTable, Record, Table, UNTYPED,
};

/// Coerces a locus designation to an allele id.
///
/// `adk(10)` gives 10, a bare number is taken as is. Letters and
/// parentheses are dropped before parsing, anything else left over (`~` for
/// novel alleles, `?` for partial matches, `-` for no call) makes the call
/// missing, as does a negative id.
///
/// Only the text inside the parentheses is considered, so a gene symbol
/// holding digits does not leak into the id: `gyrB2(5)` gives 5, where
/// stripping letters from the whole designation would give 25.
pub fn coerce_allele(designation: &str) -> AlleleCall {
    let inner = match (designation.find('('), designation.rfind(')')) {
        (Some(open), Some(close)) if open < close => &designation[open + 1..close],
        _ => designation,
    };
    let digits: String = inner
        .chars()
        .filter(|c| !c.is_ascii_alphabetic() && *c != '(' && *c != ')')
        .collect();
    match digits.trim().parse::<i32>() {
        Ok(id) if id >= 0 => AlleleCall::Parsed(id),
        _ => AlleleCall::Missing,
    }
}

/// Allele calls of every locus of `record`, `None` if any is missing.
fn resolve_alleles(record: &Record) -> Option<Vec<i32>> {
    record
        .designations()
        .iter()
        .map(|d| coerce_allele(d).value())
        .collect()
}

/// Splits the samples of one scheme into complete profiles and failed
/// typings.
///
/// A sample is complete when its ST is known and every locus coerces to an
/// allele id. Failed samples keep their original designations.
pub fn partition_by_alleles(matched: &Table) -> (ProfileTable, FailedTable) {
    let mut profiles = Vec::with_capacity(matched.len());
    let mut failed = Vec::new();

    for record in matched.records() {
        let alleles = if record.st() == UNTYPED {
            None
        } else {
            resolve_alleles(record)
        };
        match alleles {
            Some(alleles) => profiles.push(Profile {
                file: record.file().to_string(),
                scheme: record.scheme().to_string(),
                st: record.st().to_string(),
                alleles,
            }),
            None => {
                log::debug!(
                    "{}: incomplete typing (ST {}, loci {})",
                    record.file(),
                    record.st(),
                    record.designations().join(" ")
                );
                failed.push(record.clone());
            }
        }
    }

    let clean = ProfileTable::new(matched.header().clone(), profiles);
    let failed = FailedTable::new(matched.with_records(failed));
    (clean, failed)
}
