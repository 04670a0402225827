use crate::mlst::table::{Table, SCHEME_COLUMN, UNTYPED};
use crate::utils::{percentage, Result};
use itertools::Itertools;
use std::collections::HashMap;

/// Below this share of samples the selected scheme is reported.
pub const MIN_SCHEME_PERCENTAGE: f64 = 75.0;

/// Number of samples per scheme, in first-seen order.
pub fn scheme_counts(table: &Table) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for scheme in table.column(SCHEME_COLUMN).into_iter().flatten() {
        match index.get(scheme) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(scheme, counts.len());
                counts.push((scheme.to_string(), 1));
            }
        }
    }
    counts
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemeSelection {
    pub scheme: String,
    pub count: usize,
    pub total: usize,
}

impl SchemeSelection {
    pub fn percentage(&self) -> f64 {
        percentage(self.count, self.total)
    }

    pub fn is_underrepresented(&self) -> bool {
        self.percentage() < MIN_SCHEME_PERCENTAGE
    }

    /// Warning reported for an underrepresented scheme.
    pub fn warning(&self) -> Option<String> {
        self.is_underrepresented().then(|| {
            format!(
                "The selected scheme {} applies to {:.2}% of the dataset",
                self.scheme,
                self.percentage()
            )
        })
    }
}

/// Picks the scheme to keep: `chosen` when given, otherwise the most common
/// one, ties going to the scheme seen first.
///
/// A chosen scheme absent from the table is an error. Logs a warning when the
/// selected scheme covers less than [`MIN_SCHEME_PERCENTAGE`] of the samples.
pub fn select_scheme(table: &Table, chosen: Option<&str>) -> Result<SchemeSelection> {
    let counts = scheme_counts(table);
    let total = table.len();

    let (scheme, count) = match chosen {
        Some(scheme) => counts
            .iter()
            .find(|(s, _)| s == scheme)
            .cloned()
            .ok_or_else(|| {
                format!(
                    "Scheme {} does not occur in the data (found: {})",
                    scheme,
                    counts.iter().map(|(s, n)| format!("{} x{}", s, n)).join(", ")
                )
            })?,
        None => counts
            .iter()
            .sorted_by(|a, b| b.1.cmp(&a.1))
            .next()
            .cloned()
            .ok_or("Cannot select a scheme from an empty table")?,
    };

    let selection = SchemeSelection {
        scheme,
        count,
        total,
    };
    if let Some(warning) = selection.warning() {
        log::warn!("{}", warning);
    }
    Ok(selection)
}

/// Splits `table` into samples typed with `scheme` and samples typed with
/// another scheme. Samples without a scheme only end up in the first table
/// when `scheme` is itself the untyped marker.
pub fn partition_by_scheme(table: &Table, scheme: &str) -> (Table, Table) {
    let matched = table.filter(|r| r.scheme() == scheme);
    let mismatched = table.filter(|r| r.scheme() != scheme && r.scheme() != UNTYPED);
    (matched, mismatched)
}
