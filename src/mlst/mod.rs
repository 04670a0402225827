pub mod alleles;
pub mod header;
pub mod ingest;
pub mod output;
pub mod scheme;
pub mod table;

pub use alleles::{coerce_allele, partition_by_alleles};
pub use header::{check_locus_layout, derive_header, gene_name, LayoutMismatch};
pub use ingest::{read_mlst_files, read_mlst_summary};
pub use output::{write_failed, write_mismatched, write_profiles};
pub use scheme::{partition_by_scheme, scheme_counts, select_scheme, SchemeSelection};
pub use table::{
    AlleleCall, FailedTable, Header, Profile, ProfileTable, RawTable, Record, Table, UNTYPED,
};
