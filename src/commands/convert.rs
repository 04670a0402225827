use crate::cli::Cli;
use crate::mlst::{
    check_locus_layout, derive_header, partition_by_alleles, partition_by_scheme,
    read_mlst_files, read_mlst_summary, select_scheme, write_failed, write_mismatched,
    write_profiles, FailedTable, ProfileTable, RawTable, SchemeSelection, Table,
};
use crate::utils::{percentage, Result};
use std::time;

/// The three disjoint outputs of one run.
#[derive(Debug)]
pub struct Partitions {
    pub selection: SchemeSelection,
    pub clean: ProfileTable,
    pub mismatched: Table,
    pub failed: FailedTable,
}

impl Partitions {
    /// Samples without a scheme, present in none of the outputs.
    pub fn dropped(&self) -> usize {
        self.selection.total - self.clean.len() - self.mismatched.len() - self.failed.len()
    }
}

/// Runs header derivation, scheme selection and both partitioning steps
/// over the ingested rows.
pub fn partition(raw: RawTable, scheme: Option<&str>) -> Result<Partitions> {
    let table = derive_header(raw)?;
    let selection = select_scheme(&table, scheme)?;
    log::info!(
        "Selected scheme {} ({} of {} samples)",
        selection.scheme,
        selection.count,
        selection.total
    );

    let (matched, mismatched) = partition_by_scheme(&table, &selection.scheme);
    for mismatch in check_locus_layout(&matched) {
        log::warn!(
            "{}: found locus {} in the column of {}, loci may be out of order",
            mismatch.file,
            mismatch.found,
            mismatch.expected
        );
    }

    let (clean, failed) = partition_by_alleles(&matched);
    Ok(Partitions {
        selection,
        clean,
        mismatched,
        failed,
    })
}

pub fn convert(args: &Cli) -> Result<()> {
    let start_timer = time::Instant::now();

    let raw = match (&args.mlst_files, &args.mlst_summary) {
        (Some(files), None) => read_mlst_files(files, args.nr_loci)?,
        (None, Some(summary)) => read_mlst_summary(summary)?,
        _ => return Err("Need to set exactly one of either --mlst-files or --mlst-summary".into()),
    };

    let partitions = partition(raw, args.scheme.as_deref())?;
    log_summary(&partitions);

    write_profiles(&args.out, &partitions.clean, args.include_filename)?;
    if let Some(path) = &args.other_scheme_out {
        write_mismatched(path, &partitions.mismatched)?;
    }
    if let Some(path) = &args.failed_out {
        write_failed(path, &partitions.failed)?;
    }

    log::info!("Total execution time: {:.2?}", start_timer.elapsed());
    Ok(())
}

fn log_summary(partitions: &Partitions) {
    let total = partitions.selection.total;
    log::info!(
        "Samples: {} complete ({:.2}%), {} failed typing ({:.2}%), {} other scheme ({:.2}%), {} untyped ({:.2}%)",
        partitions.clean.len(),
        percentage(partitions.clean.len(), total),
        partitions.failed.len(),
        percentage(partitions.failed.len(), total),
        partitions.mismatched.len(),
        percentage(partitions.mismatched.len(), total),
        partitions.dropped(),
        percentage(partitions.dropped(), total)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mlst::ingest::tests::{mlst_line, write_file};
    use clap::Parser;
    use std::path::Path;

    const ALLELES: [&str; 7] = ["10", "11", "4", "8", "8", "8", "2"];

    fn raw(lines: &[String]) -> RawTable {
        RawTable::concat(
            lines
                .iter()
                .map(|l| l.split('\t').map(str::to_string).collect())
                .collect(),
        )
        .unwrap()
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mlst2phyloviz").chain(args.iter().copied())).unwrap()
    }

    fn path_str(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[test]
    fn test_partitions_are_disjoint_and_cover_matched() {
        let mut novel = ALLELES;
        novel[2] = "~4";
        let partitions = partition(
            raw(&[
                mlst_line("a.fa", "ecoli", "10", &ALLELES),
                mlst_line("b.fa", "ecoli", "-", &ALLELES),
                mlst_line("c.fa", "ecoli", "-", &novel),
                mlst_line("d.fa", "senterica", "11", &ALLELES),
                mlst_line("e.fa", "-", "-", &["-"; 7]),
                mlst_line("f.fa", "ecoli", "131", &ALLELES),
            ]),
            None,
        )
        .unwrap();

        assert_eq!(partitions.selection.scheme, "ecoli");
        assert_eq!(partitions.clean.len(), 2);
        assert_eq!(partitions.failed.len(), 2);
        assert_eq!(partitions.mismatched.len(), 1);
        assert_eq!(partitions.dropped(), 1);
        assert_eq!(partitions.mismatched.records()[0].file(), "d.fa");
        assert!(partitions
            .mismatched
            .records()
            .iter()
            .all(|r| r.scheme() != "-"));
        assert_eq!(partitions.failed.table().records()[1].designations()[2], "gyrB(~4)");
    }

    #[test]
    fn test_round_trip_allele_ids() {
        let partitions = partition(raw(&[mlst_line("a.fa", "ecoli", "10", &ALLELES)]), None).unwrap();
        let expected: Vec<i32> = ALLELES.iter().map(|a| a.parse().unwrap()).collect();
        assert_eq!(partitions.clean.profiles()[0].alleles, expected);
    }

    #[test]
    fn test_explicit_scheme_absent() {
        let result = partition(
            raw(&[mlst_line("a.fa", "ecoli", "10", &ALLELES)]),
            Some("saureus"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_convert_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let files = [
            write_file(dir.path(), "1.tsv", &mlst_line("1.fa", "scheme1", "10", &ALLELES)),
            write_file(dir.path(), "2.tsv", &mlst_line("2.fa", "scheme1", "12", &ALLELES)),
            write_file(dir.path(), "3.tsv", &mlst_line("3.fa", "scheme2", "5", &ALLELES)),
        ];
        let out = dir.path().join("profiles.tsv");
        let other = dir.path().join("other.tsv");
        let failed = dir.path().join("failed.tsv");

        let args = cli(&[
            "--mlst-files",
            path_str(&files[0]),
            path_str(&files[1]),
            path_str(&files[2]),
            "--out",
            path_str(&out),
            "--other-scheme-out",
            path_str(&other),
            "--failed-out",
            path_str(&failed),
        ]);
        convert(&args).unwrap();

        let profiles = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = profiles.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ST\tadk\tfumC\tgyrB\ticd\tmdh\tpurA\trecA");
        assert_eq!(lines[1], "10\t10\t11\t4\t8\t8\t8\t2");
        assert_eq!(lines[2], "12\t10\t11\t4\t8\t8\t8\t2");

        let other = std::fs::read_to_string(&other).unwrap();
        assert_eq!(other.lines().count(), 2);
        assert!(other.lines().nth(1).unwrap().starts_with("3.fa\tscheme2\t5\tadk(10)"));

        let failed = std::fs::read_to_string(&failed).unwrap();
        assert_eq!(failed.lines().count(), 1);
    }

    #[test]
    fn test_convert_three_files_selection_warns() {
        let partitions = partition(
            raw(&[
                mlst_line("1.fa", "scheme1", "10", &ALLELES),
                mlst_line("2.fa", "scheme1", "10", &ALLELES),
                mlst_line("3.fa", "scheme2", "10", &ALLELES),
            ]),
            None,
        )
        .unwrap();
        assert_eq!(partitions.selection.scheme, "scheme1");
        let warning = partitions.selection.warning().unwrap();
        assert!(warning.contains("scheme1"));
        assert!(warning.contains("66.67%"));
        assert_eq!(partitions.clean.len(), 2);
    }

    #[test]
    fn test_convert_summary_with_ids_skips_optional_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let summary = write_file(
            dir.path(),
            "summary.tsv",
            &format!(
                "{}\n{}\n",
                mlst_line("a.fa", "ecoli", "10", &ALLELES),
                mlst_line("b.fa", "ecoli", "-", &ALLELES)
            ),
        );
        let out = dir.path().join("profiles.tsv");
        let args = cli(&[
            "--mlst-summary",
            path_str(&summary),
            "--out",
            path_str(&out),
            "--include-filename",
        ]);
        convert(&args).unwrap();

        let profiles = std::fs::read_to_string(&out).unwrap();
        assert!(profiles.starts_with("file\tscheme\tST\tadk"));
        assert_eq!(profiles.lines().count(), 2);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_convert_without_usable_files() {
        let dir = tempfile::tempdir().unwrap();
        let empty = write_file(dir.path(), "empty.tsv", "");
        let malformed = write_file(dir.path(), "short.tsv", "a.fa\tecoli\t10\tadk(1)\n");
        let out = dir.path().join("profiles.tsv");
        let args = cli(&[
            "--mlst-files",
            path_str(&empty),
            path_str(&malformed),
            "--out",
            path_str(&out),
        ]);
        assert!(convert(&args).is_err());
        assert!(!out.exists());
    }
}
