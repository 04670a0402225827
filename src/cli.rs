use crate::utils::Result;
use clap::{ArgAction, ArgGroup, Parser};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser, Debug)]
#[command(name = "mlst2phyloviz",
          version = &**FULL_VERSION,
          about = "Convert mlst output (github.com/tseemann/mlst) into allelic profiles for PhyloViz/goeBURST",
          long_about = "Convert mlst output (github.com/tseemann/mlst) into allelic profiles for PhyloViz/goeBURST. \
To ensure correct parsing, prefer separate mlst files (--mlst-files) together with the number of loci in the scheme (--loci).",
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
#[command(group(ArgGroup::new("input").required(true).multiple(false).args(["mlst_files", "mlst_summary"])))]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[clap(long = "mlst-files")]
    #[clap(help = "Output files from mlst, one sample per file")]
    #[clap(value_name = "MLST_FILES")]
    #[clap(num_args = 1..)]
    #[arg(value_parser = check_file_exists)]
    pub mlst_files: Option<Vec<PathBuf>>,

    #[clap(long = "mlst-summary")]
    #[clap(help = "Summary of mlst files, e.g. obtained through cat")]
    #[clap(value_name = "MLST_SUMMARY")]
    #[arg(value_parser = check_file_exists)]
    pub mlst_summary: Option<PathBuf>,

    #[clap(long = "scheme")]
    #[clap(help = "Scheme to parse results for [default: most common scheme]")]
    #[clap(value_name = "SCHEME")]
    #[arg(value_parser = check_scheme_nonempty)]
    pub scheme: Option<String>,

    #[clap(short = 'o')]
    #[clap(long = "out")]
    #[clap(help = "Allelic profiles for PhyloViz/goeBURST")]
    #[clap(value_name = "OUTPUT")]
    #[clap(default_value = "allelic_profiles.tsv")]
    #[arg(value_parser = check_output_path)]
    pub out: PathBuf,

    #[clap(long = "other-scheme-out")]
    #[clap(help = "Samples typed with a different scheme [default: not written]")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_output_path)]
    pub other_scheme_out: Option<PathBuf>,

    #[clap(long = "failed-out")]
    #[clap(help = "Samples with failed allele calls or novel STs [default: not written]")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_output_path)]
    pub failed_out: Option<PathBuf>,

    #[clap(long = "loci")]
    #[clap(help = "Number of loci in the scheme, used to check mlst files")]
    #[clap(value_name = "NUMBER_OF_LOCI")]
    #[clap(default_value = "7")]
    #[arg(value_parser = loci_in_range)]
    pub nr_loci: usize,

    #[clap(long = "include-filename")]
    #[clap(
        help = "Include file name and scheme in the profiles. The output is then no longer directly PhyloViz compatible"
    )]
    pub include_filename: bool,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_output_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(path.to_path_buf())
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn loci_in_range(s: &str) -> Result<usize> {
    let loci: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid number of loci", s))?;
    if loci >= 1 {
        Ok(loci)
    } else {
        Err("Number of loci must be at least 1".into())
    }
}

fn check_scheme_nonempty(s: &str) -> Result<String> {
    if s.trim().is_empty() {
        Err("Scheme cannot be an empty string".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_exactly_one_input() {
        assert!(Cli::try_parse_from(["mlst2phyloviz", "--loci", "7"]).is_err());

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.tsv");
        std::fs::File::create(&file).unwrap();
        let file = file.to_str().unwrap();
        assert!(
            Cli::try_parse_from(["mlst2phyloviz", "--mlst-files", file, "--mlst-summary", file])
                .is_err()
        );

        let cli = Cli::try_parse_from(["mlst2phyloviz", "--mlst-summary", file]).unwrap();
        assert_eq!(cli.mlst_summary.as_deref(), Some(Path::new(file)));
        assert!(cli.mlst_files.is_none());
    }

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.tsv");
        let b = dir.path().join("b.tsv");
        std::fs::File::create(&a).unwrap();
        std::fs::File::create(&b).unwrap();
        let cli = Cli::try_parse_from([
            "mlst2phyloviz",
            "--mlst-files",
            a.to_str().unwrap(),
            b.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(cli.mlst_files.as_ref().map(Vec::len), Some(2));
        assert_eq!(cli.nr_loci, 7);
        assert_eq!(cli.out, PathBuf::from("allelic_profiles.tsv"));
        assert!(cli.scheme.is_none());
        assert!(cli.other_scheme_out.is_none());
        assert!(cli.failed_out.is_none());
        assert!(!cli.include_filename);
    }

    #[test]
    fn test_missing_input_file() {
        assert!(
            Cli::try_parse_from(["mlst2phyloviz", "--mlst-summary", "/no/such/summary.tsv"])
                .is_err()
        );
    }

    #[test]
    fn test_loci_in_range() {
        assert_eq!(loci_in_range("7"), Ok(7));
        assert!(loci_in_range("0").is_err());
        assert!(loci_in_range("seven").is_err());
    }

    #[test]
    fn test_check_output_path() {
        assert!(check_output_path("profiles.tsv").is_ok());
        assert!(check_output_path("/no/such/dir/profiles.tsv").is_err());
    }
}
