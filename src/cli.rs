//! Command line arguments and logging setup shared by the binaries.

use clap::{ArgAction, CommandFactory, Parser};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "concord_to_newick",
          version,
          about = "Convert an IQ-TREE Nexus concordance factor tree to Newick",
          long_about = None,
          )]
pub struct RelabelArgs {
    #[clap(short = 't')]
    #[clap(long = "tree")]
    #[clap(help = "The IQ-TREE Nexus file to convert")]
    #[clap(value_name = "TREE_FILE")]
    pub tree_file: Option<PathBuf>,

    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(help = "Prefix of the output files <PREFIX>_scf.tre and <PREFIX>_gcf.tre")]
    #[clap(value_name = "PREFIX")]
    #[clap(default_value = "output")]
    #[arg(value_parser = check_prefix_path)]
    pub output_prefix: String,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Parser, Debug)]
#[command(name = "collate_lengths",
          version,
          about = "Collate HybPiper locus length summary files into one table",
          long_about = None,
          )]
pub struct CollateArgs {
    #[clap(help = "The length summary files, one per sample")]
    #[clap(value_name = "LEN_FILES")]
    pub len_files: Vec<PathBuf>,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "The output file to create")]
    #[clap(value_name = "OUT_FILE")]
    #[clap(default_value = "combined_lengths.tsv")]
    #[arg(value_parser = check_prefix_path)]
    pub out_file: String,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

/// Initializes the logger; `-v` raises the level from warn to info, `-vv` to debug.
pub fn init_verbose(verbosity: u8) {
    let filter_level: LevelFilter = match verbosity {
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

/// Parses the arguments of `P`, printing the help to stderr and exiting
/// with status 1 when no arguments are given at all.
pub fn parse_or_usage<P: Parser>() -> P {
    if std::env::args_os().len() <= 1 {
        usage_and_exit::<P>();
    }
    P::parse()
}

/// Prints the help of `P` to stderr and exits with status 1.
pub fn usage_and_exit<P: CommandFactory>() -> ! {
    let _ = P::command().write_help(&mut std::io::stderr());
    std::process::exit(1);
}

/// Reports a fatal error and exits with status 1.
///
/// The error goes through the logger when it emits errors and straight to
/// stderr otherwise, so it is never silenced.
pub fn handle_error_and_exit(err: impl std::fmt::Display) -> ! {
    if log::log_enabled!(Level::Error) {
        log::error!("{}", err);
    } else {
        eprintln!("Error: {}", err);
    }
    std::process::exit(1);
}

fn check_prefix_path(s: &str) -> Result<String, String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent()
        && !parent_dir.as_os_str().is_empty()
        && !parent_dir.exists()
    {
        return Err(format!("Path does not exist: {}", parent_dir.display()));
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relabel_defaults() {
        let args = RelabelArgs::try_parse_from(["concord_to_newick", "-t", "cf.tree.nex"]).unwrap();
        assert_eq!(args.tree_file, Some(PathBuf::from("cf.tree.nex")));
        assert_eq!(args.output_prefix, "output");
        assert_eq!(args.verbosity, 0);
    }

    #[test]
    fn test_collate_positionals_and_verbosity() {
        let args =
            CollateArgs::try_parse_from(["collate_lengths", "-vv", "a.txt", "b.txt", "-o", "out.tsv"])
                .unwrap();
        assert_eq!(args.len_files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert_eq!(args.out_file, "out.tsv");
        assert_eq!(args.verbosity, 2);
    }

    #[test]
    fn test_prefix_in_missing_directory_is_rejected() {
        let result = RelabelArgs::try_parse_from([
            "concord_to_newick",
            "-t",
            "x.nex",
            "-o",
            "/definitely/not/here/out",
        ]);
        assert!(result.is_err());
    }
}
