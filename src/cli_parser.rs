use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::bugreport::DUMP_OF_SERVICE_USAGESTATS;
use crate::usagestats::SortKey;

/// Extracts app usage history from the usagestats dump of an Android bugreport
#[derive(Parser, Debug)]
#[command(name = "usagestats", version)]
pub struct Cli {
    /// Bugreport file (.txt or .zip)
    pub file_path: Option<PathBuf>,

    /// Read the input from stdin instead of a file
    #[arg(long, action, conflicts_with = "file_path")]
    pub stdin: bool,

    /// Input is a bare usagestats dump, not a full bugreport
    #[arg(long, action)]
    pub raw: bool,

    /// Output format
    #[arg(value_enum, short, long, default_value = "text")]
    pub format: Format,

    /// Directory the csv files are written to
    #[arg(long, default_value = ".")]
    pub csv_dir: PathBuf,

    /// Default sort column of the summary table
    #[arg(value_enum, short, long, default_value = "usage-time")]
    pub sort: SortKey,

    /// Name of the section holding the usage stats
    #[arg(long, default_value = DUMP_OF_SERVICE_USAGESTATS)]
    pub section: String,

    /// Browse the parsed records interactively
    #[arg(short, long, action)]
    pub repl: bool,

    /// More log output, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Csv,
}

impl Cli {
    /// Default log filter for the verbosity level.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["usagestats", "bugreport.zip"]).unwrap();
        assert_eq!(cli.file_path, Some(PathBuf::from("bugreport.zip")));
        assert_eq!(cli.format, Format::Text);
        assert_eq!(cli.sort, SortKey::UsageTime);
        assert_eq!(cli.section, "DUMP OF SERVICE usagestats");
        assert_eq!(cli.csv_dir, PathBuf::from("."));
        assert!(!cli.raw && !cli.repl && !cli.stdin);
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "usagestats",
            "--raw",
            "-f",
            "csv",
            "--csv-dir",
            "out",
            "-s",
            "launch-count",
            "-vv",
            "dump.txt",
        ])
        .unwrap();
        assert!(cli.raw);
        assert_eq!(cli.format, Format::Csv);
        assert_eq!(cli.csv_dir, PathBuf::from("out"));
        assert_eq!(cli.sort, SortKey::LaunchCount);
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn test_stdin_conflicts_with_file() {
        assert!(Cli::try_parse_from(["usagestats", "--stdin", "a.txt"]).is_err());
        assert!(Cli::try_parse_from(["usagestats", "--stdin"]).is_ok());
    }
}
