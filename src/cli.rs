//! Command-line interface.

use clap::Parser;
use tracing::level_filters::LevelFilter;

/// File that receives debug logs with `--save-debug-log`, relative to the working directory.
pub const DEBUG_LOG_FILE: &str = "chorus.log";

#[derive(Debug, Clone, Parser)]
#[command(name = "chorus", version, about = "Music server process supervisor")]
pub struct Cli {
    /// Less output (warning level)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// More output (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Save debug log to "./chorus.log"
    #[arg(long)]
    pub save_debug_log: bool,

    /// List current settings and exit
    #[arg(long)]
    pub list_settings: bool,
}

impl Cli {
    /// Console log level selected by `-q` / `-v`.
    pub fn verbosity(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::WARN
        } else if self.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_verbosity_is_info() {
        let cli = Cli::try_parse_from(["chorus"]).unwrap();
        assert_eq!(cli.verbosity(), LevelFilter::INFO);
        assert!(!cli.save_debug_log);
        assert!(!cli.list_settings);
    }

    #[test]
    fn test_quiet_and_verbose() {
        let quiet = Cli::try_parse_from(["chorus", "-q"]).unwrap();
        assert_eq!(quiet.verbosity(), LevelFilter::WARN);

        let verbose = Cli::try_parse_from(["chorus", "--verbose", "--save-debug-log"]).unwrap();
        assert_eq!(verbose.verbosity(), LevelFilter::DEBUG);
        assert!(verbose.save_debug_log);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["chorus", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_list_settings_flag() {
        let cli = Cli::try_parse_from(["chorus", "--list-settings"]).unwrap();
        assert!(cli.list_settings);
    }
}
