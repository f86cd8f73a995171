use std::path::PathBuf;

use awl_provider_neuss::BASE_URL;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "awl")]
#[command(about = "Next waste collection dates for an address in Neuss", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Command>,

    /// Path to the configuration file [default: awl.conf next to the executable]
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Base URL of the AWL calendar API
    #[arg(long, env = "AWL_API_URL", default_value = BASE_URL, global = true)]
    pub(crate) api_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    pub(crate) log_level: String,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Show the next pickup date (default)
    Next {
        /// Only consider this bin (blau, braun, gelb, grau, pink)
        #[arg(short, long)]
        bin: Option<String>,
    },

    /// List collection dates of the configured address
    Schedule {
        /// Start month, 1-12 [default: current month]
        #[arg(short, long)]
        month: Option<String>,

        /// Bin to ask the API for
        #[arg(short, long)]
        bin: Option<String>,

        /// Fetch the full year instead of three months
        #[arg(long)]
        year: bool,
    },

    /// Search the street directory for codes to put into the configuration
    Streets {
        /// Part of the street name, case sensitive
        pattern: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Self::Next { bin: None }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Command};

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn next_is_the_default_command() {
        let cli = Cli::try_parse_from(["awl"]).expect("parses");
        assert!(
            matches!(cli.command.unwrap_or_default(), Command::Next { bin: None }),
            "default command"
        );
    }

    #[test]
    fn schedule_arguments() {
        let cli = Cli::try_parse_from(["awl", "schedule", "--month", "5", "--year", "-c", "x.conf"])
            .expect("parses");
        let Some(Command::Schedule { month, bin, year }) = cli.command else {
            unreachable!("schedule command expected");
        };
        assert_eq!(month.as_deref(), Some("5"), "month");
        assert_eq!(bin, None, "bin");
        assert!(year, "full year");
        assert_eq!(cli.config.as_deref().and_then(|path| path.to_str()), Some("x.conf"), "config");
    }

    #[test]
    fn streets_pattern_is_optional() {
        let cli = Cli::try_parse_from(["awl", "streets", "Berg"]).expect("parses");
        assert!(
            matches!(cli.command, Some(Command::Streets { pattern: Some(ref pattern) }) if pattern == "Berg"),
            "pattern"
        );
    }
}
