//! CLI argument parsing
//!
//! ```text
//! althea [--config-root DIR] [--log-dir DIR] [--json-logs] [--email EMAIL] [MODE]
//!
//! MODES:
//!   (none) | shell            Interactive shell
//!   profiles                  List profiles
//!   analyze <FILE> [--profile ID]
//!   define <TERM>
//!   chat <MESSAGE...> [--profile ID]
//!   search-url <TERM>         Print the external search URL (offline)
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Parsed CLI arguments
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "althea", version)]
#[command(about = "Terminal client for the Althea medical report service", long_about = None)]
pub struct Args {
    /// Directory holding config.toml (default: $ALTHEA_HOME, then ".")
    #[arg(long, value_name = "DIR")]
    pub config_root: Option<PathBuf>,

    /// Write logs to a daily file in DIR instead of stderr
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// JSON log lines
    #[arg(long)]
    pub json_logs: bool,

    /// Account email for one-shot modes (password from $ALTHEA_PASSWORD)
    #[arg(long, env = "ALTHEA_EMAIL")]
    pub email: Option<String>,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

/// CLI modes
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Mode {
    /// Interactive shell (default)
    Shell,

    /// List the account's profiles
    Profiles,

    /// Upload a report for analysis
    Analyze {
        file: PathBuf,
        /// Profile number or id (default: first profile)
        #[arg(long)]
        profile: Option<String>,
    },

    /// Look up a medical term
    Define {
        #[arg(required = true)]
        term: Vec<String>,
    },

    /// Send one chat message
    Chat {
        #[arg(required = true)]
        message: Vec<String>,
        /// Profile number or id (default: first profile)
        #[arg(long)]
        profile: Option<String>,
    },

    /// Print the external search URL for a term
    SearchUrl {
        #[arg(required = true)]
        term: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_no_mode_defaults_to_none() {
        let args = parse(&["althea"]);
        assert_eq!(args.mode, None);
        assert!(!args.json_logs);
    }

    #[test]
    fn test_global_options() {
        let args = parse(&["althea", "--config-root", "/tmp", "--json-logs", "profiles"]);
        assert_eq!(args.config_root, Some(PathBuf::from("/tmp")));
        assert!(args.json_logs);
        assert_eq!(args.mode, Some(Mode::Profiles));
    }

    #[test]
    fn test_analyze_with_profile() {
        let args = parse(&["althea", "analyze", "labs.pdf", "--profile", "2"]);
        assert_eq!(
            args.mode,
            Some(Mode::Analyze {
                file: PathBuf::from("labs.pdf"),
                profile: Some("2".to_string())
            })
        );
    }

    #[test]
    fn test_multi_word_values() {
        let args = parse(&["althea", "define", "Vitamin", "D"]);
        assert_eq!(
            args.mode,
            Some(Mode::Define {
                term: vec!["Vitamin".to_string(), "D".to_string()]
            })
        );
        let args = parse(&["althea", "search-url", "TSH"]);
        assert!(matches!(args.mode, Some(Mode::SearchUrl { .. })));
    }

    #[test]
    fn test_missing_required_value() {
        assert!(Args::try_parse_from(["althea", "chat"]).is_err());
        assert!(Args::try_parse_from(["althea", "analyze"]).is_err());
    }
}
