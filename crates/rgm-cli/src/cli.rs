//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "rgm",
    version,
    about = "Match publication authors to researcher profiles",
    long_about = "Match author names against a researcher roster.\n\n\
                  Normalizes names, scores them with token overlap plus name-part bonuses,\n\
                  and links the authors of a DOI (Crossref or DataCite) to roster entries."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Matcher configuration file (TOML). Defaults are used when omitted.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the normalized form of each name.
    Normalize(NormalizeArgs),

    /// Score two names against each other.
    Score(ScoreArgs),

    /// Find the roster entry that best matches a name.
    Match(MatchArgs),

    /// Fetch publication metadata for a DOI.
    Fetch(FetchArgs),

    /// Link the authors of a publication to roster entries.
    Link(LinkArgs),
}

#[derive(Args)]
pub struct NormalizeArgs {
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,
}

#[derive(Args)]
pub struct ScoreArgs {
    #[arg(value_name = "NAME_A")]
    pub name_a: String,

    #[arg(value_name = "NAME_B")]
    pub name_b: String,

    /// Show how the score was put together.
    #[arg(long = "explain")]
    pub explain: bool,
}

#[derive(Args)]
pub struct MatchArgs {
    /// Author name to look up.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Roster CSV with id,name[,affiliation,orcid] columns.
    #[arg(long = "roster", value_name = "CSV")]
    pub roster: PathBuf,

    /// Minimum score (exclusive) for a confident match.
    #[arg(long = "threshold", value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Number of ranked candidates to show.
    #[arg(long = "top", value_name = "N", default_value_t = 5)]
    pub top: usize,
}

#[derive(Args)]
pub struct RegistryArgs {
    /// Contact e-mail sent to the registries (Crossref polite pool).
    #[arg(long = "mailto", value_name = "EMAIL")]
    pub mailto: Option<String>,

    /// Request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,
}

#[derive(Args)]
pub struct FetchArgs {
    /// DOI, `doi:` reference or doi.org URL.
    #[arg(value_name = "DOI")]
    pub doi: String,

    /// Print the record as JSON.
    #[arg(long = "json")]
    pub json: bool,

    #[command(flatten)]
    pub registry: RegistryArgs,
}

#[derive(Args)]
#[command(group = clap::ArgGroup::new("source").required(true).args(["doi", "metadata"]))]
pub struct LinkArgs {
    /// Fetch the publication for this DOI.
    #[arg(long = "doi", value_name = "DOI")]
    pub doi: Option<String>,

    /// Read a saved Crossref or DataCite response instead of fetching.
    #[arg(long = "metadata", value_name = "JSON")]
    pub metadata: Option<PathBuf>,

    /// Roster CSV with id,name[,affiliation,orcid] columns.
    #[arg(long = "roster", value_name = "CSV")]
    pub roster: PathBuf,

    /// Minimum score (exclusive) for a name link.
    #[arg(long = "threshold", value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Print the link report as JSON.
    #[arg(long = "json")]
    pub json: bool,

    #[command(flatten)]
    pub registry: RegistryArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn link_requires_exactly_one_source() {
        assert!(Cli::try_parse_from(["rgm", "link", "--roster", "r.csv"]).is_err());
        assert!(
            Cli::try_parse_from([
                "rgm", "link", "--roster", "r.csv", "--doi", "10.1/x", "--metadata", "m.json"
            ])
            .is_err()
        );
        let cli = Cli::try_parse_from(["rgm", "link", "--roster", "r.csv", "--doi", "10.1/x"])
            .unwrap();
        assert!(matches!(cli.command, Command::Link(LinkArgs { doi: Some(_), .. })));
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["rgm", "score", "a", "b", "--explain", "--config", "m.toml"])
            .unwrap();
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("m.toml")));
        assert!(matches!(cli.command, Command::Score(ScoreArgs { explain: true, .. })));
    }
}
