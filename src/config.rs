// Command-line configuration.
// Parses flags into the settings used to build the process context.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::classifier::FilterConfig;
use crate::context::QueryConfig;
use crate::github::Reason;
use crate::github::client::GITHUB_API_BASE;

/// Longest accepted lookback window, about a century.
pub const MAX_LOOKBACK_DAYS: u32 = 36_500;

/// Desktop notifications for the GitHub notifications you care about.
#[derive(Debug, Parser)]
#[command(name = "gh-focus", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub watch: WatchArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Watch notifications until quit (default)
    Watch,
    /// Check notifications once and exit
    Check,
    /// Save the GitHub personal access token
    SetToken {
        /// Personal access token with the `notifications` scope
        token: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct WatchArgs {
    /// Initial seconds between checks; GitHub may ask for longer
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Only fetch notifications updated in the last N days (0 for all)
    #[arg(
        long,
        default_value_t = 4,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_LOOKBACK_DAYS))
    )]
    pub lookback_days: u32,

    /// Include notifications you are not participating in
    #[arg(long)]
    pub all: bool,

    /// Reasons worth a desktop notification (repeatable)
    #[arg(long = "reason", value_name = "REASON", value_parser = parse_reason)]
    pub reasons: Vec<Reason>,

    /// Ignore comment notifications on anything but pull requests
    #[arg(long)]
    pub comments_only_on_prs: bool,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = GITHUB_API_BASE)]
    pub api_base: String,

    /// Access token; overrides the saved preference
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Parse a notification reason name.
pub fn parse_reason(value: &str) -> Result<Reason, String> {
    let reason = Reason::INTERESTING
        .iter()
        .copied()
        .find(|reason| reason.as_str() == value.trim());
    reason.ok_or_else(|| {
        let known: Vec<&str> = Reason::INTERESTING.iter().map(Reason::as_str).collect();
        format!("unknown reason '{}' (expected one of: {})", value, known.join(", "))
    })
}

/// Settings for one run, derived from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub poll_interval: Duration,
    pub api_base: String,
    pub filter: FilterConfig,
    pub query: QueryConfig,
    pub token: Option<String>,
}

impl From<&WatchArgs> for Settings {
    fn from(args: &WatchArgs) -> Self {
        let mut filter = FilterConfig {
            comments_only_on_prs: args.comments_only_on_prs,
            ..FilterConfig::default()
        };
        if !args.reasons.is_empty() {
            filter.interesting = args.reasons.clone();
        }

        let lookback = (args.lookback_days > 0)
            .then(|| chrono::Duration::days(i64::from(args.lookback_days)));

        Self {
            poll_interval: Duration::from_secs(args.interval),
            api_base: args.api_base.clone(),
            filter,
            query: QueryConfig {
                participating: !args.all,
                lookback,
            },
            token: args.token.clone(),
        }
    }
}
