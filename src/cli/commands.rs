//! CLI commands and argument parsing

use crate::config::DEFAULT_BASE_URL;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// TrustTrack API command-line client
#[derive(Parser, Debug)]
#[command(name = "trusttrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Dump every HTTP request and response to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// API key (overrides the stored credential)
    #[arg(long, global = true, env = "TRUSTTRACK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long, global = true, env = "TRUSTTRACK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the stored API key
    #[command(subcommand)]
    Auth(AuthCommand),

    /// List objects
    Objects,

    /// List objects with their last position
    ObjectsLastPosition,

    /// List object groups
    ObjectGroups,

    /// Get one object group
    ObjectGroup {
        /// External id of the group
        id: String,
    },

    /// List object coordinates for a time period
    Coordinates {
        /// Object id
        object_id: String,

        #[command(flatten)]
        range: TimeRange,

        /// Include geozone information
        #[arg(long)]
        include_geozones: bool,

        /// Include tire pressure information
        #[arg(long)]
        include_tire_parameters: bool,
    },

    /// List trips of an object
    Trips {
        /// Object id
        object_id: String,

        #[command(flatten)]
        range: TimeRange,
    },

    /// List refuel and drain events
    FuelEvents {
        #[command(flatten)]
        range: TimeRange,

        /// Only events of this object
        #[arg(long)]
        object_id: Option<String>,
    },

    /// List drivers
    Drivers,
}

/// `auth` subcommands
#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Store the `--api-key` value; read from stdin when omitted
    Login,

    /// Remove the stored API key
    Logout,

    /// Show where the key is stored and whether one is present
    Status,
}

impl Cli {
    /// Log filter from `RUST_LOG`, or `warn` (`debug` with `--verbose`) when unset
    pub fn log_filter(&self) -> EnvFilter {
        let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        log_filter(self.verbose, rust_log.as_deref())
    }
}

fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "warn" };
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

/// `--from` / `--to` window; `from` defaults to 24 hours ago, `to` to now
#[derive(Args, Debug, Clone, Default)]
pub struct TimeRange {
    /// Start time (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_time)]
    pub from: Option<DateTime<Utc>>,

    /// End time (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_time)]
    pub to: Option<DateTime<Utc>>,
}

/// Accept RFC 3339 timestamps or plain dates (midnight UTC)
pub fn parse_time(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Ok(time.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|time| time.and_utc())
        .ok_or_else(|| format!("invalid time '{value}', expected RFC 3339 or YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_time_formats() {
        assert_eq!(
            parse_time("2024-03-01T10:00:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time("2024-03-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
        assert!(parse_time("yesterday").is_err());
    }

    #[test]
    fn test_parse_cli() {
        let cli = Cli::try_parse_from([
            "trusttrack",
            "--debug",
            "trips",
            "veh-1",
            "--from",
            "2024-03-01",
        ])
        .unwrap();

        assert!(cli.debug);
        match cli.command {
            Commands::Trips { object_id, range } => {
                assert_eq!(object_id, "veh-1");
                assert!(range.from.is_some());
                assert!(range.to.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_log_filter_prefers_rust_log() {
        assert_eq!(log_filter(false, Some("debug")).to_string(), "debug");
        assert_eq!(
            log_filter(true, Some("trusttrack=trace")).to_string(),
            "trusttrack=trace"
        );
    }

    #[test]
    fn test_log_filter_defaults() {
        assert_eq!(log_filter(false, None).to_string(), "warn");
        assert_eq!(log_filter(true, None).to_string(), "debug");
        assert_eq!(log_filter(false, Some("")).to_string(), "warn");
    }

    #[test]
    fn test_parse_auth_login() {
        let cli = Cli::try_parse_from(["trusttrack", "auth", "login", "--api-key", "k"]).unwrap();
        assert!(matches!(cli.command, Commands::Auth(AuthCommand::Login)));
        assert_eq!(cli.api_key.as_deref(), Some("k"));
    }
}
