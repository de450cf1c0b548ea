//! Runtime configuration read from the environment
//!
//! - `GITLET_LOG`: tracing filter directive (defaults to `warn`)
//! - `GITLET_COMMIT_DATE`: fixed commit timestamp, RFC 2822 or `%Y-%m-%d %H:%M:%S %z`
//! - `NO_PAGER`: when set, `log` output is never paged

use anyhow::Context;
use chrono::{DateTime, FixedOffset};

pub const LOG_ENV: &str = "GITLET_LOG";
pub const COMMIT_DATE_ENV: &str = "GITLET_COMMIT_DATE";
pub const NO_PAGER_ENV: &str = "NO_PAGER";

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_filter: String,
    pub commit_date: Option<DateTime<FixedOffset>>,
    pub no_pager: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            commit_date: None,
            no_pager: false,
        }
    }
}

impl Config {
    pub fn load_from_env() -> anyhow::Result<Self> {
        let log_filter =
            std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
        let commit_date = match std::env::var(COMMIT_DATE_ENV) {
            Ok(raw) => Some(
                parse_commit_date(&raw)
                    .with_context(|| format!("invalid {COMMIT_DATE_ENV}: {raw}"))?,
            ),
            Err(_) => None,
        };
        let no_pager = std::env::var_os(NO_PAGER_ENV).is_some();

        Ok(Config {
            log_filter,
            commit_date,
            no_pager,
        })
    }

    /// Timestamp for a new commit: the configured date, or now
    pub fn commit_timestamp(&self) -> DateTime<FixedOffset> {
        self.commit_date
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }
}

pub fn parse_commit_date(raw: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z"))
        .context("expected RFC 2822 or '%Y-%m-%d %H:%M:%S %z'")
}
