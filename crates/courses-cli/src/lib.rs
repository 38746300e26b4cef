use chrono::NaiveDateTime;
use clap::{Args, ValueEnum};
use courses_browser::{DEFAULT_DEBUGGING_PORT, selectors::DEFAULT_BASE_URL};
use std::path::PathBuf;

pub mod commands;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// Account, site and browser options shared by every command that opens the shop
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Shop account e-mail
    #[arg(long, env = "COURSES_USER")]
    pub user: String,

    /// Shop account password
    #[arg(long, env = "COURSES_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Shop base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Path to the Chrome binary (auto-detected if omitted)
    #[arg(long)]
    pub chrome_path: Option<PathBuf>,

    /// Named Chrome profile under ~/.courses/profiles, keeps the login between runs
    #[arg(long)]
    pub profile: Option<String>,

    /// Use a temporary profile, even if --profile is given
    #[arg(long)]
    pub temp: bool,

    /// Run Chrome without a window
    #[arg(long)]
    pub headless: bool,

    /// Seconds to wait for a page element
    #[arg(long, default_value_t = 20)]
    pub timeout: u64,

    /// Chrome remote debugging port
    #[arg(long, default_value_t = DEFAULT_DEBUGGING_PORT)]
    pub port: u16,
}

/// Parse a local date and time such as `2026-10-22 09:00`
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value.trim(), format).ok())
        .ok_or_else(|| format!("expected a date like '2026-10-22 09:00', got '{}'", value))
}
