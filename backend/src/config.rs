//! Server configuration from command-line flags, with environment fallbacks.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use chrono::FixedOffset;
use clap::Parser;

use crate::domain::DisplayZone;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "kakeibo",
    version,
    about = "Household budget calendar server",
    long_about = "Serves the expense and fixed-expense REST API together with \
                  calendar views that total spending per day and per month."
)]
pub struct Config {
    /// SQLite database URL, created on first start
    #[arg(long, env = "KAKEIBO_DATABASE_URL", default_value = "sqlite:kakeibo.db")]
    pub database_url: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "KAKEIBO_BIND", default_value = "127.0.0.1:3001")]
    pub bind: SocketAddr,

    /// Origin allowed to call the API from a browser
    #[arg(long, env = "KAKEIBO_CORS_ORIGIN", default_value = "http://localhost:5173")]
    pub cors_origin: String,

    /// Fixed display offset such as +09:00; the host's local zone when unset
    #[arg(long, env = "KAKEIBO_UTC_OFFSET", value_parser = parse_utc_offset, allow_hyphen_values = true)]
    pub utc_offset: Option<FixedOffset>,

    /// Directory of static client files served outside /api
    #[arg(long, env = "KAKEIBO_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// tracing filter directive, e.g. `info` or `kakeibo_backend=debug`
    #[arg(long, env = "KAKEIBO_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Config {
    pub fn display_zone(&self) -> DisplayZone {
        self.utc_offset.map_or(DisplayZone::Local, DisplayZone::Fixed)
    }

    pub fn cors_origin_header(&self) -> Result<HeaderValue> {
        self.cors_origin
            .parse::<HeaderValue>()
            .with_context(|| format!("Invalid CORS origin '{}'", self.cors_origin))
    }
}

/// Parse `Z`, `UTC`, `+09:00`, `+0900` or `+09` into an offset
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| "invalid offset".to_string());
    }

    let invalid = || format!("invalid UTC offset '{}', expected e.g. +09:00", raw);

    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'+') => (1, &raw[1..]),
        Some(b'-') => (-1, &raw[1..]),
        _ => return Err(invalid()),
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) || rest.matches(':').count() > 1 {
        return Err(invalid());
    }

    let (hours, minutes) = match digits.len() {
        2 => (&digits[..2], "0"),
        4 => (&digits[..2], &digits[2..]),
        _ => return Err(invalid()),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
