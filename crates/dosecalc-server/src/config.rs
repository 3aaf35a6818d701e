//! Server configuration loaded from environment variables.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use dosecalc_core::constants::{DEFAULT_TZ_NAME, DEFAULT_TZ_OFFSET_HOURS};

use crate::clock::FixedOffsetClock;

const DEFAULT_PORT: &str = "5001";

#[derive(Clone, Debug)]
pub struct Config {
    /// Address to bind the HTTP server.
    pub bind_addr: String,
    /// File holding the last submitted form.
    pub data_file: PathBuf,
    /// Whether submitted forms are saved to `data_file`.
    pub persist: bool,
    /// Zone label reported by the current-time endpoint.
    pub tz_name: String,
    /// UTC offset of `tz_name`, in whole hours.
    pub tz_offset_hours: i32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = match lookup("DOSECALC_BIND_ADDR") {
            Some(addr) => addr,
            None => {
                let port = lookup("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
                let port: u16 = port
                    .trim()
                    .parse()
                    .with_context(|| format!("PORT must be a port number, got {port:?}"))?;
                format!("0.0.0.0:{port}")
            }
        };

        let data_file = lookup("DOSECALC_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("dosecalc")
                    .join("last_input.json")
            });

        let persist = match lookup("DOSECALC_PERSIST") {
            Some(v) => parse_bool(&v).context("DOSECALC_PERSIST must be true or false")?,
            None => true,
        };

        let tz_name = lookup("DOSECALC_TZ_NAME").unwrap_or_else(|| DEFAULT_TZ_NAME.to_string());

        let tz_offset_hours = match lookup("DOSECALC_TZ_OFFSET_HOURS") {
            Some(v) => v
                .trim()
                .parse::<i32>()
                .context("DOSECALC_TZ_OFFSET_HOURS must be an integer")?,
            None => DEFAULT_TZ_OFFSET_HOURS,
        };
        if !(-12..=14).contains(&tz_offset_hours) {
            bail!("DOSECALC_TZ_OFFSET_HOURS out of range (-12..=14): {tz_offset_hours}");
        }

        Ok(Config {
            bind_addr,
            data_file,
            persist,
            tz_name,
            tz_offset_hours,
        })
    }

    /// Clock for the configured zone.
    pub fn clock(&self) -> FixedOffsetClock {
        // Range-checked in `from_lookup`.
        FixedOffsetClock::from_hours(self.tz_offset_hours, self.tz_name.clone())
            .unwrap_or_else(FixedOffsetClock::utc)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid boolean {other:?}"),
    }
}
