//! Runtime settings from the environment (and `.env`).
//!
//! Command line flags take precedence; see `main.rs`.

use crate::processing::HostBits;
use crate::sites::DEFAULT_SITES_FILE;
use clap::ValueEnum;
use std::error::Error;

pub const ENV_SITES_FILE: &str = "SITES_FILE";
pub const ENV_STRICT: &str = "VIA6_STRICT";
pub const ENV_OUTPUT_FORMAT: &str = "OUTPUT_FORMAT";

/// How `routes` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    Manifest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub sites_file: String,
    pub host_bits: HostBits,
    pub output_format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            sites_file: DEFAULT_SITES_FILE.to_string(),
            host_bits: HostBits::Normalize,
            output_format: OutputFormat::Csv,
        }
    }
}

impl Settings {
    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Settings, Box<dyn Error>> {
        Settings::from_lookup(env_lookup)
    }

    /// Read settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Settings, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = Settings {
            sites_file: sites_file_from_lookup(&lookup),
            host_bits: host_bits_from_lookup(&lookup)?,
            output_format: output_format_from_lookup(&lookup)?,
        };
        log::debug!("Settings: {settings:?}");
        Ok(settings)
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Host bits policy from `VIA6_STRICT` alone.
pub fn host_bits_from_env() -> Result<HostBits, Box<dyn Error>> {
    host_bits_from_lookup(env_lookup)
}

pub fn sites_file_from_lookup<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(ENV_SITES_FILE)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_SITES_FILE.to_string())
}

pub fn host_bits_from_lookup<F>(lookup: F) -> Result<HostBits, Box<dyn Error>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(strict) = lookup(ENV_STRICT) else {
        return Ok(HostBits::Normalize);
    };
    let strict = parse_bool(&strict)
        .ok_or_else(|| format!("{ENV_STRICT}: expected true/false, got {strict:?}"))?;
    Ok(if strict {
        HostBits::Reject
    } else {
        HostBits::Normalize
    })
}

pub fn output_format_from_lookup<F>(lookup: F) -> Result<OutputFormat, Box<dyn Error>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(ENV_OUTPUT_FORMAT) {
        Some(format) => Ok(OutputFormat::from_str(format.trim(), true)
            .map_err(|e| format!("{ENV_OUTPUT_FORMAT}: {e}"))?),
        None => Ok(OutputFormat::default()),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
