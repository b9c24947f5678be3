use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::print::PrintFormat;
use crate::render::DEFAULT_COUNTRY;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub default_country: String,
    pub spool_dir: Option<PathBuf>,
    pub print_format: PrintFormat,
    pub unique_numbers: bool,
    pub seed_examples: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_country: DEFAULT_COUNTRY.to_string(),
            spool_dir: None,
            print_format: PrintFormat::Text,
            unique_numbers: false,
            seed_examples: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let default_country = lookup("ZAGS_DEFAULT_COUNTRY")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());
        let spool_dir = lookup("ZAGS_SPOOL_DIR")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let print_format = lookup("ZAGS_PRINT_FORMAT")
            .unwrap_or_else(|| "text".to_string())
            .parse::<PrintFormat>()
            .context("ZAGS_PRINT_FORMAT must be `text` or `html`")?;
        let unique_numbers = parse_flag(lookup("ZAGS_UNIQUE_NUMBERS"), false)
            .context("ZAGS_UNIQUE_NUMBERS must be a boolean")?;
        let seed_examples = parse_flag(lookup("ZAGS_SEED_EXAMPLES"), true)
            .context("ZAGS_SEED_EXAMPLES must be a boolean")?;

        Ok(Self {
            default_country,
            spool_dir,
            print_format,
            unique_numbers,
            seed_examples,
        })
    }
}

fn parse_flag(raw: Option<String>, default: bool) -> Result<bool> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        "" => Ok(default),
        other => anyhow::bail!("invalid boolean `{other}`"),
    }
}
