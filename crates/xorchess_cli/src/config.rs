//! Engine configuration: a TOML file plus command-line overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use xorchess_core::SearchLimits;

/// Read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "xorchess.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub search: SearchConfig,
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_filter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// 0 searches to `max_depth` regardless of time.
    pub move_time_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            move_time_ms: 1000,
        }
    }
}

impl EngineConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid engine configuration")
    }

    /// Load `path`, or [`DEFAULT_CONFIG_PATH`] if it exists, or the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_PATH);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn limits(&self) -> SearchLimits {
        let SearchConfig {
            max_depth,
            move_time_ms,
        } = self.search;
        match move_time_ms {
            0 => SearchLimits::depth(max_depth),
            ms => SearchLimits::depth_and_time(max_depth, Duration::from_millis(ms)),
        }
    }
}

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub depth: Option<u8>,
    pub time_ms: Option<u64>,
    pub help: bool,
}

impl CliArgs {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut out = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .with_context(|| format!("{flag} needs a value"))
            };
            match arg.as_str() {
                "--config" | "-c" => out.config = Some(PathBuf::from(value(arg)?)),
                "--depth" | "-d" => {
                    let raw = value(arg)?;
                    out.depth = Some(raw.parse().with_context(|| format!("bad depth {raw:?}"))?);
                }
                "--time" | "-t" => {
                    let raw = value(arg)?;
                    out.time_ms = Some(raw.parse().with_context(|| format!("bad time {raw:?}"))?);
                }
                "--help" | "-h" => out.help = true,
                other => bail!("unknown argument {other:?}"),
            }
        }
        Ok(out)
    }

    /// Flags win over the file.
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(depth) = self.depth {
            config.search.max_depth = depth;
        }
        if let Some(ms) = self.time_ms {
            config.search.move_time_ms = ms;
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
