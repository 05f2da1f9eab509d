use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_creditcycle_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageSection,
    pub clock: ClockSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Directory holding the card slot (default: the creditcycle home).
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSection {
    /// IANA timezone used to decide what "today" is (default: system local time).
    pub timezone: Option<String>,
}

impl Config {
    pub fn data_dir(&self) -> Result<PathBuf> {
        match self.storage.dir.as_deref() {
            Some(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir)),
            _ => ensure_creditcycle_home(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_creditcycle_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// Write defaults to `p` unless a config is already there. Returns whether it wrote.
pub fn init_config_at(p: &Path) -> Result<bool> {
    if p.exists() {
        return Ok(false);
    }
    save_config_to(p, &Config::default())?;
    Ok(true)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if init_config_at(&p)? {
        println!("Wrote {}", p.display());
    } else {
        println!("Config already exists: {}", p.display());
    }
    Ok(())
}
