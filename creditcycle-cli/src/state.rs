use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$CREDITCYCLE_HOME`, else `~/.creditcycle`.
pub fn creditcycle_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("CREDITCYCLE_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".creditcycle"))
}

pub fn ensure_creditcycle_home() -> Result<PathBuf> {
    let dir = creditcycle_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
