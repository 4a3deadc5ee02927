use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default data directory: ~/.n1ght
pub fn get_n1ght_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".n1ght"))
}

/// Load a config file from an explicit path, then apply env overrides.
pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let cfg = read_config(path)?;
    finish(cfg, get_n1ght_data_dir().ok().as_deref())
}

/// `~/.n1ght/config.toml`, then `./n1ght.toml`, then built-in defaults.
pub fn load_default() -> anyhow::Result<AppConfig> {
    let data_dir = get_n1ght_data_dir()?;
    let candidates = [data_dir.join("config.toml"), PathBuf::from("n1ght.toml")];
    load_first(&candidates, &data_dir)
}

fn load_first(candidates: &[PathBuf], data_dir: &Path) -> anyhow::Result<AppConfig> {
    let cfg = match candidates.iter().find(|p| p.exists()) {
        Some(path) => read_config(path)?,
        None => AppConfig::default(),
    };
    finish(cfg, Some(data_dir))
}

fn read_config(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read config {}: {e}", path.display()))?;
    toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("parse config {}: {e}", path.display()))
}

fn finish(mut cfg: AppConfig, data_dir: Option<&Path>) -> anyhow::Result<AppConfig> {
    let unset = cfg
        .logging
        .directory
        .as_ref()
        .map(|s| s.trim().is_empty())
        .unwrap_or(true);
    if let (true, Some(dir)) = (unset, data_dir) {
        cfg.logging.directory = Some(dir.join("logs").to_string_lossy().to_string());
    }

    apply_env_overrides(&mut cfg)?;
    Ok(cfg)
}

// Environment variable overrides (Priority 0: highest below CLI flags)
fn apply_env_overrides(cfg: &mut AppConfig) -> anyhow::Result<()> {
    if let Ok(v) = std::env::var("N1GHT_CONCURRENT") {
        if !v.trim().is_empty() {
            cfg.executor.concurrency_enabled = parse_bool(&v)
                .ok_or_else(|| anyhow::anyhow!("N1GHT_CONCURRENT: expected a boolean, got {v:?}"))?;
        }
    }
    if let Ok(v) = std::env::var("N1GHT_MAX_CONCURRENCY") {
        if !v.trim().is_empty() {
            cfg.executor.max_concurrency = v
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("N1GHT_MAX_CONCURRENCY: {e}"))?;
        }
    }
    if let Ok(v) = std::env::var("N1GHT_TOOLS_DIR") {
        if !v.trim().is_empty() {
            cfg.tools.tools_dir = v;
        }
    }
    Ok(())
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
