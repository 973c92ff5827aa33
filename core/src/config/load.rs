use std::path::{Path, PathBuf};

use super::types::{AgentBackend, AppConfig};

/// Get the default zava data directory: ~/.zava
fn get_zava_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".zava"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.zava/config.toml (highest)
    let user_config = get_zava_data_dir()?.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    // Environment variable overrides (Priority 0: highest)
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;

    Ok(cfg)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read config {} failed: {e}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("parse config {} failed: {e}", path.display()))?;
    Ok(cfg)
}

/// Applies `ZAVA_*` overrides. Blank values are ignored.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("ZAVA_HOST") {
        cfg.server.host = v;
    }
    if let Some(v) = get("ZAVA_PORT") {
        cfg.server.port = v
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid ZAVA_PORT {v:?}: {e}"))?;
    }
    if let Some(v) = get("ZAVA_AGENT_BACKEND") {
        cfg.agent.backend = match v.trim().to_ascii_lowercase().as_str() {
            "scripted" => AgentBackend::Scripted,
            "http" => AgentBackend::Http,
            other => anyhow::bail!("invalid ZAVA_AGENT_BACKEND {other:?} (expected scripted|http)"),
        };
    }
    if let Some(v) = get("ZAVA_AGENT_URL") {
        cfg.agent.url = v;
    }
    if let Some(v) = get("ZAVA_AGENT_API_KEY") {
        cfg.agent.api_key = v;
    }
    if let Some(v) = get("ZAVA_LOG_LEVEL") {
        cfg.logging.level = v;
    }

    Ok(())
}

/// Reads the agent instructions (prompt) file named in the config, if any.
pub fn load_instructions(cfg: &AppConfig) -> anyhow::Result<Option<String>> {
    let Some(path) = cfg
        .agent
        .instructions_file
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return Ok(None);
    };

    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read instructions file {path} failed: {e}"))?;
    Ok(Some(text))
}
