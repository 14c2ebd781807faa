use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;

use super::types::AppConfig;

pub const CONFIG_FILE: &str = "config.toml";

/// Loads configuration from `path`, or `config.toml` in the working
/// directory when present, then applies environment overrides.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut cfg = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound(p.display().to_string()));
            }
            read_file(p)?
        }
        None if Path::new(CONFIG_FILE).exists() => read_file(Path::new(CONFIG_FILE))?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    validate(&cfg)?;
    Ok(cfg)
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse(&s)
}

pub(crate) fn parse(s: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str::<AppConfig>(s).map_err(ConfigError::Parse)
}

pub(crate) fn apply_env_overrides<F>(cfg: &mut AppConfig, var: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| var(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("GIFT_ASM_BINARY_PATH") {
        cfg.executor.binary_path = PathBuf::from(v.trim());
    }
    if let Some(v) = get("GIFTGEN_PROJECT_DIR") {
        cfg.executor.project_dir = Some(PathBuf::from(v.trim()));
    }
    if let Some(v) = get("GIFTGEN_TIMEOUT_MS") {
        cfg.executor.timeout_ms = parse_env("GIFTGEN_TIMEOUT_MS", &v)?;
    }
    if let Some(v) = get("GIFTGEN_MAX_CONCURRENT") {
        cfg.executor.max_concurrent = parse_env("GIFTGEN_MAX_CONCURRENT", &v)?;
    }
    if let Some(v) = get("GIFTGEN_HOST") {
        cfg.http_server.host = v.trim().to_string();
    }
    if let Some(v) = get("GIFTGEN_PORT") {
        cfg.http_server.port = parse_env("GIFTGEN_PORT", &v)?;
    }

    Ok(())
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::EnvInvalid {
        key: key.to_string(),
        value: value.to_string(),
    })
}

pub(crate) fn validate(cfg: &AppConfig) -> Result<(), ConfigError> {
    if cfg.executor.binary_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "executor.binary_path must not be empty".into(),
        ));
    }
    if cfg.executor.max_concurrent == 0 {
        return Err(ConfigError::Validation(
            "executor.max_concurrent must be at least 1".into(),
        ));
    }
    Ok(())
}
