use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub executor: ExecutorConfig,

    #[serde(default)]
    pub http_server: HttpServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutorConfig {
    /// Path of the core binary, joined onto `project_dir` when relative.
    #[serde(default = "default_binary_path")]
    pub binary_path: PathBuf,

    #[serde(default)]
    pub project_dir: Option<PathBuf>,

    /// Per-run deadline; 0 disables it.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Upper bound on concurrently running core processes.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

fn default_binary_path() -> PathBuf {
    PathBuf::from("bin/gift_core")
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_concurrent() -> usize {
    num_cpus::get().max(1)
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            binary_path: default_binary_path(),
            project_dir: None,
            timeout_ms: default_timeout_ms(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

impl ExecutorConfig {
    pub fn resolved_binary_path(&self) -> PathBuf {
        match &self.project_dir {
            Some(dir) if self.binary_path.is_relative() => dir.join(&self.binary_path),
            _ => self.binary_path.clone(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout_ms() -> u64 {
    60_000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Daily rolling log files go here when set; stderr otherwise.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}
