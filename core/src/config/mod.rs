mod load;
mod types;

pub use load::{load, CONFIG_FILE};
pub use types::{AppConfig, ExecutorConfig, HttpServerConfig, LoggingConfig};
