mod config_error;
mod executor_error;
mod gift_error;

pub use config_error::ConfigError;
pub use executor_error::ExecutorError;
pub use gift_error::{GiftError, INTERNAL_PUBLIC_MESSAGE};
