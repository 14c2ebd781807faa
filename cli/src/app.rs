use std::sync::Arc;

use giftgen_core::api::{load, AppConfig, GiftGenerator, ProcessExecutor};

use crate::commands::cli::Args;
use crate::error::CliError;

/// Config file plus env overrides, then command line overrides on top.
pub fn load_config(args: &Args) -> Result<AppConfig, CliError> {
    let mut cfg = load(args.config.as_deref())?;
    if let Some(binary) = &args.binary {
        cfg.executor.binary_path = binary.clone();
    }
    Ok(cfg)
}

pub fn build_generator(cfg: &AppConfig) -> GiftGenerator {
    let executor = ProcessExecutor::new(&cfg.executor);
    tracing::info!(
        binary = %executor.binary().display(),
        timeout_ms = cfg.executor.timeout_ms,
        max_concurrent = cfg.executor.max_concurrent,
        "core executor configured"
    );
    GiftGenerator::new(Arc::new(executor))
}
