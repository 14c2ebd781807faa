use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Gift suggestions backed by an external core binary")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Core binary path, overriding config and GIFT_ASM_BINARY_PATH
    #[arg(long, global = true)]
    pub binary: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ServeArgs {
    /// Bind address (defaults to config)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (defaults to config)
    #[arg(long)]
    pub port: Option<u16>,
}

/// Exactly one payload source must be named.
#[derive(ClapArgs, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct GenerateArgs {
    /// JSON payload, e.g. '{"age":33,"interests":"tech"}'
    #[arg(long)]
    pub payload: Option<String>,

    /// Read the payload from stdin
    #[arg(long)]
    pub stdin: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Run the core binary once and print its answer
    Generate(GenerateArgs),
}
