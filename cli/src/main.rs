use clap::Parser;
mod app;
mod commands;
mod error;
mod http;
mod logging;
use commands::cli;
use error::CliError;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let args = cli::Args::parse();
    let cfg = app::load_config(&args)?;
    let log_guard = logging::init(&cfg.logging)?;

    let exit = dispatch(args, cfg).await?;
    drop(log_guard);
    std::process::exit(exit);
}

async fn dispatch(args: cli::Args, cfg: giftgen_core::api::AppConfig) -> Result<i32, CliError> {
    let generator = app::build_generator(&cfg);
    match args.command {
        cli::Commands::Serve(serve_args) => {
            commands::serve::handle_serve(serve_args, &cfg, generator).await?;
            Ok(0)
        }
        cli::Commands::Generate(generate_args) => {
            commands::generate::handle_generate(generate_args, &generator).await
        }
    }
}
