use giftgen_core::api::{GiftError, GiftGenerator};
use tokio::io::AsyncReadExt;

use crate::commands::cli::GenerateArgs;
use crate::error::CliError;

pub const EXIT_OK: i32 = 0;
pub const EXIT_INTERNAL: i32 = 1;
pub const EXIT_VALIDATION: i32 = 2;

/// Runs one generation and prints the answer, returning the process exit code.
pub async fn handle_generate(
    args: GenerateArgs,
    generator: &GiftGenerator,
) -> Result<i32, CliError> {
    let payload = if args.stdin {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        buf
    } else {
        // clap guarantees --payload when --stdin is absent
        args.payload.unwrap_or_default()
    };

    let result = generator.generate_gifts(&payload).await;
    let (code, text) = render(&result);
    if code == EXIT_OK {
        println!("{text}");
    } else {
        eprintln!("error: {text}");
    }
    Ok(code)
}

fn render(result: &Result<String, GiftError>) -> (i32, &str) {
    match result {
        Ok(ideas) => (EXIT_OK, ideas.as_str()),
        Err(e) if e.is_validation() => (EXIT_VALIDATION, e.public_message()),
        Err(e) => (EXIT_INTERNAL, e.public_message()),
    }
}
