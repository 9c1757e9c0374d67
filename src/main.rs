// Entrypoint for the CLI application.
// - Keeps `main` small: init diagnostics, parse arguments, dispatch.
// - Errors print to stderr and exit 1; stdout carries only command output.

use nsc::args::{Cli, Command};
use nsc::commands;

fn main() {
    init_tracing();

    if let Err(err) = real_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn real_main() -> anyhow::Result<()> {
    use clap::Parser as _;

    let cli = Cli::parse();

    match cli.command {
        // No sub-command means "update my status".
        None => commands::update::run(&cli.update),
        Some(Command::Auth) => commands::auth::run(),
        Some(Command::Clear) => commands::clear::run(),
        Some(Command::Get) => commands::get::run(),
        Some(Command::Unknown(tokens)) => {
            let token = tokens
                .first()
                .map(|token| token.to_string_lossy().into_owned())
                .unwrap_or_default();
            anyhow::bail!("Unknown command: {token}")
        }
    }
}

// Tracing goes to stderr; `get` output must stay pipeable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nsc=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
