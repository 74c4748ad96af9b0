use anyhow::anyhow;
use clap::Parser;
use homework_cli::cli::{Cli, Commands};
use homework_cli::commands;

fn main() {
    if let Err(error) = run() {
        eprintln!("homework error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    homework_core::init_logging(&cli.effective_log_level(), cli.log_dir.as_deref())
        .map_err(|message| anyhow!("failed to initialize logging: {message}"))?;

    match cli.command {
        Commands::Serve(args) => commands::serve(args),
        Commands::List => commands::list(&cli.api_url),
        Commands::Add(args) => commands::add(&cli.api_url, args),
        Commands::Done { id, undo } => commands::done(&cli.api_url, id, !undo),
        Commands::Rm { id } => commands::remove(&cli.api_url, id),
    }
}
