use autofill_parser::cli::commands::{cmd_check, cmd_fill, cmd_save};
use autofill_parser::cli::config::{Cli, Commands, load_config};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    // Resolve own package: CLI > config > default
    let own_package = cli
        .own_package
        .clone()
        .unwrap_or_else(|| config.own_package.clone());

    let ok = match cli.command {
        Commands::Fill {
            structure,
            manual,
            package,
            validator,
            format,
        } => cmd_fill(
            &structure,
            manual,
            package.as_deref(),
            validator.as_deref(),
            &format,
            &own_package,
            &config,
        )?,
        Commands::Save { structure } => cmd_save(&structure, &own_package)?,
        Commands::Check { identifier } => cmd_check(&identifier, &own_package),
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
