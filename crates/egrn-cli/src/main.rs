use clap::Parser;
use egrn_cli::logging::init_logging;
use egrn_cli::{Cli, ConfigSource, EgrnConfig, Outcome};
use std::io;
use std::process::ExitCode;
use tracing::{info, warn};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<Outcome> {
    let (config, source) = EgrnConfig::load(cli.config.as_deref())?;
    let config = config.apply_env_overrides();
    init_logging(&config.logging)?;

    match &source {
        ConfigSource::File(path) => info!(
            path = %path.display(),
            environment = %config.environment.env_type,
            "Loaded configuration"
        ),
        ConfigSource::Defaults(path) => warn!(
            path = %path.display(),
            "Configuration file not found. Using default configuration."
        ),
    }

    let registry = egrn_conversion::global()?;
    let stdout = io::stdout();
    let stderr = io::stderr();
    cli.execute(&config, registry, &mut stdout.lock(), &mut stderr.lock())
}
