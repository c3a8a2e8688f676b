use anyhow::Context;
use arkitektonika::app::commands;
use arkitektonika::utils::{logger, validation::Validate};
use arkitektonika::{ArkitektonikaError, CliConfig};
use clap::Parser;
use std::io::Write;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let file_config = match config.load_file_config() {
        Ok(file_config) => file_config,
        Err(e) => fail(e),
    };

    // --json-logs or [logging] json = true
    let json_logs = config.json_logs || file_config.as_ref().is_some_and(|c| c.json_logs());
    let level = file_config.as_ref().and_then(|c| c.log_level());
    if json_logs {
        logger::init_json_logger(config.verbose, level);
    } else {
        logger::init_cli_logger(config.verbose, level);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        fail(e);
    }

    let arkitektonika = match config
        .builder(file_config.as_ref())
        .and_then(|builder| builder.build())
    {
        Ok(arkitektonika) => arkitektonika,
        Err(e) => fail(e),
    };

    let mut stdout = std::io::stdout().lock();
    let outcome = commands::run(&arkitektonika, config.command, &mut stdout).await;
    stdout.flush().context("Failed to flush stdout")?;

    match outcome {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => fail(e),
    }
}

fn fail(e: ArkitektonikaError) -> ! {
    tracing::error!(
        "{} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.severity().exit_code())
}
