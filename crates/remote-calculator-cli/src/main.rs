//! remote-calc: keypad calculator backed by a remote arithmetic service
//!
//! ## Usage
//!
//! ```bash
//! remote-calc                                  # Interactive keypad on stdin
//! remote-calc calc 12 × 3                      # One calculation
//! remote-calc history                          # List stored operations
//! remote-calc history --reset                  # Clear them
//! remote-calc --base-url http://calc:8080 config
//! ```

use clap::Parser;
use remote_calculator::service::HttpArithmeticService;
use remote_calculator::ui::UiDriver;
use remote_calculator_cli::{handlers, logging, Cli, CliConfig, CliResult, Commands, Session};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = cli.cli_config();
    console::set_colors_enabled(config.color.should_color());
    logging::init(&config)?;

    let client = cli.connection().resolve()?;
    tracing::info!(base_url = %client.normalized_base_url(), "using arithmetic service");

    let service = || HttpArithmeticService::new(&client);
    let stdout = std::io::stdout();

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Config(_) => handlers::run_config(&client, &config, &mut stdout.lock()),
        Commands::Interactive => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_interactive(service()?, &config))
        }
        Commands::Calc(args) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(handlers::run_calc(&service()?, &args, &mut stdout.lock()))
        }
        Commands::History(args) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(handlers::run_history(
                &service()?,
                &args,
                &config,
                chrono::Local,
                &mut stdout.lock(),
            ))
        }
    }
}

async fn run_interactive(service: HttpArithmeticService, config: &CliConfig) -> CliResult<()> {
    let mut session = Session::new(
        UiDriver::new(service),
        config.color.should_color(),
        config.verbosity.is_quiet(),
    );
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    session.run(stdin, &mut std::io::stdout().lock()).await
}
