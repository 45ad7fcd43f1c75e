use clap::Parser;
use marketcast::app::Config;
use marketcast::cli::{check, forecast, CheckTarget, Cli, Commands};
use marketcast::error::Result;
use tracing::error;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.init_logging();

    if let Err(e) = run(cli, config).await {
        error!(error = %e, "marketcast exited with an error");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Forecast(args) => forecast::execute(args, config).await,
        Commands::Check(args) => match args.target {
            CheckTarget::Config => check::execute_config(&cli.config),
            CheckTarget::Connection => check::execute_connection(&cli.config).await,
        },
    }
}
