use clap::Parser;
use esoteric_profile::utils::error::ErrorSeverity;
use esoteric_profile::utils::{logger, validation::Validate};
use esoteric_profile::{CliConfig, EngineConfig, EngineError, EsotericEngine};

async fn run(cli: &CliConfig) -> Result<String, EngineError> {
    let engine_config = match &cli.config {
        Some(path) => {
            tracing::debug!("Loading engine config from {}", path);
            EngineConfig::from_file(path)?
        }
        None => EngineConfig::default(),
    };
    let engine = EsotericEngine::from_config(&engine_config)?;

    if let Some(input) = cli.command.profile_input() {
        let profile = engine.profile(&input).await?;
        return Ok(serde_json::to_string_pretty(&profile)?);
    }

    match cli.command.synastry_inputs() {
        Some((first, second)) => {
            let report = engine.synastry(&first, &second)?;
            Ok(serde_json::to_string_pretty(&report)?)
        }
        None => Err(EngineError::validation("command", "unknown command")),
    }
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting esoteric-profile CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&cli).await {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!(
                "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}
