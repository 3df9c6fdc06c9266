use chat_daily_stats::utils::error::ErrorSeverity;
use chat_daily_stats::utils::{logger, validation::Validate};
use chat_daily_stats::{ChartEngine, ChatStatsPipeline, CliConfig, LocalStorage, PlottersRenderer};
use clap::Parser;

fn main() {
    let mut config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) => {
            // --help and --version are not failures
            let exit_code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(exit_code);
        }
    };

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.load_settings().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let pipeline = ChatStatsPipeline::new(LocalStorage::default(), PlottersRenderer, config);
    let engine = ChartEngine::new(pipeline);

    match engine.run() {
        Ok(output_path) => {
            println!("✅ Done! Saved: {}", output_path.display());
        }
        Err(e) if e.severity() == ErrorSeverity::Low => {
            tracing::info!("Nothing to plot: {}", e);
            println!("{}", e.user_friendly_message());
        }
        Err(e) => {
            tracing::error!(
                "❌ Chart generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}
