use clap::Parser;
use closer::utils::{logger, validation::Validate};
use closer::{CliConfig, EtlEngine, EtlError, GradePipeline, LocalStorage};

fn fail(e: &EtlError) -> ! {
    tracing::debug!("Conversion aborted, no output written");
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn main() {
    let cli = CliConfig::parse();

    // Logger needs the merged verbose flag, so config errors are reported without it.
    let config = match cli.into_run_config() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting closer");
    tracing::debug!("Run config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let storage = LocalStorage::new(".");
    let pipeline = GradePipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run() {
        Ok(summary) => {
            println!(
                "✅ Successfully converted {} records to {}",
                summary.records, summary.output_path
            );
        }
        Err(e) => fail(&e),
    }
}
