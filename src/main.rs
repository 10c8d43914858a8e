use clap::Parser;
use orbit_map::utils::{logger, validation::Validate};
use orbit_map::{CliConfig, LocalStorage, SurveyEngine, SurveyPipeline};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting orbit-map survey");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 Resource monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = SurveyPipeline::new(storage, config);

    let engine = SurveyEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok((report, output_path)) => {
            tracing::info!("✅ Survey completed successfully!");
            println!("✅ Survey completed successfully!");
            println!("🛰 Orbit count checksum: {}", report.orbit_checksum);
            match &report.transfer {
                Some(transfer) => println!(
                    "🛰 Minimum transfers {} -> {}: {}",
                    transfer.origin, transfer.destination, transfer.distance
                ),
                None => println!("🛰 Transfer query skipped (body missing from map)"),
            }
            println!("📁 Report saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Survey failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                orbit_map::utils::error::ErrorSeverity::Low => 0,
                orbit_map::utils::error::ErrorSeverity::Medium => 2,
                orbit_map::utils::error::ErrorSeverity::High => 1,
                orbit_map::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
