use clap::Parser;
use orbit_map::config::toml_config::TomlConfig;
use orbit_map::core::ConfigProvider;
use orbit_map::utils::{logger, validation::Validate};
use orbit_map::{LocalStorage, SurveyEngine, SurveyPipeline};

#[derive(Parser)]
#[command(name = "toml-survey")]
#[command(about = "Orbit map survey driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "survey-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-driven orbit survey");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 Resource monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = SurveyPipeline::new(storage, config);

    let engine = SurveyEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok((report, output_path)) => {
            tracing::info!("✅ Survey completed successfully!");
            println!("✅ Survey completed successfully!");
            println!("🛰 Orbit count checksum: {}", report.orbit_checksum);
            if let Some(transfer) = &report.transfer {
                println!(
                    "🛰 Minimum transfers {} -> {}: {}",
                    transfer.origin, transfer.destination, transfer.distance
                );
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Survey: {} v{}",
        config.survey.name, config.survey.version
    );
    println!("  Source: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    println!(
        "  Query: {} -> {} (allow missing: {})",
        config.origin(),
        config.destination(),
        config.allow_missing_query()
    );
    println!("  Duplicate policy: {}", config.duplicate_policy());
    println!("  Formats: {}", config.output_formats().join(", "));

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
