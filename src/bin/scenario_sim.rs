use clap::Parser;
use pathogen_risk::core::{InputProvider, Storage};
use pathogen_risk::utils::{logger, validation::Validate};
use pathogen_risk::{
    LocalStorage, RiskError, ScenarioConfig, SimulationEngine, SimulationOutcome,
    TrajectoryExporter,
};

#[derive(Parser)]
#[command(name = "scenario-sim")]
#[command(about = "Run a batch of pathogen growth scenarios from a TOML file")]
struct Args {
    /// Path to TOML scenario file
    #[arg(short, long, default_value = "scenarios.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the bundle setting from the config
    #[arg(long)]
    bundle: Option<bool>,

    /// Dry run - resolve and validate scenarios without simulating
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match ScenarioConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(config.log_json(), args.verbose || config.verbose_logging());

    tracing::info!("🚀 Starting scenario batch '{}'", config.batch.name);
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = run(&args, &config) {
        tracing::error!(
            "❌ Batch failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(args: &Args, config: &ScenarioConfig) -> Result<(), RiskError> {
    // 驗證配置
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let scenarios = config.resolved_inputs()?;
    if scenarios.is_empty() {
        tracing::warn!("No enabled scenarios in '{}'", config.batch.name);
        return Ok(());
    }

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No simulation will run");
        for (name, input) in &scenarios {
            println!("{}: {:?}", name, input);
        }
        return Ok(());
    }

    let engine = SimulationEngine::new();
    let formats = config.export_formats()?;
    let bundle = args.bundle.unwrap_or_else(|| config.bundle());
    let mut results: Vec<(String, SimulationOutcome)> = Vec::with_capacity(scenarios.len());

    for (name, input) in scenarios {
        tracing::info!("▶️ Scenario '{}'", name);
        let storage = LocalStorage::new(format!("{}/{}", config.output_path(), name));
        let exporter = TrajectoryExporter::new(storage)
            .with_formats(formats.clone())
            .with_bundle(bundle);

        let (outcome, written) = engine.run_and_export(&input, &exporter)?;
        for file in &written {
            tracing::debug!("📁 {}", exporter.storage().locate(file));
        }
        println!(
            "{:<20} {:<8} final {:>12.3e} CFU/g  score {:>10.4}",
            name,
            outcome.risk.tier.label(),
            outcome.trajectory.final_population(),
            outcome.risk.score
        );
        results.push((name, outcome));
    }

    let summary_exporter = TrajectoryExporter::new(LocalStorage::new(config.output_path().to_string()));
    let summary = summary_exporter.export_summary(config.summary_file(), &results)?;
    let location = summary_exporter.storage().locate(&summary);
    tracing::info!("📊 Summary saved to: {}", location);
    println!("📊 Summary saved to: {}", location);

    Ok(())
}
