use clap::Parser;
use pathogen_risk::core::{InputProvider, Storage};
use pathogen_risk::utils::{logger, validation::Validate};
use pathogen_risk::{
    CliConfig, ExportFormat, LocalStorage, RiskError, SimulationEngine, SimulationOutcome,
    TrajectoryExporter,
};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.log_json, config.verbose);

    tracing::info!("🧪 Starting pathogen-risk simulation");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Simulation failed: {} (Category: {:?}, Severity: {:?})",
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

fn run(config: &CliConfig) -> Result<(), RiskError> {
    // 驗證配置
    config.validate()?;

    let engine = SimulationEngine::new();
    let outcome = engine.run_provider(config)?;
    print_outcome(&outcome);

    if config.no_export {
        tracing::info!("🔍 Export skipped (--no-export)");
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let exporter = TrajectoryExporter::new(storage)
        .with_formats(ExportFormat::parse_list(config.output_formats())?)
        .with_bundle(config.bundle());

    for name in exporter.export(&outcome)? {
        let location = exporter.storage().locate(&name);
        tracing::info!("📁 Output saved to: {}", location);
        println!("📁 Output saved to: {}", location);
    }

    Ok(())
}

fn print_outcome(outcome: &SimulationOutcome) {
    let input = &outcome.input;
    let risk = &outcome.risk;

    println!("Food type:         {}", input.food_type);
    println!(
        "Conditions:        {} °C, pH {}, aw {}, {} h",
        input.temperature, input.ph, input.water_activity, input.exposure_hours
    );
    println!(
        "Growth rate:       {:.5} /h",
        outcome.parameters.growth_rate
    );
    println!(
        "Final population:  {:.3e} CFU/g",
        outcome.trajectory.final_population()
    );
    println!("Risk level:        {} (score {:.4})", risk.tier, risk.score);
    println!("Recommendations:");
    for line in risk.tier.recommendations() {
        println!("  - {}", line);
    }
}
