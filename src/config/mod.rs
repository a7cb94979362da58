pub mod cli;
pub mod scenario_config;

#[cfg(feature = "cli")]
use crate::core::export::ExportFormat;
#[cfg(feature = "cli")]
use crate::core::{FoodType, InputProvider, SimulationInput};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "pathogen-risk")]
#[command(about = "Simulate foodborne pathogen growth and classify the risk")]
pub struct CliConfig {
    /// Storage temperature in °C (0-50)
    #[arg(long, default_value_t = 25.0, allow_negative_numbers = true)]
    pub temperature: f64,

    /// Time the product spends at that temperature, hours (0-72)
    #[arg(long, default_value_t = 24.0, allow_negative_numbers = true)]
    pub exposure_hours: f64,

    /// pH level (3.5-7.5)
    #[arg(long, default_value_t = 6.5, allow_negative_numbers = true)]
    pub ph: f64,

    /// Water activity aw (0.85-1.0)
    #[arg(long, default_value_t = 0.95, allow_negative_numbers = true)]
    pub water_activity: f64,

    /// Poultry, Dairy, Produce or Seafood (recorded, not modelled)
    #[arg(long, default_value = "Poultry")]
    pub food_type: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Comma separated list of csv, tsv, json
    #[arg(long, value_delimiter = ',', default_value = "csv")]
    pub formats: Vec<String>,

    /// Zip all exported files into one archive
    #[arg(long)]
    pub bundle: bool,

    /// Clamp inputs into their ranges instead of rejecting them
    #[arg(long)]
    pub clamp: bool,

    /// Print the result without writing any files
    #[arg(long)]
    pub no_export: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl InputProvider for CliConfig {
    fn simulation_input(&self) -> Result<SimulationInput> {
        let food_type: FoodType = self.food_type.parse()?;
        let input = SimulationInput::new(
            self.temperature,
            self.exposure_hours,
            self.ph,
            self.water_activity,
            food_type,
        );

        if self.clamp {
            let clamped = input.clamped();
            if clamped != input {
                tracing::warn!("Inputs clamped into range: {:?} -> {:?}", input, clamped);
            }
            Ok(clamped)
        } else {
            Ok(input)
        }
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn bundle(&self) -> bool {
        self.bundle
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if !self.no_export {
            validate_path("output_path", &self.output_path)?;
            ExportFormat::parse_list(&self.formats)?;
        }
        self.simulation_input()?.validate()
    }
}
