pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, scenario_config::ScenarioConfig};
pub use crate::core::{
    engine::SimulationEngine,
    estimator::estimate,
    export::{ExportFormat, TrajectoryExporter},
    growth::generate,
    risk::classify,
};
pub use crate::domain::model::{
    FoodType, GrowthParameters, RiskAssessment, RiskTier, SimulationInput, SimulationOutcome,
    Trajectory, TrajectoryPoint,
};
pub use crate::utils::error::{Result, RiskError};
