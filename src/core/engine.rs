use crate::core::export::TrajectoryExporter;
use crate::core::{estimator, growth, risk};
use crate::domain::model::{SimulationInput, SimulationOutcome};
use crate::domain::ports::{InputProvider, Storage};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Runs validate → estimate → generate → classify. Holds no state between runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationEngine;

impl SimulationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self, input: &SimulationInput) -> Result<SimulationOutcome> {
        input.validate()?;

        tracing::debug!(
            "Simulating {} at {} °C, pH {}, aw {} for {} h",
            input.food_type,
            input.temperature,
            input.ph,
            input.water_activity,
            input.exposure_hours
        );

        let parameters = estimator::estimate(input.temperature, input.ph, input.water_activity);
        if parameters.growth_rate < 0.0 {
            tracing::warn!(
                "Negative growth rate {:.5}/h: population will decline",
                parameters.growth_rate
            );
        }

        let trajectory = growth::generate(input.exposure_hours, &parameters)?;
        let final_population = trajectory.final_population();
        tracing::debug!(
            "Generated {} samples, final population {:.3e} CFU/g",
            trajectory.len(),
            final_population
        );

        let risk = risk::classify(
            final_population,
            input.temperature,
            input.ph,
            input.water_activity,
        );
        tracing::info!("Risk tier {} (score {:.4})", risk.tier, risk.score);

        Ok(SimulationOutcome {
            input: *input,
            parameters,
            trajectory,
            risk,
        })
    }

    pub fn run_provider<P: InputProvider>(&self, provider: &P) -> Result<SimulationOutcome> {
        let input = provider.simulation_input()?;
        self.run(&input)
    }

    /// Runs the simulation and hands the outcome to `exporter`; returns the
    /// outcome with the names of the files written.
    pub fn run_and_export<S: Storage>(
        &self,
        input: &SimulationInput,
        exporter: &TrajectoryExporter<S>,
    ) -> Result<(SimulationOutcome, Vec<String>)> {
        let outcome = self.run(input)?;
        let written = exporter.export(&outcome)?;
        Ok((outcome, written))
    }
}
