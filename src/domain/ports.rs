use crate::domain::model::SimulationInput;
use crate::utils::error::Result;

pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    /// Where `path` ends up, for log lines and CLI output.
    fn locate(&self, path: &str) -> String;
}

/// Anything that can hand the engine a set of conditions and export settings.
pub trait InputProvider {
    fn simulation_input(&self) -> Result<SimulationInput>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn bundle(&self) -> bool;
}
