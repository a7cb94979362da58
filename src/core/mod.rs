pub mod engine;
pub mod estimator;
pub mod export;
pub mod growth;
pub mod risk;

pub use crate::domain::model::{
    FoodType, GrowthParameters, RiskAssessment, RiskTier, SimulationInput, SimulationOutcome,
    Trajectory, TrajectoryPoint,
};
pub use crate::domain::ports::{InputProvider, Storage};
pub use crate::utils::error::Result;
