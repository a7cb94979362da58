use crate::utils::error::{RiskError, Result};
use crate::utils::validation::{validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Starting inoculum, CFU/g.
pub const INITIAL_POPULATION: f64 = 1e3;
/// Asymptotic population ceiling, CFU/g.
pub const CARRYING_CAPACITY: f64 = 1e9;
/// Number of evenly spaced samples in every trajectory.
pub const SAMPLE_COUNT: usize = 100;

pub const TEMPERATURE_RANGE: (f64, f64) = (0.0, 50.0);
pub const EXPOSURE_HOURS_RANGE: (f64, f64) = (0.0, 72.0);
pub const PH_RANGE: (f64, f64) = (3.5, 7.5);
pub const WATER_ACTIVITY_RANGE: (f64, f64) = (0.85, 1.0);

/// Food category chosen by the operator.
///
/// Carried through to reports only; the kinetics are identical for every
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FoodType {
    #[default]
    Poultry,
    Dairy,
    Produce,
    Seafood,
}

impl FoodType {
    pub const ALL: [FoodType; 4] = [
        FoodType::Poultry,
        FoodType::Dairy,
        FoodType::Produce,
        FoodType::Seafood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodType::Poultry => "Poultry",
            FoodType::Dairy => "Dairy",
            FoodType::Produce => "Produce",
            FoodType::Seafood => "Seafood",
        }
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodType {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self> {
        FoodType::ALL
            .into_iter()
            .find(|food| food.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RiskError::UnknownFoodType {
                value: s.to_string(),
            })
    }
}

/// Environmental conditions for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// °C
    pub temperature: f64,
    pub exposure_hours: f64,
    pub ph: f64,
    pub water_activity: f64,
    #[serde(default)]
    pub food_type: FoodType,
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            exposure_hours: 24.0,
            ph: 6.5,
            water_activity: 0.95,
            food_type: FoodType::Poultry,
        }
    }
}

impl SimulationInput {
    pub fn new(
        temperature: f64,
        exposure_hours: f64,
        ph: f64,
        water_activity: f64,
        food_type: FoodType,
    ) -> Self {
        Self {
            temperature,
            exposure_hours,
            ph,
            water_activity,
            food_type,
        }
    }

    /// Pins every field into its documented range, the way the input
    /// widgets do. NaN passes through untouched so `validate` still
    /// rejects it.
    pub fn clamped(self) -> Self {
        fn pin(value: f64, (min, max): (f64, f64)) -> f64 {
            if value.is_nan() {
                value
            } else {
                value.clamp(min, max)
            }
        }

        Self {
            temperature: pin(self.temperature, TEMPERATURE_RANGE),
            exposure_hours: pin(self.exposure_hours, EXPOSURE_HOURS_RANGE),
            ph: pin(self.ph, PH_RANGE),
            water_activity: pin(self.water_activity, WATER_ACTIVITY_RANGE),
            food_type: self.food_type,
        }
    }
}

impl Validate for SimulationInput {
    fn validate(&self) -> Result<()> {
        let (min, max) = TEMPERATURE_RANGE;
        validate_range("temperature", self.temperature, min, max)?;
        let (min, max) = EXPOSURE_HOURS_RANGE;
        validate_range("exposure_hours", self.exposure_hours, min, max)?;
        let (min, max) = PH_RANGE;
        validate_range("ph", self.ph, min, max)?;
        let (min, max) = WATER_ACTIVITY_RANGE;
        validate_range("water_activity", self.water_activity, min, max)?;
        Ok(())
    }
}

/// Coefficients of the bounded growth law.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthParameters {
    /// N0, CFU/g
    pub initial_population: f64,
    /// r, per hour. Negative under hostile conditions.
    pub growth_rate: f64,
    /// K, CFU/g
    pub carrying_capacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub time: f64,
    pub population: f64,
}

/// Population samples ordered by time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub(crate) fn from_points(points: Vec<TrajectoryPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&TrajectoryPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    /// Population at the end of the exposure window; 0.0 for an empty trajectory.
    pub fn final_population(&self) -> f64 {
        self.last().map(|p| p.population).unwrap_or(0.0)
    }

    pub fn peak_population(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.population)
            .fold(0.0, f64::max)
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.time)
    }

    pub fn populations(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.population)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub score: f64,
}

/// Everything one simulation produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub input: SimulationInput,
    pub parameters: GrowthParameters,
    pub trajectory: Trajectory,
    pub risk: RiskAssessment,
}
