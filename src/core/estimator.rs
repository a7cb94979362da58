use crate::domain::model::{GrowthParameters, CARRYING_CAPACITY, INITIAL_POPULATION};

/// Growth rate at 25 °C, pH 6.5 and water activity 1.0, per hour.
pub const REFERENCE_GROWTH_RATE: f64 = 0.1;
pub const REFERENCE_TEMPERATURE: f64 = 25.0;
pub const OPTIMAL_PH: f64 = 6.5;
/// Distance from the optimal pH at which growth stops.
pub const PH_TOLERANCE: f64 = 3.5;
/// Water activity below which growth turns negative.
pub const MIN_WATER_ACTIVITY: f64 = 0.85;
pub const WATER_ACTIVITY_SPAN: f64 = 0.15;

pub fn temperature_factor(temperature: f64) -> f64 {
    temperature / REFERENCE_TEMPERATURE
}

/// Linear damping away from pH 6.5; negative outside [3.0, 10.0].
pub fn ph_factor(ph: f64) -> f64 {
    1.0 - (ph - OPTIMAL_PH).abs() / PH_TOLERANCE
}

pub fn water_activity_factor(water_activity: f64) -> f64 {
    (water_activity - MIN_WATER_ACTIVITY) / WATER_ACTIVITY_SPAN
}

/// Maps environmental conditions to growth-law coefficients.
///
/// Total over the reals: inputs outside the validated ranges still yield
/// numbers, including negative growth rates that model die-off.
pub fn estimate(temperature: f64, ph: f64, water_activity: f64) -> GrowthParameters {
    let growth_rate = REFERENCE_GROWTH_RATE
        * temperature_factor(temperature)
        * ph_factor(ph)
        * water_activity_factor(water_activity);

    tracing::trace!(
        temperature,
        ph,
        water_activity,
        growth_rate,
        "estimated growth parameters"
    );

    GrowthParameters {
        initial_population: INITIAL_POPULATION,
        growth_rate,
        carrying_capacity: CARRYING_CAPACITY,
    }
}
