use crate::domain::model::{GrowthParameters, Trajectory, TrajectoryPoint, SAMPLE_COUNT};
use crate::utils::error::{RiskError, Result};
use crate::utils::validation::{validate_finite, validate_non_negative, validate_positive};

/// `count` evenly spaced values over `[start, stop]`, both ends included.
/// The last value is pinned to `stop` exactly.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
            values[count - 1] = stop;
            values
        }
    }
}

/// Bounded (logistic-form) growth law evaluated at time `t`:
///
/// `N(t) = N0·e^(rt) / (1 + (N0/K)·(e^(rt) − 1))`
///
/// For `r >= 0` the equivalent form `N0 / (e^(−rt) + (N0/K)·(1 − e^(−rt)))`
/// is used so the exponential never overflows. Decay underflows to 0.0.
pub fn population_at(t: f64, params: &GrowthParameters) -> f64 {
    let GrowthParameters {
        initial_population: n0,
        growth_rate: r,
        carrying_capacity: k,
    } = *params;
    let ratio = n0 / k;

    if r >= 0.0 {
        let decay = (-r * t).exp();
        n0 / (decay + ratio * (1.0 - decay))
    } else {
        let growth = (r * t).exp();
        if growth == 0.0 {
            return 0.0;
        }
        n0 * growth / (1.0 + ratio * (growth - 1.0))
    }
}

fn check_parameters(duration: f64, params: &GrowthParameters) -> Result<()> {
    validate_non_negative("duration", duration)?;
    validate_non_negative("initial_population", params.initial_population)?;
    validate_finite("growth_rate", params.growth_rate)?;
    validate_positive("carrying_capacity", params.carrying_capacity)?;
    // 初始族群高於 K 時，衰減分支的分母會在有限時間內歸零
    if params.initial_population > params.carrying_capacity {
        return Err(RiskError::invalid_parameter(
            "initial_population",
            params.initial_population,
            format!(
                "Value must not exceed carrying_capacity ({})",
                params.carrying_capacity
            ),
        ));
    }
    Ok(())
}

/// Samples the growth law at [`SAMPLE_COUNT`] points over `[0, duration]`.
pub fn generate(duration: f64, params: &GrowthParameters) -> Result<Trajectory> {
    generate_with_samples(duration, params, SAMPLE_COUNT)
}

pub fn generate_with_samples(
    duration: f64,
    params: &GrowthParameters,
    samples: usize,
) -> Result<Trajectory> {
    if samples == 0 {
        return Err(RiskError::invalid_parameter(
            "samples",
            samples,
            "At least one sample is required",
        ));
    }
    check_parameters(duration, params)?;

    let points = linspace(0.0, duration, samples)
        .into_iter()
        .map(|time| TrajectoryPoint {
            time,
            population: population_at(time, params),
        })
        .collect();

    Ok(Trajectory::from_points(points))
}
