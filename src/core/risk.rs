use crate::domain::model::{RiskAssessment, RiskTier};

/// Population that maps to a unit score, CFU/g.
pub const POPULATION_SCALE: f64 = 1e6;
pub const REFERENCE_TEMPERATURE: f64 = 25.0;
pub const OPTIMAL_PH: f64 = 6.5;
pub const REFERENCE_WATER_ACTIVITY: f64 = 0.95;

/// Scores strictly above these thresholds move up a tier.
pub const HIGH_THRESHOLD: f64 = 0.7;
pub const MEDIUM_THRESHOLD: f64 = 0.3;

pub fn risk_score(final_population: f64, temperature: f64, ph: f64, water_activity: f64) -> f64 {
    (final_population / POPULATION_SCALE)
        * (temperature / REFERENCE_TEMPERATURE)
        * (1.0 / (1.0 + (ph - OPTIMAL_PH).abs()))
        * (water_activity / REFERENCE_WATER_ACTIVITY)
}

pub fn tier_for_score(score: f64) -> RiskTier {
    if score > HIGH_THRESHOLD {
        RiskTier::High
    } else if score > MEDIUM_THRESHOLD {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

pub fn classify(
    final_population: f64,
    temperature: f64,
    ph: f64,
    water_activity: f64,
) -> RiskAssessment {
    let score = risk_score(final_population, temperature, ph, water_activity);
    RiskAssessment {
        tier: tier_for_score(score),
        score,
    }
}
