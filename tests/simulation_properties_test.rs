use pathogen_risk::core::growth::generate_with_samples;
use pathogen_risk::domain::model::{CARRYING_CAPACITY, INITIAL_POPULATION, SAMPLE_COUNT};
use pathogen_risk::{
    classify, estimate, generate, FoodType, GrowthParameters, RiskError, RiskTier,
    SimulationEngine, SimulationInput,
};

/// Coarse grid over the documented input ranges.
fn input_grid() -> Vec<SimulationInput> {
    let mut inputs = Vec::new();
    for temperature in [0.0, 4.0, 12.5, 25.0, 37.0, 50.0] {
        for exposure_hours in [0.0, 1.0, 24.0, 72.0] {
            for ph in [3.5, 5.0, 6.5, 7.5] {
                for water_activity in [0.85, 0.9, 0.95, 1.0] {
                    inputs.push(SimulationInput::new(
                        temperature,
                        exposure_hours,
                        ph,
                        water_activity,
                        FoodType::Poultry,
                    ));
                }
            }
        }
    }
    inputs
}

#[test]
fn test_trajectory_shape_for_all_valid_inputs() {
    let engine = SimulationEngine::new();
    for input in input_grid() {
        let outcome = engine.run(&input).unwrap();
        let points = outcome.trajectory.points();

        assert_eq!(points.len(), SAMPLE_COUNT);
        assert_eq!(points[0].time, 0.0);
        assert_eq!(points[SAMPLE_COUNT - 1].time, input.exposure_hours);
        assert!(points.windows(2).all(|w| w[0].time <= w[1].time));
        assert_eq!(points[0].population, INITIAL_POPULATION);
    }
}

#[test]
fn test_positive_growth_is_monotone_and_bounded() {
    let engine = SimulationEngine::new();
    for input in input_grid() {
        let outcome = engine.run(&input).unwrap();
        if outcome.parameters.growth_rate <= 0.0 {
            continue;
        }
        let populations: Vec<f64> = outcome.trajectory.populations().collect();
        assert!(populations.windows(2).all(|w| w[0] <= w[1]), "{:?}", input);
        assert!(populations
            .iter()
            .all(|&n| n <= CARRYING_CAPACITY * (1.0 + 1e-12)));
    }

    // long horizon with a fast rate, beyond the validated ranges
    let params = GrowthParameters {
        initial_population: INITIAL_POPULATION,
        growth_rate: 0.9,
        carrying_capacity: CARRYING_CAPACITY,
    };
    let trajectory = generate_with_samples(500.0, &params, 1_000).unwrap();
    assert!(trajectory
        .points()
        .windows(2)
        .all(|w| w[0].population <= w[1].population));
    assert!((trajectory.final_population() - CARRYING_CAPACITY).abs() / CARRYING_CAPACITY < 1e-9);
}

#[test]
fn test_negative_growth_decays_monotonically() {
    let params = GrowthParameters {
        initial_population: INITIAL_POPULATION,
        growth_rate: -0.2,
        carrying_capacity: CARRYING_CAPACITY,
    };
    let trajectory = generate(72.0, &params).unwrap();
    let populations: Vec<f64> = trajectory.populations().collect();
    assert!(populations.windows(2).all(|w| w[0] >= w[1]));
    assert!(trajectory.final_population() < 1.0);
    assert_eq!(trajectory.peak_population(), INITIAL_POPULATION);
}

#[test]
fn test_zero_exposure_collapses_to_initial_population() {
    let input = SimulationInput::new(37.0, 0.0, 6.5, 1.0, FoodType::Seafood);
    let outcome = SimulationEngine::new().run(&input).unwrap();
    assert!(outcome
        .trajectory
        .points()
        .iter()
        .all(|p| p.time == 0.0 && p.population == INITIAL_POPULATION));
}

#[test]
fn test_runs_are_bit_identical() {
    let engine = SimulationEngine::new();
    let input = SimulationInput::new(31.5, 48.0, 5.9, 0.97, FoodType::Dairy);
    let run1 = engine.run(&input).unwrap();
    let run2 = engine.run(&input).unwrap();

    assert_eq!(run1.risk.score.to_bits(), run2.risk.score.to_bits());
    for (a, b) in run1
        .trajectory
        .points()
        .iter()
        .zip(run2.trajectory.points())
    {
        assert_eq!(a.time.to_bits(), b.time.to_bits());
        assert_eq!(a.population.to_bits(), b.population.to_bits());
    }
}

#[test]
fn test_example_reference_conditions() {
    let params = estimate(25.0, 6.5, 0.95);
    let expected_rate = 0.1 * ((0.95 - 0.85) / 0.15);
    assert!((params.growth_rate - expected_rate).abs() < 1e-12);

    let outcome = SimulationEngine::new()
        .run(&SimulationInput::new(25.0, 24.0, 6.5, 0.95, FoodType::Poultry))
        .unwrap();

    let e = (expected_rate * 24.0).exp();
    let expected_final = 1e3 * e / (1.0 + (1e3 / 1e9) * (e - 1.0));
    let final_population = outcome.trajectory.final_population();
    assert!((final_population - expected_final).abs() / expected_final < 1e-12);

    // every environmental factor is 1 here, so the score is the scaled population
    assert!((outcome.risk.score - final_population / 1e6).abs() < 1e-15);
    assert_eq!(outcome.risk.tier, RiskTier::Low);
}

#[test]
fn test_example_zero_temperature_is_flat() {
    let outcome = SimulationEngine::new()
        .run(&SimulationInput::new(0.0, 72.0, 6.5, 0.95, FoodType::Produce))
        .unwrap();
    assert_eq!(outcome.parameters.growth_rate, 0.0);
    assert!(outcome
        .trajectory
        .populations()
        .all(|n| n == INITIAL_POPULATION));
    assert_eq!(outcome.risk.score, 0.0);
}

#[test]
fn test_example_acidic_ph_damps_growth() {
    let neutral = estimate(25.0, 6.5, 0.95).growth_rate;
    let acidic = estimate(25.0, 3.5, 0.95).growth_rate;
    let damping = 1.0 - (3.5_f64 - 6.5).abs() / 3.5;

    assert!((damping - 0.142_857).abs() < 1e-6);
    assert!((acidic - neutral * damping).abs() < 1e-15);
    assert!(acidic < neutral / 5.0);
}

#[test]
fn test_score_of_exactly_point_seven_is_medium() {
    let risk = classify(7e5, 25.0, 6.5, 0.95);
    assert_eq!(risk.score, 0.7);
    assert_eq!(risk.tier, RiskTier::Medium);
}

#[test]
fn test_generic_parameters_are_guarded() {
    let params = GrowthParameters {
        initial_population: INITIAL_POPULATION,
        growth_rate: 0.1,
        carrying_capacity: -1.0,
    };
    assert!(matches!(
        generate(24.0, &params),
        Err(RiskError::InvalidParameter { .. })
    ));

    let out_of_range = SimulationInput::new(25.0, 100.0, 6.5, 0.95, FoodType::Poultry);
    assert!(SimulationEngine::new().run(&out_of_range).is_err());
    assert!(SimulationEngine::new()
        .run(&out_of_range.clamped())
        .is_ok());
}
