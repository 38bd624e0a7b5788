//! Path simulator properties.
//!
//! # Test Categories
//!
//! 1. **Initial column**: every path starts at the spot price
//! 2. **Antithetic mirroring**: second-half increments negate the first half
//! 3. **Determinism**: identical seeds give identical matrices
//! 4. **Validation**: invalid inputs name the offending parameter

use mcop_core::types::ModelParameters;
use mcop_pricing::mc::{draw_standard_normals, simulate_gbm_paths, SimulationConfig};
use mcop_pricing::rng::PricerRng;
use proptest::prelude::*;

fn config(n_paths: usize, n_steps: usize, seed: u64, antithetic: bool) -> SimulationConfig {
    SimulationConfig::builder()
        .n_paths(n_paths)
        .n_steps(n_steps)
        .seed(seed)
        .antithetic(antithetic)
        .build()
        .unwrap()
}

// ============================================================================
// Initial column
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_first_column_is_spot(
        spot in 1.0f64..500.0,
        rate in -0.02f64..0.1,
        dividend in 0.0f64..0.05,
        vol in 0.0f64..0.8,
        maturity in 0.1f64..3.0,
        n_paths in 1usize..64,
        n_steps in 1usize..32,
        seed in any::<u64>(),
        antithetic in any::<bool>(),
    ) {
        let params = ModelParameters::new(spot, rate, dividend, vol, maturity).unwrap();
        let paths = simulate_gbm_paths(&params, &config(n_paths, n_steps, seed, antithetic)).unwrap();

        prop_assert_eq!(paths.n_paths(), n_paths);
        prop_assert_eq!(paths.n_cols(), n_steps + 1);
        for row in paths.rows() {
            prop_assert_eq!(row[0], spot);
            prop_assert!(row.iter().all(|s| s.is_finite() && *s >= 0.0));
        }
    }
}

// ============================================================================
// Antithetic mirroring
// ============================================================================

#[test]
fn test_antithetic_normals_are_exact_mirrors() {
    for n_paths in [1, 2, 7, 10] {
        let n_steps = 5;
        let z = draw_standard_normals(&mut PricerRng::from_seed(99), n_paths, n_steps, true);
        let half = n_paths.div_ceil(2);

        for i in 0..(n_paths - half) {
            for t in 0..n_steps {
                assert_eq!(z[(half + i) * n_steps + t], -z[i * n_steps + t]);
            }
        }
    }
}

#[test]
fn test_antithetic_log_increments_mirror_around_drift() {
    let params = ModelParameters::new(100.0, 0.05, 0.01, 0.3, 1.0).unwrap();
    let n_paths = 9;
    let n_steps = 12;
    let paths = simulate_gbm_paths(&params, &config(n_paths, n_steps, 5, true)).unwrap();

    let dt = params.dt(n_steps);
    let drift = params.log_drift(dt);
    let half = n_paths.div_ceil(2);

    for i in 0..(n_paths - half) {
        let original = paths.path(i);
        let mirror = paths.path(half + i);
        for t in 0..n_steps {
            let up = (original[t + 1] / original[t]).ln() - drift;
            let down = (mirror[t + 1] / mirror[t]).ln() - drift;
            assert!((up + down).abs() < 1e-10, "step {}: {} vs {}", t, up, down);
        }
    }
}

#[test]
fn test_antithetic_preserves_marginal_mean() {
    let params = ModelParameters::new(100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
    let paths = simulate_gbm_paths(&params, &config(100_000, 10, 11, true)).unwrap();

    let terminal = paths.terminal_prices();
    let mean = terminal.iter().sum::<f64>() / terminal.len() as f64;
    let forward = 100.0 * 0.05_f64.exp();

    assert!((mean - forward).abs() < 0.3, "mean {} vs forward {}", mean, forward);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_same_paths() {
    let params = ModelParameters::new(100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
    let a = simulate_gbm_paths(&params, &config(500, 20, 123, true)).unwrap();
    let b = simulate_gbm_paths(&params, &config(500, 20, 123, true)).unwrap();
    let c = simulate_gbm_paths(&params, &config(500, 20, 124, true)).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_invalid_inputs_name_parameter() {
    let err = SimulationConfig::builder()
        .n_paths(0)
        .n_steps(10)
        .build()
        .unwrap_err();
    assert_eq!(err.parameter(), Some("n_paths"));

    let err = SimulationConfig::builder()
        .n_paths(10)
        .n_steps(0)
        .build()
        .unwrap_err();
    assert_eq!(err.parameter(), Some("n_steps"));

    let err = ModelParameters::new(100.0, 0.05, 0.0, -0.1, 1.0).unwrap_err();
    assert_eq!(err.parameter(), Some("volatility"));

    let err = ModelParameters::new(100.0, 0.05, 0.0, 0.2, 0.0).unwrap_err();
    assert_eq!(err.parameter(), Some("maturity"));
}
