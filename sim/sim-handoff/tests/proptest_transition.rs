//! Property-based tests for the transition weight and strength tables.
//!
//! Run with: cargo test -p sim-handoff -- proptest

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::sync::Arc;

use proptest::prelude::*;
use sim_handoff::{ComplementaryTables, ContactSwitch, HandoffConfig, TransitionWindow};
use sim_types::TimeGrid;

// =============================================================================
// Strategies
// =============================================================================

/// A non-degenerate window inside `[0, 10]`.
fn arb_window() -> impl Strategy<Value = (f64, f64)> {
    (0.0..10.0f64, 1e-3..5.0f64).prop_map(|(start, len)| (start, (start + len).min(10.0)))
}

/// A strictly increasing grid covering `[0, 10]`.
fn arb_grid() -> impl Strategy<Value = TimeGrid> {
    prop::collection::vec(0.0..10.0f64, 0..200).prop_map(|mut interior| {
        interior.push(0.0);
        interior.push(10.0);
        interior.sort_by(f64::total_cmp);
        interior.dedup();
        TimeGrid::new(interior).unwrap()
    })
}

/// A grid on `[0, 1]` whose interior is a run of neighbouring floats.
fn arb_adjacent_grid() -> impl Strategy<Value = TimeGrid> {
    (1e-6..0.9f64, 2..8usize).prop_map(|(base, run)| {
        let mut times = vec![0.0];
        let mut t = base;
        for _ in 0..run {
            times.push(t);
            t = f64::from_bits(t.to_bits() + 1);
        }
        times.push(1.0);
        TimeGrid::new(times).unwrap()
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_weight_bounded_and_table_monotone(
        (t_start, t_end) in arb_window(),
        grid in arb_grid(),
    ) {
        let window = TransitionWindow::new(t_start, t_end).unwrap();
        let weights: Vec<f64> = grid.iter().map(|t| window.weight(t)).collect();
        prop_assert!(weights.iter().all(|w| (0.0..=1.0).contains(w)));

        let tables = ComplementaryTables::build(&grid, &window).unwrap();
        prop_assert!(tables.up.values().windows(2).all(|w| w[1] >= w[0]));
        prop_assert_eq!(window.weight(t_start), 0.0);
        prop_assert_eq!(window.weight(t_end), 1.0);
    }

    #[test]
    fn proptest_tables_sum_to_one_exactly(
        (t_start, t_end) in arb_window(),
        grid in arb_grid(),
    ) {
        let window = TransitionWindow::new(t_start, t_end).unwrap();
        let tables = ComplementaryTables::build(&grid, &window).unwrap();

        for (d, u) in tables.down.iter().zip(tables.up.iter()) {
            prop_assert_eq!(d + u, 1.0);
        }
    }

    #[test]
    fn proptest_tables_monotone_on_neighbouring_instants(grid in arb_adjacent_grid()) {
        let window = TransitionWindow::new(0.0, 1.0).unwrap();
        let tables = ComplementaryTables::build(&grid, &window).unwrap();

        prop_assert!(tables.up.values().windows(2).all(|w| w[1] >= w[0]));
        prop_assert!(tables.down.values().windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn proptest_degenerate_window_is_step(t_switch in 0.0..10.0f64, grid in arb_grid()) {
        let window = TransitionWindow::new(t_switch, t_switch).unwrap();
        for t in grid.iter() {
            let w = window.weight(t);
            prop_assert!(!w.is_nan());
            prop_assert_eq!(w, if t >= t_switch { 1.0 } else { 0.0 });
        }
    }

    #[test]
    fn proptest_switch_total_coupling(
        (t_start, t_end) in arb_window(),
        grid in arb_grid(),
    ) {
        let config = HandoffConfig::dumbbell_release().window(t_start, t_end);
        let switch = ContactSwitch::build(Arc::new(grid), &config).unwrap();

        for sample in switch.sweep().unwrap() {
            prop_assert!((sample.total() - 1000.0).abs() < 1e-9);
        }
    }
}
