#![allow(missing_docs)]

use flocking::simulation::heatmap::DensityGrid;

#[test]
fn test_grid_dimensions_round_up() {
    let grid = DensityGrid::new(800.0, 600.0, 10.0);
    assert_eq!(grid.cols(), 80);
    assert_eq!(grid.rows(), 60);

    // Partial trailing cells still get a full cell.
    let grid = DensityGrid::new(805.0, 601.0, 10.0);
    assert_eq!(grid.cols(), 81);
    assert_eq!(grid.rows(), 61);
}

#[test]
fn test_visits_accumulate_in_floor_mapped_cell() {
    let mut grid = DensityGrid::new(800.0, 600.0, 10.0);

    for _ in 0..3 {
        grid.record_visit(25.0, 35.0, 1.0);
    }

    assert_eq!(grid.history(2, 3), 3.0);
    assert_eq!(grid.history(3, 2), 0.0);
}

#[test]
fn test_peak_starts_high_and_never_decreases() {
    let mut grid = DensityGrid::new(800.0, 600.0, 10.0);
    let initial = grid.max_observed();
    assert!(initial > 0.0);

    // A few visits stay below the initial peak.
    for _ in 0..3 {
        grid.record_visit(25.0, 35.0, 1.0);
    }
    assert_eq!(grid.max_observed(), initial);

    // Enough visits push past it.
    for _ in 0..12 {
        grid.record_visit(25.0, 35.0, 1.0);
    }
    assert_eq!(grid.max_observed(), 15.0);

    // Decay cools the cells but leaves the high-water mark alone.
    grid.decay_tick(50_000.0);
    assert_eq!(grid.max_observed(), 15.0);
}

#[test]
fn test_decay_is_proportional_to_peak_and_bounded_at_zero() {
    let mut grid = DensityGrid::new(800.0, 600.0, 10.0);
    for _ in 0..12 {
        grid.record_visit(25.0, 35.0, 1.0);
    }
    grid.record_visit(105.0, 205.0, 1.0);
    assert_eq!(grid.max_observed(), 12.0);

    // decrement = 12 * 50000 / 100000 = 6 per tick, for every cell.
    grid.decay_tick(50_000.0);
    assert!((grid.history(2, 3) - 6.0).abs() < 1e-5);
    // The single-visit cell clamps at zero instead of going negative.
    assert_eq!(grid.history(10, 20), 0.0);

    grid.decay_tick(50_000.0);
    grid.decay_tick(50_000.0);
    assert_eq!(grid.history(2, 3), 0.0);
}

#[test]
fn test_out_of_bounds_visits_are_ignored() {
    let mut grid = DensityGrid::new(800.0, 600.0, 10.0);

    grid.record_visit(-5.0, 50.0, 1.0);
    grid.record_visit(50.0, -0.5, 1.0);
    grid.record_visit(800.0, 50.0, 1.0);
    grid.record_visit(50.0, 600.0, 1.0);

    assert!(grid.intensities().iter().all(|&i| i == 0.0));
}

#[test]
fn test_intensity_is_ratio_of_peak() {
    let mut grid = DensityGrid::new(800.0, 600.0, 10.0);
    for _ in 0..20 {
        grid.record_visit(25.0, 35.0, 1.0);
    }
    for _ in 0..5 {
        grid.record_visit(105.0, 205.0, 1.0);
    }

    assert!((grid.intensity(2, 3) - 1.0).abs() < 1e-6);
    assert!((grid.intensity(10, 20) - 0.25).abs() < 1e-6);
    assert_eq!(grid.intensity(0, 0), 0.0);
    assert_eq!(grid.intensities().len(), 80 * 60);
}
