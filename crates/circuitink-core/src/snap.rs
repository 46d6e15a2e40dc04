//! Snap functionality for aligning gates to the grid.

use crate::gate::GridPoint;
use kurbo::Point;

/// Grid size for snapping (matches the visual grid).
pub const GRID_SIZE: i64 = 20;

/// Snap a raw coordinate to the nearest multiple of `grid`.
///
/// Ties round half away from zero: `snap(50.0, 20) == 60` and
/// `snap(-50.0, 20) == -60`. Non-finite input lands on 0. A zero grid
/// disables snapping and only rounds to the nearest integer.
pub fn snap(value: f64, grid: i64) -> i64 {
    if grid == 0 {
        return if value.is_finite() { value.round() as i64 } else { 0 };
    }
    let cells = (value / grid as f64).round();
    if !cells.is_finite() {
        return 0;
    }
    // Saturate in whole cells so far-off input still lands on a multiple.
    let limit = max_cells(grid);
    (cells as i64).clamp(-limit, limit) * grid
}

/// Largest cell count whose multiple of `grid` fits in an `i64`.
fn max_cells(grid: i64) -> i64 {
    (i64::MAX as u64 / grid.unsigned_abs()) as i64
}

/// Move an on-grid coordinate by `cells` grid steps.
///
/// Saturates at the outermost grid multiple instead of overflowing. An
/// off-grid `value` is pulled onto the grid toward zero.
pub fn step_on_grid(value: i64, cells: i64, grid: i64) -> i64 {
    if grid == 0 {
        return value.saturating_add(cells);
    }
    let moved = value.saturating_add(cells.saturating_mul(grid));
    moved - moved % grid
}

/// Snap a raw pointer position to the nearest grid intersection.
pub fn snap_point(point: Point, grid: i64) -> GridPoint {
    GridPoint::new(snap(point.x, grid), snap(point.y, grid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_down() {
        assert_eq!(snap(47.0, 20), 40);
        assert_eq!(snap(23.0, 20), 20);
    }

    #[test]
    fn test_snap_up() {
        assert_eq!(snap(31.0, 20), 40);
        assert_eq!(snap(51.0, 20), 60);
    }

    #[test]
    fn test_snap_ties_round_away_from_zero() {
        assert_eq!(snap(50.0, 20), 60);
        assert_eq!(snap(30.0, 20), 40);
        assert_eq!(snap(10.0, 20), 20);
        assert_eq!(snap(-10.0, 20), -20);
        assert_eq!(snap(-50.0, 20), -60);
    }

    #[test]
    fn test_snap_negative() {
        assert_eq!(snap(-47.0, 20), -40);
        assert_eq!(snap(-9.9, 20), 0);
        assert_eq!(snap(-0.0, 20), 0);
    }

    #[test]
    fn test_snap_exact() {
        assert_eq!(snap(40.0, 20), 40);
        assert_eq!(snap(0.0, 20), 0);
    }

    #[test]
    fn test_snap_always_on_grid() {
        let mut value = -333.3;
        while value < 333.3 {
            assert_eq!(snap(value, 20) % 20, 0, "snap({value}) left the grid");
            assert_eq!(snap(value, 15) % 15, 0, "snap({value}) left the grid");
            value += 0.7;
        }
    }

    #[test]
    fn test_snap_non_finite() {
        assert_eq!(snap(f64::NAN, 20), 0);
        assert_eq!(snap(f64::INFINITY, 20), 0);
        assert_eq!(snap(f64::NEG_INFINITY, 20), 0);
    }

    #[test]
    fn test_snap_saturates_on_grid() {
        for value in [1e20, -1e20, 1e300, -1e300, i64::MAX as f64, i64::MIN as f64] {
            let snapped = snap(value, 20);
            assert_eq!(snapped % 20, 0, "snap({value}) left the grid");
            assert_ne!(snapped, 0);
        }
        assert_eq!(snap(1e20, 20), i64::MAX / 20 * 20);
        assert_eq!(snap(-1e20, 20), -(i64::MAX / 20 * 20));
        assert_eq!(snap(1e300, 7) % 7, 0);
        assert_eq!(snap(1e300, i64::MIN), 0);
    }

    #[test]
    fn test_step_on_grid() {
        assert_eq!(step_on_grid(40, 1, 20), 60);
        assert_eq!(step_on_grid(40, -3, 20), -20);
        assert_eq!(step_on_grid(45, 0, 20), 40);
        assert_eq!(step_on_grid(3, 2, 0), 5);
    }

    #[test]
    fn test_step_on_grid_saturates_on_grid() {
        let top = i64::MAX / 20 * 20;
        assert_eq!(step_on_grid(top, 1, 20), top);
        assert_eq!(step_on_grid(-top, -1, 20), -top);
        assert_eq!(step_on_grid(top, -1, 20), top - 20);
        assert_eq!(step_on_grid(0, i64::MAX, 20) % 20, 0);
    }

    #[test]
    fn test_zero_grid_only_rounds() {
        assert_eq!(snap(47.4, 0), 47);
        assert_eq!(snap(-2.5, 0), -3);
    }

    #[test]
    fn test_snap_point() {
        let snapped = snap_point(Point::new(23.0, 47.0), GRID_SIZE);
        assert_eq!(snapped, GridPoint::new(20, 40));
    }
}
