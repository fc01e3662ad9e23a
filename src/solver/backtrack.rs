//! Chronological backtracking over the first empty cell in row-major order.
//!
//! Candidates are gated only by immediate legality; no propagation. Depth
//! is bounded by 81 frames (one per empty cell), so host-stack recursion
//! is safe. Every function restores the grid to its pre-call state as it
//! unwinds from a failed branch.

use crate::grid::Grid;
use crate::rng::SimpleRng;

/// Complete `grid` in place, trying candidates in ascending order.
/// Deterministic: the same grid always produces the same completion.
pub(crate) fn solve_recursive(grid: &mut Grid) -> bool {
    let pos = match grid.first_empty() {
        Some(pos) => pos,
        None => return true,
    };

    for value in 1..=9 {
        if grid.is_valid_placement(pos, value) {
            grid.set(pos, Some(value));
            if solve_recursive(grid) {
                return true;
            }
            grid.set(pos, None);
        }
    }
    false
}

/// Complete `grid` in place, trying candidates in a per-cell shuffled
/// order. Used during generation to produce fresh solutions.
pub(crate) fn solve_randomized(grid: &mut Grid, rng: &mut SimpleRng) -> bool {
    let pos = match grid.first_empty() {
        Some(pos) => pos,
        None => return true,
    };

    let mut order: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
    rng.shuffle(&mut order);

    for &value in &order {
        if grid.is_valid_placement(pos, value) {
            grid.set(pos, Some(value));
            if solve_randomized(grid, rng) {
                return true;
            }
            grid.set(pos, None);
        }
    }
    false
}

/// Count completions of `grid`, stopping the moment `count` reaches
/// `limit`. The count is threaded through the recursion as an explicit
/// accumulator; callers own the copy being mutated.
pub(crate) fn count_solutions_recursive(grid: &mut Grid, count: &mut usize, limit: usize) {
    if *count >= limit {
        return;
    }

    let pos = match grid.first_empty() {
        Some(pos) => pos,
        None => {
            *count += 1;
            return;
        }
    };

    for value in 1..=9 {
        if *count >= limit {
            break;
        }
        if grid.is_valid_placement(pos, value) {
            grid.set(pos, Some(value));
            count_solutions_recursive(grid, count, limit);
            grid.set(pos, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;

    #[test]
    fn test_solve_restores_on_failure() {
        // (0,8) has no legal candidate: 1-8 blocked by the row, 9 by the column
        let mut grid = Grid::new();
        for col in 0..8 {
            grid.set(Position::new(0, col), Some(col as u8 + 1));
        }
        grid.set(Position::new(1, 8), Some(9));
        let before = grid.clone();
        assert!(!solve_recursive(&mut grid));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_randomized_solve_fills_empty_grid() {
        let mut grid = Grid::new();
        let mut rng = SimpleRng::with_seed(42);
        assert!(solve_randomized(&mut grid, &mut rng));
        assert!(grid.is_solved());
    }

    #[test]
    fn test_randomized_solve_is_seed_deterministic() {
        let mut a = Grid::new();
        let mut b = Grid::new();
        solve_randomized(&mut a, &mut SimpleRng::with_seed(9));
        solve_randomized(&mut b, &mut SimpleRng::with_seed(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_count_stops_at_limit() {
        let mut grid = Grid::new();
        let mut count = 0;
        count_solutions_recursive(&mut grid, &mut count, 2);
        assert_eq!(count, 2);
    }
}
