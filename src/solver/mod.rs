//! Solver orchestrator.
//!
//! Dispatches to the backtracking engine for solving and solution
//! counting, and to the forced-move search for hints.

mod backtrack;
mod hint;

use crate::grid::Grid;
use crate::rng::SimpleRng;

pub use hint::{Hint, Technique};

/// Unit struct solver — stateless, all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Complete `grid` in place. Returns false (leaving the grid exactly
    /// as it was) if no completion exists.
    pub fn solve_in_place(&self, grid: &mut Grid) -> bool {
        if !grid.find_conflicts().is_empty() {
            return false;
        }
        backtrack::solve_recursive(grid)
    }

    /// Solve without mutating the caller's grid, returning the solved
    /// copy if one exists.
    pub fn solve(&self, grid: &Grid) -> Option<Grid> {
        let mut working = grid.clone();
        if self.solve_in_place(&mut working) {
            Some(working)
        } else {
            None
        }
    }

    /// Complete `grid` in place with candidates tried in random order.
    /// Used by the generator to produce fresh solutions.
    pub(crate) fn solve_randomized_in_place(&self, grid: &mut Grid, rng: &mut SimpleRng) -> bool {
        if !grid.find_conflicts().is_empty() {
            return false;
        }
        backtrack::solve_randomized(grid, rng)
    }

    /// Count solutions up to `limit`, stopping the moment the limit is
    /// reached. Always operates on a private copy of the caller's grid.
    pub fn count_solutions(&self, grid: &Grid, limit: usize) -> usize {
        if !grid.find_conflicts().is_empty() {
            return 0;
        }
        let mut working = grid.clone();
        let mut count = 0;
        backtrack::count_solutions_recursive(&mut working, &mut count, limit);
        count
    }

    /// Check if the puzzle has exactly one solution.
    pub fn has_unique_solution(&self, grid: &Grid) -> bool {
        self.count_solutions(grid, 2) == 1
    }

    /// Find one forced next move: naked singles first (row-major), then
    /// hidden singles by row, column, then box. Returns `None` when no
    /// forced move exists; the caller falls back to generic strategy text.
    pub fn get_hint(&self, grid: &Grid) -> Option<Hint> {
        if let Some(h) = hint::find_naked_single(grid) {
            return Some(h);
        }
        hint::find_hidden_single(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;

    const WIKI_PUZZLE: &str =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
    const WIKI_SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn test_solve_known_puzzle() {
        let grid = Grid::from_string(WIKI_PUZZLE).unwrap();
        let solver = Solver::new();
        let solution = solver.solve(&grid).unwrap();
        assert_eq!(solution.to_string(), WIKI_SOLUTION);
        assert!(solution.is_solved());
        assert!(solution.find_conflicts().is_empty());
    }

    #[test]
    fn test_solve_copy_leaves_input_untouched() {
        let grid = Grid::from_string(WIKI_PUZZLE).unwrap();
        let before = grid.clone();
        let solver = Solver::new();
        assert!(solver.solve(&grid).is_some());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_solve_in_place() {
        let mut grid = Grid::from_string(WIKI_PUZZLE).unwrap();
        let solver = Solver::new();
        assert!(solver.solve_in_place(&mut grid));
        assert_eq!(grid.to_string(), WIKI_SOLUTION);
        // givens survive solving in place
        assert_eq!(grid.given_count(), 30);
    }

    #[test]
    fn test_solve_rejects_conflicted_grid() {
        let mut grid = Grid::new();
        grid.set(Position::new(0, 0), Some(5));
        grid.set(Position::new(0, 8), Some(5));
        let solver = Solver::new();
        assert!(solver.solve(&grid).is_none());
        assert_eq!(solver.count_solutions(&grid, 2), 0);
    }

    #[test]
    fn test_unique_solution() {
        let grid = Grid::from_string(WIKI_PUZZLE).unwrap();
        let solver = Solver::new();
        assert!(solver.has_unique_solution(&grid));
    }

    #[test]
    fn test_empty_grid_hits_count_limit() {
        let solver = Solver::new();
        assert_eq!(solver.count_solutions(&Grid::new(), 2), 2);
        assert!(!solver.has_unique_solution(&Grid::new()));
    }

    #[test]
    fn test_count_does_not_mutate_caller_grid() {
        let grid = Grid::from_string(WIKI_PUZZLE).unwrap();
        let before = grid.clone();
        Solver::new().count_solutions(&grid, 2);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_solved_grid_counts_once() {
        let grid = Grid::from_string(WIKI_SOLUTION).unwrap();
        let solver = Solver::new();
        assert_eq!(solver.count_solutions(&grid, 2), 1);
    }

    #[test]
    fn test_get_hint_on_known_puzzle() {
        let grid = Grid::from_string(WIKI_PUZZLE).unwrap();
        let solver = Solver::new();
        let hint = solver.get_hint(&grid).unwrap();
        assert!(grid.is_valid_placement(hint.pos, hint.value));
        // a forced move must agree with the unique solution
        let solution = Grid::from_string(WIKI_SOLUTION).unwrap();
        assert_eq!(solution.get(hint.pos), Some(hint.value));
    }

    #[test]
    fn test_no_hint_on_solved_grid() {
        let grid = Grid::from_string(WIKI_SOLUTION).unwrap();
        assert!(Solver::new().get_hint(&grid).is_none());
    }

    #[test]
    fn test_hint_serde_round_trip() {
        let grid = Grid::from_string(WIKI_PUZZLE).unwrap();
        let hint = Solver::new().get_hint(&grid).unwrap();
        let json = serde_json::to_string(&hint).unwrap();
        let back: Hint = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pos, hint.pos);
        assert_eq!(back.value, hint.value);
        assert_eq!(back.technique, hint.technique);
    }
}
