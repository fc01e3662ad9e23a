//! Core engine for classic 9x9 Sudoku.
//!
//! Generates complete solved grids, carves them into puzzles with a
//! guaranteed-unique solution at a target difficulty, validates
//! placements, and derives forced "next move" hints (naked and hidden
//! singles). Rendering, input handling, timers, and persistence are the
//! caller's concern; grids passed in are borrowed for the duration of a
//! call and never retained.
//!
//! ```
//! use sudoku_engine::{Difficulty, Generator, Solver};
//!
//! let mut generator = Generator::with_seed(42);
//! let puzzle = generator.generate(Difficulty::Easy);
//!
//! let solver = Solver::new();
//! assert!(solver.has_unique_solution(&puzzle.grid));
//! ```

mod generator;
mod grid;
mod rng;
mod solver;

pub use generator::{Difficulty, Generator, GeneratorConfig, Puzzle};
pub use grid::{
    CandidateSet, Cell, Conflict, Grid, ParseError, Position, Unit, ValidationResult,
};
pub use rng::SimpleRng;
pub use solver::{Hint, Solver, Technique};
