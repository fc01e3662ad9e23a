use serde::{Deserialize, Serialize};

use crate::grid::{Grid, ParseError, Position};
use crate::rng::SimpleRng;
use crate::solver::Solver;

/// Difficulty level of a puzzle, mapped to a target given-clue count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn all_levels() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Configuration for puzzle generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Target difficulty
    pub difficulty: Difficulty,
    /// Given-clue count the carving phase aims for (best effort)
    pub target_givens: usize,
    /// Full generation attempts before falling back to a vetted puzzle
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::medium()
    }
}

impl GeneratorConfig {
    pub fn easy() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            target_givens: 35,
            max_attempts: 3,
        }
    }

    pub fn medium() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            target_givens: 26,
            max_attempts: 4,
        }
    }

    pub fn hard() -> Self {
        Self {
            difficulty: Difficulty::Hard,
            target_givens: 19,
            max_attempts: 5,
        }
    }

    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::easy(),
            Difficulty::Medium => Self::medium(),
            Difficulty::Hard => Self::hard(),
        }
    }
}

/// A generated puzzle: the carved grid (remaining cells marked as givens),
/// its unique solution, and the parameters it was built with
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub grid: Grid,
    pub solution: Grid,
    pub difficulty: Difficulty,
    pub target_givens: usize,
}

impl Puzzle {
    /// Build a puzzle from the 81-character encodings: `1`-`9`/`.` for the
    /// carved grid, 81 digits for the solution. The solution must be a
    /// solved grid that agrees with every clue.
    pub fn from_strings(
        puzzle: &str,
        solution: &str,
        difficulty: Difficulty,
    ) -> Result<Self, ParseError> {
        let grid = Grid::from_string(puzzle)?;
        let solution = Grid::from_string(solution)?;
        if !solution.is_solved() {
            return Err(ParseError::UnsolvedSolution);
        }
        for (index, pos) in Position::all().enumerate() {
            if let Some(clue) = grid.get(pos) {
                if solution.get(pos) != Some(clue) {
                    return Err(ParseError::SolutionMismatch { index });
                }
            }
        }
        let target_givens = grid.given_count();
        Ok(Self {
            grid,
            solution,
            difficulty,
            target_givens,
        })
    }

    /// The given-clue mask of the carved grid
    pub fn given_mask(&self) -> [[bool; 9]; 9] {
        self.grid.given_mask()
    }

    pub fn is_given(&self, pos: Position) -> bool {
        self.grid.cell(pos).is_given()
    }
}

/// Tentative removals (uniqueness probes) allowed per carving run. The
/// carving loop terminates once this budget is spent, accepting the
/// closest given-count achieved.
const REMOVAL_BUDGET: usize = 200;

/// How many re-ranked cells the secondary carving pass retries
const RERANK_TOP_N: usize = 10;

/// How often a failed randomized fill is retried before starting from a
/// blank grid (a failed fill means the seeding itself went wrong)
const SOLUTION_ATTEMPTS: usize = 8;

/// Sudoku puzzle generator
pub struct Generator {
    config: GeneratorConfig,
    rng: SimpleRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::with_seed(seed),
        }
    }

    /// Generate a puzzle at the given difficulty
    pub fn generate(&mut self, difficulty: Difficulty) -> Puzzle {
        self.config = GeneratorConfig::for_difficulty(difficulty);
        self.generate_with_config()
    }

    /// Generate a puzzle with the current configuration
    pub fn generate_with_config(&mut self) -> Puzzle {
        let solver = Solver::new();

        for _ in 0..self.config.max_attempts {
            let solution = self.generate_solution();
            let mut carved = solution.clone();
            self.remove_cells(&mut carved);

            // Remaining cells become the immutable givens
            for pos in Position::all() {
                if carved.get(pos).is_some() {
                    carved.cell_mut(pos).set_given(true);
                }
            }

            if Self::validate_puzzle(&solver, &carved, &solution) {
                return Puzzle {
                    grid: carved,
                    solution,
                    difficulty: self.config.difficulty,
                    target_givens: self.config.target_givens,
                };
            }
        }

        self.fallback_puzzle(self.config.difficulty)
    }

    /// Produce a complete, conflict-free solution grid: fill the three
    /// diagonal boxes (mutually independent) with random permutations,
    /// then complete the rest with the randomized solver.
    fn generate_solution(&mut self) -> Grid {
        let solver = Solver::new();

        for _ in 0..SOLUTION_ATTEMPTS {
            let mut grid = Grid::new();
            self.fill_box(&mut grid, 0, 0);
            self.fill_box(&mut grid, 3, 3);
            self.fill_box(&mut grid, 6, 6);

            if solver.solve_randomized_in_place(&mut grid, &mut self.rng)
                && grid.find_conflicts().is_empty()
            {
                return grid;
            }
        }

        // A diagonal-seeded grid is always completable, so this path means
        // the seeding went wrong; a blank grid cannot fail to fill.
        let mut grid = Grid::new();
        solver.solve_randomized_in_place(&mut grid, &mut self.rng);
        grid
    }

    /// Fill a 3x3 box with a random permutation of 1-9
    fn fill_box(&mut self, grid: &mut Grid, start_row: usize, start_col: usize) {
        let mut values: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        self.rng.shuffle(&mut values);

        let mut idx = 0;
        for row in start_row..start_row + 3 {
            for col in start_col..start_col + 3 {
                grid.set(Position::new(row, col), Some(values[idx]));
                idx += 1;
            }
        }
    }

    /// Carve clues out of a complete grid while preserving a unique
    /// solution. Best effort: stops at the attempt budget or when no
    /// further cell can be removed, whichever comes first.
    fn remove_cells(&mut self, grid: &mut Grid) {
        let solver = Solver::new();
        let target = self.config.target_givens;
        let mut budget = REMOVAL_BUDGET;

        // Primary pass: one shuffled sweep over all positions
        let mut positions: Vec<Position> = Position::all().collect();
        self.rng.shuffle(&mut positions);

        for &pos in &positions {
            if grid.filled_count() <= target || budget == 0 {
                break;
            }
            Self::try_remove(grid, &solver, pos, &mut budget);
        }

        // Secondary passes: re-rank remaining cells by how many values
        // could currently occupy them, most-constrained last, and retry
        // the head of the list until nothing moves
        while grid.filled_count() > target && budget > 0 {
            let mut remaining: Vec<Position> = Position::all()
                .filter(|&pos| grid.get(pos).is_some())
                .collect();
            remaining
                .sort_by_key(|&pos| std::cmp::Reverse(grid.legal_candidates(pos).count()));

            let mut progressed = false;
            for &pos in remaining.iter().take(RERANK_TOP_N) {
                if grid.filled_count() <= target || budget == 0 {
                    break;
                }
                if Self::try_remove(grid, &solver, pos, &mut budget) {
                    progressed = true;
                }
            }
            if !progressed {
                break;
            }
        }
    }

    /// Tentatively clear one cell; keep the removal only if the grid stays
    /// conflict-free with exactly one solution, restoring it otherwise
    fn try_remove(grid: &mut Grid, solver: &Solver, pos: Position, budget: &mut usize) -> bool {
        let value = match grid.get(pos) {
            Some(value) => value,
            None => return false,
        };

        *budget -= 1;
        grid.set(pos, None);

        if grid.find_conflicts().is_empty() && solver.has_unique_solution(grid) {
            true
        } else {
            grid.set(pos, Some(value));
            false
        }
    }

    /// Full post-carve check: conflict-free, uniquely solvable back to the
    /// canonical solution, and every missing digit of every unit still
    /// placeable somewhere in that unit
    fn validate_puzzle(solver: &Solver, carved: &Grid, solution: &Grid) -> bool {
        if !carved.validate().is_valid {
            return false;
        }
        if !solver.has_unique_solution(carved) {
            return false;
        }
        match solver.solve(carved) {
            Some(solved) => solved.same_values(solution) && Self::all_digits_placeable(carved),
            None => false,
        }
    }

    fn all_digits_placeable(grid: &Grid) -> bool {
        let units: Vec<Vec<Position>> = (0..9)
            .map(|row| (0..9).map(|col| Position::new(row, col)).collect::<Vec<_>>())
            .chain((0..9).map(|col| (0..9).map(|row| Position::new(row, col)).collect::<Vec<_>>()))
            .chain((0..9).map(|box_idx| {
                let box_row = (box_idx / 3) * 3;
                let box_col = (box_idx % 3) * 3;
                (0..3)
                    .flat_map(|dr| (0..3).map(move |dc| Position::new(box_row + dr, box_col + dc)))
                    .collect::<Vec<_>>()
            }))
            .collect();

        units.iter().all(|unit| {
            (1..=9u8).all(|value| {
                unit.iter().any(|&pos| grid.get(pos) == Some(value))
                    || unit.iter().any(|&pos| {
                        grid.cell(pos).is_empty() && grid.is_valid_placement(pos, value)
                    })
            })
        })
    }

    /// Pre-vetted static puzzle for when generation exhausts its budget
    /// without producing a validated result
    fn fallback_puzzle(&self, difficulty: Difficulty) -> Puzzle {
        let (puzzle, solution) = match difficulty {
            Difficulty::Easy => (
                "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79",
                "534678912672195348198342567859761423426853791713924856961537284287419635345286179",
            ),
            Difficulty::Medium => (
                "..3.2.6..9..3.5..1..18.64....81.29..7.......8..67.82....26.95..8..2.3..9..5.1.3..",
                "483921657967345821251876493548132976729564138136798245372689514814253769695417382",
            ),
            Difficulty::Hard => (
                "8..........36......7..9.2...5...7.......457.....1...3...1....68..85...1..9....4..",
                "812753649943682175675491283154237896369845721287169534521974368438526917796318452",
            ),
        };

        // Table entries are vetted by tests; parsing them cannot fail.
        Puzzle::from_strings(puzzle, solution, difficulty).unwrap()
    }
}
