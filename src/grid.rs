use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A cell coordinate on the 9x9 board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < 9 && col < 9);
        Self { row, col }
    }

    /// Index of the 3x3 box containing this position (0..9, row-major)
    pub fn box_index(&self) -> usize {
        (self.row / 3) * 3 + self.col / 3
    }

    /// All 81 positions in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..9).flat_map(|row| (0..9).map(move |col| Position::new(row, col)))
    }
}

/// Set of candidate digits 1-9, packed into a bitmask.
///
/// Candidates are transient: they are recomputed from current legality on
/// demand and never stored per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CandidateSet(u16);

impl CandidateSet {
    pub const EMPTY: CandidateSet = CandidateSet(0);

    pub fn insert(&mut self, value: u8) {
        debug_assert!((1..=9).contains(&value));
        self.0 |= 1 << value;
    }

    pub fn remove(&mut self, value: u8) {
        self.0 &= !(1 << value);
    }

    pub fn contains(&self, value: u8) -> bool {
        self.0 & (1 << value) != 0
    }

    pub fn count(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// If exactly one candidate remains, return it
    pub fn single_value(&self) -> Option<u8> {
        if self.count() == 1 {
            Some(self.0.trailing_zeros() as u8)
        } else {
            None
        }
    }

    /// Iterate candidates in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=9u8).filter(move |&v| self.contains(v))
    }
}

/// A single cell: an optional value and a given (immutable clue) flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    value: Option<u8>,
    given: bool,
}

impl Cell {
    pub fn value(&self) -> Option<u8> {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_given(&self) -> bool {
        self.given
    }

    pub fn set_given(&mut self, given: bool) {
        self.given = given;
    }
}

/// One of the three kinds of uniqueness constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Row(usize),
    Col(usize),
    Box(usize),
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Row(i) => write!(f, "row {}", i + 1),
            Unit::Col(i) => write!(f, "column {}", i + 1),
            Unit::Box(i) => write!(f, "box {}", i + 1),
        }
    }
}

/// A duplicated value within a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub unit: Unit,
    pub value: u8,
}

/// Result of a full consistency scan
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub conflicts: Vec<Conflict>,
}

/// Malformed serialized puzzle input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected 81 characters, got {0}")]
    BadLength(usize),
    #[error("invalid character {ch:?} at index {index}")]
    BadChar { index: usize, ch: char },
    #[error("solution grid is incomplete or inconsistent")]
    UnsolvedSolution,
    #[error("clue at index {index} disagrees with the solution")]
    SolutionMismatch { index: usize },
}

/// The 9x9 board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Cell; 9]; 9],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self {
            cells: [[Cell::default(); 9]; 9],
        }
    }

    /// Parse an 81-character row-major string: `1`-`9` for clues, `.` for
    /// blanks. Anything else is rejected. Parsed clues become givens.
    pub fn from_string(s: &str) -> Result<Self, ParseError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 81 {
            return Err(ParseError::BadLength(chars.len()));
        }

        let mut grid = Grid::new();
        for (index, &ch) in chars.iter().enumerate() {
            let pos = Position::new(index / 9, index % 9);
            match ch {
                '.' => {}
                '1'..='9' => grid.set_given(pos, ch as u8 - b'0'),
                _ => return Err(ParseError::BadChar { index, ch }),
            }
        }
        Ok(grid)
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.row][pos.col]
    }

    pub fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        &mut self.cells[pos.row][pos.col]
    }

    pub fn get(&self, pos: Position) -> Option<u8> {
        self.cells[pos.row][pos.col].value
    }

    /// Set or clear a cell value without touching the given flag
    pub fn set(&mut self, pos: Position, value: Option<u8>) {
        debug_assert!(value.map_or(true, |v| (1..=9).contains(&v)));
        self.cells[pos.row][pos.col].value = value;
    }

    /// Set a cell value and mark it as a given clue
    pub fn set_given(&mut self, pos: Position, value: u8) {
        let cell = &mut self.cells[pos.row][pos.col];
        cell.value = Some(value);
        cell.given = true;
    }

    /// True iff no other cell in the same row, column, or box holds `value`.
    /// The cell at `pos` itself is excluded from the check.
    pub fn is_valid_placement(&self, pos: Position, value: u8) -> bool {
        for i in 0..9 {
            if i != pos.col && self.cells[pos.row][i].value == Some(value) {
                return false;
            }
            if i != pos.row && self.cells[i][pos.col].value == Some(value) {
                return false;
            }
        }
        let box_row = (pos.row / 3) * 3;
        let box_col = (pos.col / 3) * 3;
        for row in box_row..box_row + 3 {
            for col in box_col..box_col + 3 {
                if (row, col) != (pos.row, pos.col) && self.cells[row][col].value == Some(value) {
                    return false;
                }
            }
        }
        true
    }

    /// Digits that could legally occupy `pos` given current contents
    pub fn legal_candidates(&self, pos: Position) -> CandidateSet {
        let mut set = CandidateSet::EMPTY;
        for value in 1..=9 {
            if self.is_valid_placement(pos, value) {
                set.insert(value);
            }
        }
        set
    }

    /// Full consistency scan: report every unit holding a duplicated value.
    /// Never fails, only reports.
    pub fn find_conflicts(&self) -> Vec<Conflict> {
        let mut conflicts = Vec::new();

        for row in 0..9 {
            let values = (0..9).filter_map(|col| self.cells[row][col].value);
            Self::unit_duplicates(Unit::Row(row), values, &mut conflicts);
        }
        for col in 0..9 {
            let values = (0..9).filter_map(|row| self.cells[row][col].value);
            Self::unit_duplicates(Unit::Col(col), values, &mut conflicts);
        }
        for box_idx in 0..9 {
            let box_row = (box_idx / 3) * 3;
            let box_col = (box_idx % 3) * 3;
            let values = (0..3).flat_map(|dr| {
                (0..3).filter_map(move |dc| self.cells[box_row + dr][box_col + dc].value)
            });
            Self::unit_duplicates(Unit::Box(box_idx), values, &mut conflicts);
        }

        conflicts
    }

    fn unit_duplicates(
        unit: Unit,
        values: impl Iterator<Item = u8>,
        conflicts: &mut Vec<Conflict>,
    ) {
        let mut counts = [0u8; 10];
        for value in values {
            counts[value as usize] += 1;
        }
        for value in 1..=9u8 {
            if counts[value as usize] > 1 {
                conflicts.push(Conflict { unit, value });
            }
        }
    }

    /// Consistency scan packaged for callers that want a single verdict
    pub fn validate(&self) -> ValidationResult {
        let conflicts = self.find_conflicts();
        ValidationResult {
            is_valid: conflicts.is_empty(),
            conflicts,
        }
    }

    /// Every cell filled
    pub fn is_complete(&self) -> bool {
        self.cells
            .iter()
            .flatten()
            .all(|cell| cell.value.is_some())
    }

    /// Every cell filled and no unit holds a duplicate
    pub fn is_solved(&self) -> bool {
        self.is_complete() && self.find_conflicts().is_empty()
    }

    /// First empty cell in row-major order
    pub fn first_empty(&self) -> Option<Position> {
        Position::all().find(|&pos| self.cell(pos).is_empty())
    }

    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all()
            .filter(|&pos| self.cell(pos).is_empty())
            .collect()
    }

    pub fn given_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.given).count()
    }

    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.value.is_some())
            .count()
    }

    pub fn empty_count(&self) -> usize {
        81 - self.filled_count()
    }

    /// Cell-value equality, ignoring given flags
    pub fn same_values(&self, other: &Grid) -> bool {
        Position::all().all(|pos| self.get(pos) == other.get(pos))
    }

    /// The given-clue mask, parallel to the cell matrix
    pub fn given_mask(&self) -> [[bool; 9]; 9] {
        let mut mask = [[false; 9]; 9];
        for pos in Position::all() {
            mask[pos.row][pos.col] = self.cell(pos).is_given();
        }
        mask
    }

    /// Pretty multi-line rendering with box separators, for terminals
    pub fn to_display_string(&self) -> String {
        let mut out = String::new();
        for row in 0..9 {
            if row > 0 && row % 3 == 0 {
                out.push_str("------+-------+------\n");
            }
            for col in 0..9 {
                if col > 0 && col % 3 == 0 {
                    out.push_str("| ");
                }
                match self.cells[row][col].value {
                    Some(v) => out.push((b'0' + v) as char),
                    None => out.push('.'),
                }
                if col < 8 {
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Display for Grid {
    /// The canonical 81-character encoding, `.` for blanks
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for pos in Position::all() {
            match self.get(pos) {
                Some(v) => write!(f, "{v}")?,
                None => write!(f, ".")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIKI_PUZZLE: &str =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";

    #[test]
    fn test_parse_round_trip() {
        let grid = Grid::from_string(WIKI_PUZZLE).unwrap();
        assert_eq!(grid.to_string(), WIKI_PUZZLE);
        assert_eq!(grid.given_count(), 30);
        assert_eq!(grid.empty_count(), 51);
    }

    #[test]
    fn test_parse_marks_givens() {
        let grid = Grid::from_string(WIKI_PUZZLE).unwrap();
        assert!(grid.cell(Position::new(0, 0)).is_given());
        assert_eq!(grid.get(Position::new(0, 0)), Some(5));
        assert!(!grid.cell(Position::new(0, 2)).is_given());
        assert_eq!(grid.get(Position::new(0, 2)), None);
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert_eq!(Grid::from_string("53..7"), Err(ParseError::BadLength(5)));
        let long = WIKI_PUZZLE.to_owned() + ".";
        assert_eq!(Grid::from_string(&long), Err(ParseError::BadLength(82)));
    }

    #[test]
    fn test_parse_rejects_bad_char() {
        // '0' is not part of the encoding; blanks are '.'
        let zeros = WIKI_PUZZLE.replace('.', "0");
        assert_eq!(
            Grid::from_string(&zeros),
            Err(ParseError::BadChar { index: 2, ch: '0' })
        );
    }

    #[test]
    fn test_valid_placement_excludes_self() {
        let grid = Grid::from_string(WIKI_PUZZLE).unwrap();
        // (0,0) holds 5; re-placing 5 there conflicts with nothing else
        assert!(grid.is_valid_placement(Position::new(0, 0), 5));
        // but a second 5 elsewhere in row 0 is rejected
        assert!(!grid.is_valid_placement(Position::new(0, 2), 5));
    }

    #[test]
    fn test_valid_placement_checks_box() {
        let grid = Grid::from_string(WIKI_PUZZLE).unwrap();
        // box 0 already holds 9 at (2,1)
        assert!(!grid.is_valid_placement(Position::new(1, 1), 9));
    }

    #[test]
    fn test_legal_candidates() {
        let grid = Grid::from_string(WIKI_PUZZLE).unwrap();
        let cands = grid.legal_candidates(Position::new(0, 2));
        // row has 5,3,7; col has 9,8,6; box has 5,3,6,9,8
        for v in [3, 5, 6, 7, 8, 9] {
            assert!(!cands.contains(v), "{v} should be excluded");
        }
        for v in [1, 2, 4] {
            assert!(cands.contains(v), "{v} should be legal");
        }
    }

    #[test]
    fn test_find_conflicts_reports_duplicates() {
        let mut grid = Grid::new();
        grid.set(Position::new(0, 0), Some(5));
        grid.set(Position::new(0, 8), Some(5));
        let conflicts = grid.find_conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(
            conflicts[0],
            Conflict {
                unit: Unit::Row(0),
                value: 5
            }
        );
        assert!(!grid.validate().is_valid);
    }

    #[test]
    fn test_clean_grid_has_no_conflicts() {
        let grid = Grid::from_string(WIKI_PUZZLE).unwrap();
        assert!(grid.find_conflicts().is_empty());
        assert!(grid.validate().is_valid);
        assert!(!grid.is_solved());
    }

    #[test]
    fn test_candidate_set() {
        let mut set = CandidateSet::EMPTY;
        assert!(set.is_empty());
        set.insert(4);
        set.insert(7);
        assert_eq!(set.count(), 2);
        assert_eq!(set.single_value(), None);
        set.remove(7);
        assert_eq!(set.single_value(), Some(4));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_box_index() {
        assert_eq!(Position::new(0, 0).box_index(), 0);
        assert_eq!(Position::new(4, 4).box_index(), 4);
        assert_eq!(Position::new(8, 2).box_index(), 6);
        assert_eq!(Position::new(5, 8).box_index(), 5);
    }
}
