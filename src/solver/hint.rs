//! Forced-move search: naked singles, then hidden singles.
//!
//! Candidates come from current legality only; nothing here mutates the
//! grid, and applying a suggested move is the caller's responsibility.

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Position};

/// Technique that justifies a hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Technique {
    NakedSingle,
    HiddenSingle,
}

impl std::fmt::Display for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Technique::NakedSingle => write!(f, "Naked Single"),
            Technique::HiddenSingle => write!(f, "Hidden Single"),
        }
    }
}

/// A forced next move for the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hint {
    pub pos: Position,
    pub value: u8,
    pub technique: Technique,
    /// Explanation of the hint
    pub explanation: String,
}

/// An empty cell with exactly one legal candidate. Cells are scanned in
/// row-major order; first match wins.
pub(crate) fn find_naked_single(grid: &Grid) -> Option<Hint> {
    for pos in Position::all() {
        if !grid.cell(pos).is_empty() {
            continue;
        }
        if let Some(value) = grid.legal_candidates(pos).single_value() {
            return Some(Hint {
                pos,
                value,
                technique: Technique::NakedSingle,
                explanation: format!(
                    "Cell ({}, {}) can only be {} - it's the only candidate left.",
                    pos.row + 1,
                    pos.col + 1,
                    value
                ),
            });
        }
    }
    None
}

/// A digit confined to exactly one empty cell within some unit. Rows are
/// scanned first, then columns, then boxes.
pub(crate) fn find_hidden_single(grid: &Grid) -> Option<Hint> {
    for row in 0..9 {
        for value in 1..=9u8 {
            let cells = (0..9).map(|col| Position::new(row, col));
            if let Some(pos) = sole_home(grid, cells, value) {
                return Some(Hint {
                    pos,
                    value,
                    technique: Technique::HiddenSingle,
                    explanation: format!(
                        "{} can only go in cell ({}, {}) in row {}.",
                        value,
                        pos.row + 1,
                        pos.col + 1,
                        row + 1
                    ),
                });
            }
        }
    }

    for col in 0..9 {
        for value in 1..=9u8 {
            let cells = (0..9).map(|row| Position::new(row, col));
            if let Some(pos) = sole_home(grid, cells, value) {
                return Some(Hint {
                    pos,
                    value,
                    technique: Technique::HiddenSingle,
                    explanation: format!(
                        "{} can only go in cell ({}, {}) in column {}.",
                        value,
                        pos.row + 1,
                        pos.col + 1,
                        col + 1
                    ),
                });
            }
        }
    }

    for box_idx in 0..9 {
        let box_row = (box_idx / 3) * 3;
        let box_col = (box_idx % 3) * 3;
        for value in 1..=9u8 {
            let cells = (0..3).flat_map(|dr| {
                (0..3).map(move |dc| Position::new(box_row + dr, box_col + dc))
            });
            if let Some(pos) = sole_home(grid, cells, value) {
                return Some(Hint {
                    pos,
                    value,
                    technique: Technique::HiddenSingle,
                    explanation: format!(
                        "{} can only go in cell ({}, {}) in box {}.",
                        value,
                        pos.row + 1,
                        pos.col + 1,
                        box_idx + 1
                    ),
                });
            }
        }
    }

    None
}

/// The single empty cell of a unit that can legally hold `value`, if the
/// unit neither contains `value` nor offers it a second home.
fn sole_home(
    grid: &Grid,
    cells: impl Iterator<Item = Position>,
    value: u8,
) -> Option<Position> {
    let mut home = None;
    for pos in cells {
        if grid.get(pos) == Some(value) {
            return None;
        }
        if grid.cell(pos).is_empty() && grid.is_valid_placement(pos, value) {
            if home.is_some() {
                return None;
            }
            home = Some(pos);
        }
    }
    home
}
