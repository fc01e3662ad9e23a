//! Basic example of using the Sudoku engine

use sudoku_engine::{Difficulty, Generator, Grid, Solver};

fn main() {
    // Generate a puzzle
    println!("Generating a Medium difficulty puzzle...\n");
    let mut generator = Generator::new();
    let puzzle = generator.generate(Difficulty::Medium);

    println!("Generated puzzle:");
    println!("{}", puzzle.grid.to_display_string());

    // Show some stats
    println!("Given cells: {}", puzzle.grid.given_count());
    println!("Empty cells: {}", puzzle.grid.empty_count());
    println!("Difficulty: {}\n", puzzle.difficulty);

    // Solve it
    println!("Solving...\n");
    let solver = Solver::new();
    if let Some(solution) = solver.solve(&puzzle.grid) {
        println!("Solution:");
        println!("{}", solution.to_display_string());
    } else {
        println!("No solution found (this shouldn't happen for a generated puzzle!)");
    }

    // Get a hint for the puzzle
    println!("Getting a hint for the original puzzle:");
    if let Some(hint) = solver.get_hint(&puzzle.grid) {
        println!("Technique: {}", hint.technique);
        println!("Explanation: {}", hint.explanation);
    } else {
        println!("No forced move available - fall back to strategy text.");
    }

    // Parse a puzzle from a string
    println!("\n--- Parsing a puzzle from string ---\n");
    let puzzle_string =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
    match Grid::from_string(puzzle_string) {
        Ok(grid) => {
            println!("Parsed puzzle:");
            println!("{}", grid.to_display_string());

            // Check uniqueness
            let solutions = solver.count_solutions(&grid, 2);
            println!("Number of solutions (up to 2): {}", solutions);
        }
        Err(err) => println!("Failed to parse puzzle: {}", err),
    }
}
