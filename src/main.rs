use std::env;
use std::path::Path;

use colored::Colorize;
use linearica::domains::rational::Q;
use linearica::matrix::EliminationStep;
use linearica::solve::{LinearSystem, SolveOutcome};
use linearica::{parser, printer};

fn main() {
    let path = env::args().nth(1).unwrap_or_else(|| "system.txt".to_owned());

    let system = match parser::load_system(Path::new(&path)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} {}", "Warning:".yellow(), e);
            eprintln!("Proceeding with an empty system.");
            LinearSystem::empty(Q)
        }
    };

    println!("Initial matrix:");
    print!("{}", printer::format_table(system.matrix()));

    let mut steps = Vec::new();
    let (reduced, reduction) = system.reduce_traced(&mut steps);

    // Replay the recorded steps on a copy so every intermediate matrix can
    // be shown without the engine doing any output itself.
    let mut work = system.matrix().clone();
    let mut iter = steps.iter().peekable();
    while let Some(step) = iter.next() {
        println!("{}", printer::format_step(step));
        step.apply_to(&mut work);

        let column_done = iter
            .peek()
            .map_or(true, |next| next.column() != step.column());
        if column_done && !matches!(step, EliminationStep::ColumnSkipped { .. }) {
            println!("After elimination for column {}:", step.column() + 1);
            print!("{}", printer::format_table(&work));
        }
    }

    println!();
    let outcome = system.solve();
    print!("{}", printer::format_outcome(&outcome));

    if matches!(outcome, SolveOutcome::Underdetermined { .. }) {
        println!();
        print!("{}", printer::format_general_solution(&reduced, &reduction));
    }
}
