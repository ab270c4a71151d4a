//! Rendering of matrices, elimination steps, and solve outcomes.
//!
//! The engine performs no output of its own; everything user-visible is
//! formatted here from the structures the engine returns.

use std::fmt::Write;

use crate::domains::rational::RationalField;
use crate::domains::{Field, Ring};
use crate::matrix::{EliminationStep, Matrix, Reduction};
use crate::solve::SolveOutcome;

/// Format a matrix as an aligned table, one row per line.
pub fn format_table<F: Ring>(matrix: &Matrix<F>) -> String {
    let entries: Vec<Vec<String>> = matrix
        .row_iter()
        .map(|r| r.iter().map(|e| e.to_string()).collect())
        .collect();

    let width = entries
        .iter()
        .flatten()
        .map(|e| e.len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for row in &entries {
        for (ci, e) in row.iter().enumerate() {
            if ci > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{:>width$}", e, width = width);
        }
        out.push('\n');
    }

    out
}

/// Describe a single elimination step. Rows and columns are shown 1-based.
pub fn format_step<F: Ring>(step: &EliminationStep<F>) -> String {
    match step {
        EliminationStep::PivotSelected {
            column,
            pivot_row,
            swapped_with,
        } => {
            if pivot_row == swapped_with {
                format!("column {}: pivot in row {}", column + 1, pivot_row + 1)
            } else {
                format!(
                    "column {}: row {} swapped into pivot row {}",
                    column + 1,
                    swapped_with + 1,
                    pivot_row + 1
                )
            }
        }
        EliminationStep::RowNormalized { row, divisor, .. } => {
            format!("row {} divided by {}", row + 1, divisor)
        }
        EliminationStep::RowEliminated {
            row,
            pivot_row,
            factor,
            ..
        } => format!(
            "row {} reduced by {} times row {}",
            row + 1,
            factor,
            pivot_row + 1
        ),
        EliminationStep::ColumnSkipped { column } => {
            format!("column {}: no pivot, x{} is free", column + 1, column + 1)
        }
    }
}

/// Format the outcome of a solve.
pub fn format_outcome<F: Field>(outcome: &SolveOutcome<F>) -> String {
    match outcome {
        SolveOutcome::Inconsistent => "System has NO solution.\n".to_owned(),
        SolveOutcome::Unique(values) => {
            let mut out = String::from("System has a UNIQUE solution:\n");
            for (i, v) in values.iter().enumerate() {
                let _ = writeln!(out, "x{} = {}", i + 1, v);
            }
            out
        }
        SolveOutcome::Underdetermined {
            rank,
            basic_solutions,
            ..
        } => {
            let mut out = String::from("System has INFINITE solutions.\n");
            let _ = writeln!(
                out,
                "rank {}, {} basic solution(s):",
                rank,
                basic_solutions.len()
            );
            for sol in basic_solutions {
                let basis = sol
                    .basis_columns
                    .iter()
                    .map(|c| format!("x{}", c + 1))
                    .collect::<Vec<_>>()
                    .join(", ");
                let values = sol
                    .values
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = writeln!(out, "basis {{{}}}: ({})", basis, values);
            }
            out
        }
    }
}

/// Format the general solution of an underdetermined system: each basis
/// variable as an affine expression in the free variables, read off the
/// reduced matrix.
pub fn format_general_solution(
    reduced: &Matrix<RationalField>,
    reduction: &Reduction,
) -> String {
    let n = reduced.ncols() as u32 - 1;

    let mut out = String::from("General solution:\n");

    for (row, &basic) in reduction.pivot_columns.iter().enumerate() {
        let row = row as u32;
        let _ = write!(out, "x{} = ", basic + 1);

        let mut first_term = true;

        let constant = reduced[(row, n)];
        if !constant.is_zero() {
            let _ = write!(out, "{}", constant);
            first_term = false;
        }

        for &free in &reduction.free_columns {
            // The reduced row reads x_basic + c * x_free = constant.
            let mut coeff = -reduced[(row, free)];
            if coeff.is_zero() {
                continue;
            }

            if !first_term {
                out.push_str(if coeff.is_negative() { " - " } else { " + " });
                coeff = coeff.abs();
            } else if coeff.is_negative() {
                out.push('-');
                coeff = coeff.abs();
            }

            if coeff.is_one() {
                let _ = write!(out, "x{}", free + 1);
            } else {
                let _ = write!(out, "{}*x{}", coeff, free + 1);
            }

            first_term = false;
        }

        if first_term {
            out.push('0');
        }

        out.push('\n');
    }

    if !reduction.free_columns.is_empty() {
        let free = reduction
            .free_columns
            .iter()
            .map(|c| format!("x{}", c + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "where {} are free parameters", free);
    }

    out
}
