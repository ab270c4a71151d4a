//! Linearica is an exact linear-system solver over the rational numbers.
//!
//! All arithmetic is performed on canonical-form fractions, so there is no
//! floating-point rounding anywhere. A system is classified as inconsistent,
//! uniquely solvable, or underdetermined; for an underdetermined system,
//! every basic solution is enumerated by trying each size-`rank` subset of
//! the variables as a basis and zeroing the rest.
//!
//! For example:
//!
//! ```
//! use linearica::domains::rational::Q;
//! use linearica::matrix::Matrix;
//! use linearica::solve::{LinearSystem, SolveOutcome};
//!
//! // x + y = 3, x - y = 1
//! let m = Matrix::from_nested_vec(
//!     vec![
//!         vec![1.into(), 1.into(), 3.into()],
//!         vec![1.into(), (-1).into(), 1.into()],
//!     ],
//!     Q,
//! )
//! .unwrap();
//!
//! let system = LinearSystem::new(m).unwrap();
//! assert_eq!(system.solve(), SolveOutcome::Unique(vec![2.into(), 1.into()]));
//! ```
//!
//! The basis enumeration runs one elimination per candidate subset, a cost
//! of `C(n, rank)` reductions. It is intended for small systems.

pub mod combinatorics;
pub mod domains;
pub mod matrix;
pub mod parser;
pub mod printer;
pub mod solve;
