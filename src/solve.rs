//! Classification of linear systems and enumeration of their basic solutions.
//!
//! A [LinearSystem] owns an augmented matrix of `m` equations in `n`
//! unknowns. [LinearSystem::solve] reduces a copy of the matrix and
//! classifies the system as inconsistent, uniquely solvable, or
//! underdetermined. For an underdetermined system, every size-`rank` subset
//! of the variables is tried as a basis: the columns are reordered, the
//! reduced system is accepted only when the chosen columns are independent,
//! and the resulting solution vector is validated against the original
//! equations and de-duplicated.

use ahash::HashSet;

use crate::combinatorics::CombinationIterator;
use crate::domains::Field;
use crate::matrix::{EliminationStep, Matrix, MatrixError, Reduction};

/// A system of linear equations, stored as an augmented matrix whose last
/// column holds the constants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearSystem<F: Field> {
    matrix: Matrix<F>,
    unknowns: u32,
}

/// A basic solution of an underdetermined system: the free variables are
/// zero and each basis variable is determined by the reduced system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicSolution<F: Field> {
    /// The variable columns chosen as the basis, in ascending order.
    pub basis_columns: Vec<u32>,
    /// The solution vector, indexed by the original variable order.
    pub values: Vec<F::Element>,
}

/// The outcome of a solve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome<F: Field> {
    /// Some equation reduced to `0 = c` with a non-zero `c`.
    Inconsistent,
    /// The rank equals the number of unknowns; the single solution vector.
    Unique(Vec<F::Element>),
    /// The rank is less than the number of unknowns. The basic solutions are
    /// listed in discovery order and may be empty when no variable subset
    /// forms an independent basis.
    Underdetermined {
        rank: u32,
        free_columns: Vec<u32>,
        basic_solutions: Vec<BasicSolution<F>>,
    },
}

impl<F: Field> LinearSystem<F> {
    /// Create a system from an `m × (n+1)` augmented matrix.
    pub fn new(matrix: Matrix<F>) -> Result<LinearSystem<F>, MatrixError> {
        if matrix.ncols() == 0 {
            return Err(MatrixError::MissingConstantColumn);
        }

        let unknowns = matrix.ncols() as u32 - 1;
        Ok(LinearSystem { matrix, unknowns })
    }

    /// The system with no equations and no unknowns.
    pub fn empty(field: F) -> LinearSystem<F> {
        LinearSystem {
            matrix: Matrix::new(0, 1, field),
            unknowns: 0,
        }
    }

    /// The number of unknowns `n`.
    pub fn unknowns(&self) -> u32 {
        self.unknowns
    }

    /// The number of equations `m`.
    pub fn equations(&self) -> u32 {
        self.matrix.nrows() as u32
    }

    /// The augmented matrix as loaded, untouched by any reduction.
    pub fn matrix(&self) -> &Matrix<F> {
        &self.matrix
    }

    /// Row-reduce a copy of the augmented matrix over the variable columns.
    pub fn reduce(&self) -> (Matrix<F>, Reduction) {
        let mut m = self.matrix.clone();
        let red = m.reduce(self.unknowns);
        (m, red)
    }

    /// Like [LinearSystem::reduce], but records every row operation.
    pub fn reduce_traced(
        &self,
        steps: &mut Vec<EliminationStep<F>>,
    ) -> (Matrix<F>, Reduction) {
        let mut m = self.matrix.clone();
        let red = m.reduce_traced(self.unknowns, steps);
        (m, red)
    }

    /// Classify the system and collect its solutions.
    pub fn solve(&self) -> SolveOutcome<F> {
        let (reduced, reduction) = self.reduce();

        if !reduced.is_consistent(self.unknowns) {
            return SolveOutcome::Inconsistent;
        }

        if reduction.rank == self.unknowns {
            let mut values = vec![self.matrix.field().zero(); self.unknowns as usize];
            for (row, &col) in reduction.pivot_columns.iter().enumerate() {
                values[col as usize] = reduced[(row as u32, self.unknowns)].clone();
            }
            return SolveOutcome::Unique(values);
        }

        SolveOutcome::Underdetermined {
            rank: reduction.rank,
            free_columns: reduction.free_columns,
            basic_solutions: self.enumerate_bases(reduction.rank),
        }
    }

    /// Try every size-`rank` subset of the variable columns as a basis and
    /// collect the distinct validated basic solutions in discovery order.
    fn enumerate_bases(&self, rank: u32) -> Vec<BasicSolution<F>> {
        let n = self.unknowns;
        let field = self.matrix.field().clone();

        let mut seen: HashSet<Vec<F::Element>> = HashSet::default();
        let mut accepted = vec![];

        let mut combinations = CombinationIterator::new(n, rank);
        while let Some(basis) = combinations.next() {
            let mut trial = self.reordered(basis);
            let red = trial.reduce(n);

            // The chosen columns form a basis only when every pivot lands on
            // the diagonal of the reordered matrix.
            if red.rank != rank
                || !red
                    .pivot_columns
                    .iter()
                    .enumerate()
                    .all(|(i, &c)| c == i as u32)
            {
                continue;
            }

            if !trial.is_consistent(n) {
                continue;
            }

            let mut values = vec![field.zero(); n as usize];
            for (row, &col) in basis.iter().enumerate() {
                values[col as usize] = trial[(row as u32, n)].clone();
            }

            if !self.is_solution(&values) {
                continue;
            }

            // Distinct basis choices can produce the same vector.
            if seen.insert(values.clone()) {
                accepted.push(BasicSolution {
                    basis_columns: basis.to_vec(),
                    values,
                });
            }
        }

        accepted
    }

    /// Build a copy of the augmented matrix with the `basis` columns first,
    /// the remaining variable columns next in ascending order, and the
    /// constant column last.
    fn reordered(&self, basis: &[u32]) -> Matrix<F> {
        let n = self.unknowns;

        let mut order: Vec<u32> = basis.to_vec();
        order.extend((0..n).filter(|c| !basis.contains(c)));
        order.push(n);

        let mut m = Matrix::new(self.matrix.nrows() as u32, n + 1, self.matrix.field().clone());
        for r in 0..self.matrix.nrows() as u32 {
            for (dst, &src) in order.iter().enumerate() {
                m[(r, dst as u32)] = self.matrix[(r, src)].clone();
            }
        }

        m
    }

    /// Substitute `candidate` into every original equation and check that
    /// each one holds exactly.
    pub fn is_solution(&self, candidate: &[F::Element]) -> bool {
        if candidate.len() != self.unknowns as usize {
            return false;
        }

        let field = self.matrix.field();
        for r in 0..self.matrix.nrows() as u32 {
            let mut lhs = field.zero();
            for (c, x) in candidate.iter().enumerate() {
                field.add_mul_assign(&mut lhs, &self.matrix[(r, c as u32)], x);
            }

            if lhs != self.matrix[(r, self.unknowns)] {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod test {
    use crate::domains::rational::{Rational, RationalField, Q};
    use crate::matrix::Matrix;
    use crate::solve::{LinearSystem, SolveOutcome};

    fn system(rows: Vec<Vec<Rational>>) -> LinearSystem<RationalField> {
        LinearSystem::new(Matrix::from_nested_vec(rows, Q).unwrap()).unwrap()
    }

    #[test]
    fn unique() {
        // x + y = 3, x - y = 1
        let s = system(vec![
            vec![1.into(), 1.into(), 3.into()],
            vec![1.into(), (-1).into(), 1.into()],
        ]);

        assert_eq!(s.solve(), SolveOutcome::Unique(vec![2.into(), 1.into()]));
    }

    #[test]
    fn inconsistent() {
        // x + y = 1, x + y = 2
        let s = system(vec![
            vec![1.into(), 1.into(), 1.into()],
            vec![1.into(), 1.into(), 2.into()],
        ]);

        assert_eq!(s.solve(), SolveOutcome::Inconsistent);
    }

    #[test]
    fn underdetermined() {
        // x + y = 1
        let s = system(vec![vec![1.into(), 1.into(), 1.into()]]);

        let SolveOutcome::Underdetermined {
            rank,
            free_columns,
            basic_solutions,
        } = s.solve()
        else {
            panic!("expected an underdetermined system");
        };

        assert_eq!(rank, 1);
        assert_eq!(free_columns, vec![1]);
        assert_eq!(basic_solutions.len(), 2);
        assert_eq!(basic_solutions[0].basis_columns, vec![0]);
        assert_eq!(
            basic_solutions[0].values,
            vec![Rational::from(1), Rational::from(0)]
        );
        assert_eq!(basic_solutions[1].basis_columns, vec![1]);
        assert_eq!(
            basic_solutions[1].values,
            vec![Rational::from(0), Rational::from(1)]
        );
    }

    #[test]
    fn dependent_columns_rejected() {
        // x1 + x2 = 2 and its double: rank 1, with a zero column for x3.
        let s = system(vec![
            vec![1.into(), 1.into(), 0.into(), 2.into()],
            vec![2.into(), 2.into(), 0.into(), 4.into()],
        ]);

        let SolveOutcome::Underdetermined {
            rank,
            basic_solutions,
            ..
        } = s.solve()
        else {
            panic!("expected an underdetermined system");
        };

        // {x3} is a singular basis (its column is zero), so only {x1} and
        // {x2} are accepted.
        assert_eq!(rank, 1);
        assert_eq!(basic_solutions.len(), 2);
        assert_eq!(
            basic_solutions[0].values,
            vec![Rational::from(2), Rational::from(0), Rational::from(0)]
        );
        assert_eq!(
            basic_solutions[1].values,
            vec![Rational::from(0), Rational::from(2), Rational::from(0)]
        );
    }

    #[test]
    fn duplicate_vectors_are_merged() {
        // x + y = 0: the bases {x} and {y} both yield the zero vector.
        let s = system(vec![vec![1.into(), 1.into(), 0.into()]]);

        let SolveOutcome::Underdetermined {
            basic_solutions, ..
        } = s.solve()
        else {
            panic!("expected an underdetermined system");
        };

        assert_eq!(basic_solutions.len(), 1);
        assert_eq!(basic_solutions[0].basis_columns, vec![0]);
        assert_eq!(
            basic_solutions[0].values,
            vec![Rational::from(0), Rational::from(0)]
        );
    }

    #[test]
    fn empty_system() {
        let s = LinearSystem::empty(Q);
        assert_eq!(s.unknowns(), 0);
        assert_eq!(s.equations(), 0);
        assert_eq!(s.solve(), SolveOutcome::Unique(vec![]));
    }

    #[test]
    fn validator() {
        let s = system(vec![
            vec![1.into(), 2.into(), 5.into()],
            vec![3.into(), (-1).into(), 1.into()],
        ]);

        assert!(s.is_solution(&[1.into(), 2.into()]));
        assert!(!s.is_solution(&[2.into(), 1.into()]));
        assert!(!s.is_solution(&[1.into()]));
    }

    #[test]
    fn fractional_results_from_integer_input() {
        // 2x + 4y = 1 has basic solutions x = 1/2 and y = 1/4.
        let s = system(vec![vec![2.into(), 4.into(), 1.into()]]);

        let SolveOutcome::Underdetermined {
            basic_solutions, ..
        } = s.solve()
        else {
            panic!("expected an underdetermined system");
        };

        assert_eq!(
            basic_solutions[0].values,
            vec![Rational::new(1, 2), 0.into()]
        );
        assert_eq!(
            basic_solutions[1].values,
            vec![0.into(), Rational::new(1, 4)]
        );
    }
}
