//! Reading a linear system from text.
//!
//! The format is a header with the number of equations `m` and the number of
//! unknowns `n`, followed by `m × (n+1)` integer coefficients in row-major
//! order, the last entry of each row being the constant. All tokens are
//! whitespace-separated. Only integer literals are accepted; non-integer
//! rationals arise as results of arithmetic, never as input.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::domains::rational::{Q, Rational, RationalField};
use crate::matrix::Matrix;
use crate::solve::LinearSystem;

fn parse_token<T: FromStr>(
    tokens: &mut std::str::SplitWhitespace,
    what: &str,
) -> Result<T, String> {
    let token = tokens
        .next()
        .ok_or_else(|| format!("Expected {}, found end of input", what))?;
    token
        .parse()
        .map_err(|_| format!("Expected {}, found `{}`", what, token))
}

/// Parse a linear system over the rationals from its text form.
pub fn parse_system(input: &str) -> Result<LinearSystem<RationalField>, String> {
    let mut tokens = input.split_whitespace();

    let m: u32 = parse_token(&mut tokens, "the number of equations")?;
    let n: u32 = parse_token(&mut tokens, "the number of unknowns")?;

    let mut data = Vec::with_capacity(m as usize * (n as usize + 1));
    for _ in 0..m as usize * (n as usize + 1) {
        let value: i64 = parse_token(&mut tokens, "an integer coefficient")?;
        data.push(Rational::from(value));
    }

    if let Some(extra) = tokens.next() {
        return Err(format!(
            "Trailing input after the last coefficient: `{}`",
            extra
        ));
    }

    let matrix = Matrix::from_linear(data, m, n + 1, Q).map_err(|e| e.to_string())?;
    LinearSystem::new(matrix).map_err(|e| e.to_string())
}

/// Load a linear system from a file.
pub fn load_system(path: &Path) -> Result<LinearSystem<RationalField>, String> {
    let input = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    parse_system(&input)
}

#[cfg(test)]
mod test {
    use super::parse_system;
    use crate::solve::SolveOutcome;

    #[test]
    fn well_formed() {
        let s = parse_system("2 2\n1 1 3\n1 -1 1\n").unwrap();

        assert_eq!(s.equations(), 2);
        assert_eq!(s.unknowns(), 2);
        assert_eq!(s.solve(), SolveOutcome::Unique(vec![2.into(), 1.into()]));
    }

    #[test]
    fn empty_system() {
        let s = parse_system("0 0").unwrap();
        assert_eq!(s.equations(), 0);
        assert_eq!(s.unknowns(), 0);
    }

    #[test]
    fn missing_header() {
        assert_eq!(
            parse_system("").unwrap_err(),
            "Expected the number of equations, found end of input"
        );
    }

    #[test]
    fn truncated_row() {
        assert_eq!(
            parse_system("1 2\n1 1").unwrap_err(),
            "Expected an integer coefficient, found end of input"
        );
    }

    #[test]
    fn non_integer_token() {
        assert_eq!(
            parse_system("1 1\n1/2 1").unwrap_err(),
            "Expected an integer coefficient, found `1/2`"
        );
    }

    #[test]
    fn trailing_tokens() {
        assert_eq!(
            parse_system("1 1\n1 1 7").unwrap_err(),
            "Trailing input after the last coefficient: `7`"
        );
    }
}
