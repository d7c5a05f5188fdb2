//! Validation and the whole-matrix transformations.
//!
//! Every function here is pure. Output rows are comma-separated and every result ends
//! with a newline, whatever delimiter the input used.

use crate::domain::model::{trim_token, Matrix, Operation, SquareMatrix};
use crate::utils::error::{MatrixError, ParseIntegerError};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

/// Parse a trimmed token as a base-10 integer with an optional leading sign.
pub fn parse_integer(token: &str) -> Result<BigInt, ParseIntegerError> {
    if token.is_empty() {
        return Err(ParseIntegerError::Empty);
    }

    let (sign, digits) = match token.strip_prefix('-') {
        Some(rest) => (Sign::Minus, rest),
        None => (Sign::Plus, token.strip_prefix('+').unwrap_or(token)),
    };

    // BigUint would also accept `_` separators, which are not part of the format.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseIntegerError::InvalidDigit);
    }

    let magnitude =
        BigUint::parse_bytes(digits.as_bytes(), 10).ok_or(ParseIntegerError::InvalidDigit)?;
    Ok(BigInt::from_biguint(sign, magnitude))
}

/// Check the matrix without keeping the parsed form.
pub fn validate(matrix: &Matrix) -> Result<(), MatrixError> {
    parse(matrix).map(|_| ())
}

/// Validate and parse in one pass.
///
/// Checks run in a fixed order and stop at the first failure: empty matrix, then each
/// row top to bottom, its length before its cells, cells left to right.
pub fn parse(matrix: &Matrix) -> Result<SquareMatrix, MatrixError> {
    if matrix.is_empty() {
        return Err(MatrixError::Empty);
    }

    // Buffers grow with the rows actually checked; a tall single-column grid
    // must not reserve row_count² cells before it is rejected.
    let size = matrix.row_count();
    let mut raw = Vec::new();
    let mut values = Vec::new();

    for (row, cells) in matrix.rows().iter().enumerate() {
        if cells.len() != size {
            return Err(MatrixError::NotSquare {
                row,
                expected: size,
                found: cells.len(),
            });
        }

        for (column, cell) in cells.iter().enumerate() {
            let value = parse_integer(trim_token(cell)).map_err(|source| {
                MatrixError::InvalidNumber {
                    row,
                    column,
                    token: trim_token(cell).to_string(),
                    source,
                }
            })?;
            raw.push(cell.clone());
            values.push(value);
        }
    }

    Ok(SquareMatrix::new(size, raw, values))
}

/// Rows exactly as received. Does not require a valid matrix.
pub fn echo(matrix: &Matrix) -> String {
    join_rows(matrix.rows().iter().map(|row| row.join(",")))
}

pub fn transpose(matrix: &SquareMatrix) -> String {
    let n = matrix.size();
    join_rows((0..n).map(|column| {
        (0..n)
            .map(|row| matrix.token(row, column))
            .collect::<Vec<_>>()
            .join(",")
    }))
}

pub fn flatten(matrix: &SquareMatrix) -> String {
    let mut line = matrix.tokens().collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

pub fn sum(matrix: &SquareMatrix) -> String {
    let total: BigInt = matrix.values().iter().sum();
    format!("{}\n", total)
}

pub fn multiply(matrix: &SquareMatrix) -> String {
    let product = if matrix.values().iter().any(Zero::is_zero) {
        BigInt::zero()
    } else {
        matrix
            .values()
            .iter()
            .fold(BigInt::one(), |acc, value| acc * value)
    };
    format!("{}\n", product)
}

/// Render a validated matrix for the requested operation.
pub fn render(operation: Operation, matrix: &SquareMatrix) -> String {
    match operation {
        Operation::Echo => join_rows(matrix.raw_rows().map(|row| row.join(","))),
        Operation::Transpose => transpose(matrix),
        Operation::Flatten => flatten(matrix),
        Operation::Sum => sum(matrix),
        Operation::Multiply => multiply(matrix),
    }
}

fn join_rows(rows: impl Iterator<Item = String>) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&row);
        out.push('\n');
    }
    out
}
