use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grid of raw tokens exactly as read from the delimited input, row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matrix {
    cells: Vec<Vec<String>>,
}

impl Matrix {
    pub fn new(cells: Vec<Vec<String>>) -> Self {
        Self { cells }
    }

    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A validated N×N integer matrix.
///
/// Only produced by [`crate::core::transform::parse`], so every value has already been
/// parsed and the grid is known to be square and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareMatrix {
    size: usize,
    raw: Vec<String>,
    values: Vec<BigInt>,
}

impl SquareMatrix {
    pub(crate) fn new(size: usize, raw: Vec<String>, values: Vec<BigInt>) -> Self {
        debug_assert_eq!(raw.len(), size * size);
        debug_assert_eq!(values.len(), size * size);
        Self { size, raw, values }
    }

    /// Number of rows, which is also the number of columns.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Untrimmed rows in their original order.
    pub fn raw_rows(&self) -> impl Iterator<Item = &[String]> {
        self.raw.chunks(self.size)
    }

    /// Token at `row`, `column` with surrounding spaces removed.
    pub fn token(&self, row: usize, column: usize) -> &str {
        trim_token(&self.raw[row * self.size + column])
    }

    /// Trimmed tokens in row-major order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.raw.iter().map(|t| trim_token(t))
    }

    pub fn values(&self) -> &[BigInt] {
        &self.values
    }
}

/// Only U+0020 is stripped; tabs and other whitespace stay part of the token.
pub fn trim_token(token: &str) -> &str {
    token.trim_matches(' ')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Reproduce the rows as received
    Echo,
    /// Swap rows and columns
    #[serde(alias = "invert")]
    #[cfg_attr(feature = "cli", value(alias = "invert"))]
    Transpose,
    /// All values on a single line
    Flatten,
    /// Sum of all values
    Sum,
    /// Product of all values
    Multiply,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Echo,
        Operation::Transpose,
        Operation::Flatten,
        Operation::Sum,
        Operation::Multiply,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Echo => "echo",
            Operation::Transpose => "transpose",
            Operation::Flatten => "flatten",
            Operation::Sum => "sum",
            Operation::Multiply => "multiply",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation(pub String);

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operation '{}'", self.0)
    }
}

impl std::error::Error for UnknownOperation {}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "echo" => Ok(Operation::Echo),
            "transpose" | "invert" => Ok(Operation::Transpose),
            "flatten" => Ok(Operation::Flatten),
            "sum" => Ok(Operation::Sum),
            "multiply" => Ok(Operation::Multiply),
            _ => Err(UnknownOperation(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_operation_aliases_and_case() {
        assert_eq!("invert".parse::<Operation>().unwrap(), Operation::Transpose);
        assert_eq!("SUM".parse::<Operation>().unwrap(), Operation::Sum);
        assert_eq!(
            "divide".parse::<Operation>().unwrap_err().to_string(),
            "unknown operation 'divide'"
        );
    }

    #[test]
    fn test_trim_only_strips_spaces() {
        assert_eq!(trim_token("  12 "), "12");
        assert_eq!(trim_token("\t12"), "\t12");
    }

    #[test]
    fn test_matrix_from_rows() {
        let matrix = Matrix::from_rows([["1", "2"], ["3", "4"]]);
        assert_eq!(matrix.row_count(), 2);
        assert_eq!(matrix.rows()[1], vec!["3".to_string(), "4".to_string()]);
        assert!(Matrix::default().is_empty());
    }
}
