use crate::core::reader::GridReader;
use crate::core::transform;
use crate::domain::model::{Matrix, Operation};
use crate::utils::error::{MatrixError, Result};

/// Single entry point for every operation: raw input in, rendered text or an error out.
///
/// Holds no mutable state, so one instance can serve any number of concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixEngine {
    reader: GridReader,
}

impl MatrixEngine {
    pub fn new(reader: GridReader) -> Self {
        Self { reader }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self::new(GridReader::new(delimiter))
    }

    pub fn reader(&self) -> &GridReader {
        &self.reader
    }

    pub fn run(&self, operation: Operation, input: &[u8]) -> Result<String> {
        let matrix = self.reader.read(input)?;
        Ok(self.evaluate(operation, &matrix)?)
    }

    /// Validate `matrix`, then render it. Nothing is produced unless validation passes.
    pub fn evaluate(
        &self,
        operation: Operation,
        matrix: &Matrix,
    ) -> std::result::Result<String, MatrixError> {
        let square = match transform::parse(matrix) {
            Ok(square) => square,
            Err(e) => {
                tracing::debug!(%operation, rows = matrix.row_count(), "Matrix rejected: {:?}", e);
                return Err(e);
            }
        };

        tracing::debug!(%operation, size = square.size(), "Evaluating matrix");
        Ok(transform::render(operation, &square))
    }
}
