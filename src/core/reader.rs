use crate::domain::model::Matrix;
use crate::utils::error::Result;

/// Turns delimited text into a grid of raw tokens.
///
/// Records may differ in length; squareness is checked by validation, not here.
#[derive(Debug, Clone, Copy)]
pub struct GridReader {
    delimiter: u8,
}

impl GridReader {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn read(&self, input: &[u8]) -> Result<Matrix> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(input);

        let mut cells: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record?;
            cells.push(record.iter().map(str::to_string).collect());
        }

        tracing::debug!("Read {} rows from {} bytes", cells.len(), input.len());
        Ok(Matrix::new(cells))
    }
}

impl Default for GridReader {
    fn default() -> Self {
        Self::new(b',')
    }
}
