use crate::core::engine::MatrixEngine;
use crate::core::{ConfigProvider, JobOutput, Pipeline, Storage};
use crate::domain::model::Matrix;
use crate::utils::error::Result;

/// Reads a matrix file through [`Storage`], applies the configured operation and either
/// writes the result back through storage or returns it.
pub struct FilePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    engine: MatrixEngine,
}

impl<S: Storage, C: ConfigProvider> FilePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let engine = MatrixEngine::with_delimiter(config.delimiter());
        Self {
            storage,
            config,
            engine,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FilePipeline<S, C> {
    async fn extract(&self) -> Result<Matrix> {
        let path = self.config.input_path();
        tracing::debug!("Reading matrix from: {}", path);
        let data = self.storage.read_file(path).await?;
        self.engine.reader().read(&data)
    }

    async fn transform(&self, matrix: Matrix) -> Result<String> {
        let operation = self.config.operation();
        Ok(self.engine.evaluate(operation, &matrix)?)
    }

    async fn load(&self, output: String) -> Result<JobOutput> {
        match self.config.output_path() {
            Some(path) => {
                tracing::debug!("Writing {} bytes to storage", output.len());
                self.storage.write_file(path, output.as_bytes()).await?;
                Ok(JobOutput::Written {
                    path: path.to_string(),
                    bytes: output.len(),
                })
            }
            None => Ok(JobOutput::Returned(output)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Operation;
    use crate::utils::error::{EngineError, MatrixError};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &[u8]) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EngineError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        operation: Operation,
        delimiter: u8,
        output_path: Option<String>,
    }

    impl MockConfig {
        fn new(operation: Operation) -> Self {
            Self {
                operation,
                delimiter: b',',
                output_path: None,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            "matrix.csv"
        }

        fn operation(&self) -> Operation {
            self.operation
        }

        fn delimiter(&self) -> u8 {
            self.delimiter
        }

        fn output_path(&self) -> Option<&str> {
            self.output_path.as_deref()
        }
    }

    #[tokio::test]
    async fn test_extract_reads_grid() {
        let storage = MockStorage::with_file("matrix.csv", b"1,2\n3,4\n");
        let pipeline = FilePipeline::new(storage, MockConfig::new(Operation::Echo));

        let matrix = pipeline.extract().await.unwrap();
        assert_eq!(matrix, Matrix::from_rows([["1", "2"], ["3", "4"]]));
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let storage = MockStorage::with_file("other.csv", b"1");
        let pipeline = FilePipeline::new(storage, MockConfig::new(Operation::Echo));

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, EngineError::IoError(_)));
    }

    #[tokio::test]
    async fn test_transform_uses_configured_operation() {
        let storage = MockStorage::with_file("matrix.csv", b"");
        let pipeline = FilePipeline::new(storage, MockConfig::new(Operation::Multiply));

        let matrix = Matrix::from_rows([["2", "3"], ["4", "5"]]);
        assert_eq!(pipeline.transform(matrix).await.unwrap(), "120\n");
    }

    #[tokio::test]
    async fn test_transform_rejects_invalid_matrix() {
        let storage = MockStorage::with_file("matrix.csv", b"");
        let pipeline = FilePipeline::new(storage, MockConfig::new(Operation::Sum));

        let err = pipeline.transform(Matrix::default()).await.unwrap_err();
        assert!(matches!(err, EngineError::Matrix(MatrixError::Empty)));
    }

    #[tokio::test]
    async fn test_load_writes_when_output_configured() {
        let storage = MockStorage::with_file("matrix.csv", b"");
        let mut config = MockConfig::new(Operation::Sum);
        config.output_path = Some("result.txt".to_string());
        let pipeline = FilePipeline::new(storage.clone(), config);

        let output = pipeline.load("10\n".to_string()).await.unwrap();
        assert_eq!(
            output,
            JobOutput::Written {
                path: "result.txt".to_string(),
                bytes: 3
            }
        );
        assert_eq!(storage.get_file("result.txt").await.unwrap(), b"10\n");
    }

    #[tokio::test]
    async fn test_load_returns_without_output() {
        let storage = MockStorage::with_file("matrix.csv", b"");
        let pipeline = FilePipeline::new(storage, MockConfig::new(Operation::Sum));

        let output = pipeline.load("10\n".to_string()).await.unwrap();
        assert_eq!(output, JobOutput::Returned("10\n".to_string()));
    }

    #[tokio::test]
    async fn test_semicolon_delimited_input() {
        let storage = MockStorage::with_file("matrix.csv", b"1;2\n3;4\n");
        let mut config = MockConfig::new(Operation::Flatten);
        config.delimiter = b';';
        let pipeline = FilePipeline::new(storage, config);

        let matrix = pipeline.extract().await.unwrap();
        assert_eq!(pipeline.transform(matrix).await.unwrap(), "1,2,3,4\n");
    }
}
