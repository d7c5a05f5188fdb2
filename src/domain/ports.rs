use crate::domain::model::{Matrix, Operation};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn operation(&self) -> Operation;
    fn delimiter(&self) -> u8;
    /// Where to write the result; `None` hands it back to the caller.
    fn output_path(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Matrix>;
    async fn transform(&self, matrix: Matrix) -> Result<String>;
    async fn load(&self, output: String) -> Result<JobOutput>;
}

/// Where a finished job left its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutput {
    Written { path: String, bytes: usize },
    Returned(String),
}
