use crate::core::{JobOutput, Pipeline};
use crate::utils::error::Result;

pub struct MatrixJob<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> MatrixJob<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<JobOutput> {
        tracing::info!("Starting matrix job");

        let matrix = self.pipeline.extract().await?;
        tracing::info!("Extracted {} rows", matrix.row_count());

        let output = self.pipeline.transform(matrix).await?;
        tracing::debug!("Rendered {} bytes", output.len());

        let result = self.pipeline.load(output).await?;
        if let JobOutput::Written { path, bytes } = &result {
            tracing::info!("Output saved to: {} ({} bytes)", path, bytes);
        }

        Ok(result)
    }
}
