pub mod engine;
pub mod job;
pub mod pipeline;
pub mod reader;
pub mod transform;

pub use crate::domain::model::{Matrix, Operation, SquareMatrix};
pub use crate::domain::ports::{ConfigProvider, JobOutput, Pipeline, Storage};
pub use crate::utils::error::Result;
