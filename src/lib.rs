pub mod config;
pub mod core;
pub mod domain;
#[cfg(feature = "server")]
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::core::{
    engine::MatrixEngine, job::MatrixJob, pipeline::FilePipeline, reader::GridReader,
};
pub use domain::model::{Matrix, Operation, SquareMatrix};
pub use domain::ports::JobOutput;
pub use utils::error::{EngineError, MatrixError, Result};
