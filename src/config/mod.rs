pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::Operation;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_delimiter, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "matrix-csv")]
#[command(about = "Validate a square integer matrix from a CSV file and transform it")]
pub struct CliConfig {
    /// Operation to apply to the matrix
    #[arg(value_enum)]
    pub operation: Operation,

    /// Path to the delimited input file
    pub input: String,

    #[arg(
        short,
        long,
        default_value = ",",
        value_parser = parse_delimiter,
        help = "Field delimiter of the input"
    )]
    pub delimiter: u8,

    #[arg(short, long, help = "Write the result to this file instead of stdout")]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
fn parse_delimiter(value: &str) -> std::result::Result<u8, String> {
    validate_delimiter("delimiter", value).map_err(|e| e.to_string())
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn operation(&self) -> Operation {
        self.operation
    }

    fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        validate_delimiter("delimiter", &(self.delimiter as char).to_string())?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments() {
        let config = CliConfig::try_parse_from([
            "matrix-csv",
            "invert",
            "matrix.csv",
            "-d",
            ";",
            "-o",
            "out.csv",
        ])
        .unwrap();
        assert_eq!(config.operation, Operation::Transpose);
        assert_eq!(config.input_path(), "matrix.csv");
        assert_eq!(config.delimiter(), b';');
        assert_eq!(config.output_path(), Some("out.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_delimiter_is_comma() {
        let config = CliConfig::try_parse_from(["matrix-csv", "sum", "matrix.csv"]).unwrap();
        assert_eq!(config.delimiter, b',');
        assert!(config.output.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(CliConfig::try_parse_from(["matrix-csv", "divide", "matrix.csv"]).is_err());
        assert!(
            CliConfig::try_parse_from(["matrix-csv", "sum", "matrix.csv", "-d", "::"]).is_err()
        );
        assert!(CliConfig::try_parse_from(["matrix-csv", "sum", "matrix.csv", "-d", " "]).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_input() {
        let config = CliConfig {
            operation: Operation::Sum,
            input: String::new(),
            delimiter: b',',
            output: None,
            verbose: false,
        };
        assert!(config.validate().is_err());
    }
}
