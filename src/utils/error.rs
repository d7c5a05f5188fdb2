use thiserror::Error;

/// Why a single cell failed to parse as a base-10 integer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIntegerError {
    #[error("cannot parse integer from empty string")]
    Empty,

    #[error("invalid digit found in string")]
    InvalidDigit,
}

/// Validation failures of a matrix. The first failing check is the only one reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("invalid input: empty matrix")]
    Empty,

    #[error("invalid input: matrix is not square")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid input: matrix has invalid number format")]
    InvalidNumber {
        row: usize,
        column: usize,
        token: String,
        #[source]
        source: ParseIntegerError,
    },
}

impl MatrixError {
    /// Text returned to the caller in place of a result.
    pub fn response_body(&self) -> String {
        match self {
            MatrixError::InvalidNumber { token, source, .. } => {
                format!("{}\n\tCaused by: parsing {:?}: {}\n", self, token, source)
            }
            _ => format!("{}\n", self),
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Upload error: {message}")]
    UploadError { message: String },

    #[error("Upload too large: {message}")]
    UploadTooLarge { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Evaluation task failed: {message}")]
    TaskError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The matrix itself was rejected.
    Validation,
    /// The input never became a matrix: bad upload or malformed delimited text.
    Input,
    Configuration,
    System,
}

impl EngineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::Matrix(_) => ErrorCategory::Validation,
            EngineError::CsvError(_)
            | EngineError::UploadError { .. }
            | EngineError::UploadTooLarge { .. } => ErrorCategory::Input,
            EngineError::ConfigError { .. }
            | EngineError::ConfigValidationError { .. }
            | EngineError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EngineError::IoError(_) | EngineError::TaskError { .. } => ErrorCategory::System,
        }
    }

    /// True for failures raised before a matrix existed.
    pub fn is_upstream(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    /// Body sent back for a failed request.
    pub fn response_body(&self) -> String {
        match self {
            EngineError::Matrix(e) => e.response_body(),
            other => format!("error {}", other),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EngineError::Matrix(MatrixError::Empty) => {
                "The input file contains no rows".to_string()
            }
            EngineError::Matrix(MatrixError::NotSquare {
                row,
                expected,
                found,
            }) => format!(
                "Row {} has {} values but the matrix has {} rows",
                row + 1,
                found,
                expected
            ),
            EngineError::Matrix(MatrixError::InvalidNumber {
                row, column, token, ..
            }) => format!(
                "Value {:?} at row {}, column {} is not an integer",
                token,
                row + 1,
                column + 1
            ),
            EngineError::CsvError(e) => {
                format!("The input could not be read as delimited text: {}", e)
            }
            EngineError::UploadError { message } => {
                format!("The upload could not be read: {}", message)
            }
            EngineError::UploadTooLarge { message } => {
                format!("The upload exceeds the size limit: {}", message)
            }
            EngineError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => {
                "Provide a square matrix (N rows of N values) containing only base-10 integers"
            }
            ErrorCategory::Input => {
                "Check the delimiter and quoting of the input, and send it as the 'file' form field"
            }
            ErrorCategory::Configuration => {
                "Check the command-line flags and the configuration file"
            }
            ErrorCategory::System => "Check that the file exists and is readable or writable",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Input => 2,
            ErrorCategory::Configuration => 1,
            ErrorCategory::System => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(feature = "server")]
impl axum::response::IntoResponse for EngineError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;
        let status = match self.category() {
            _ if matches!(self, EngineError::UploadTooLarge { .. }) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ErrorCategory::Validation | ErrorCategory::Input => StatusCode::BAD_REQUEST,
            ErrorCategory::Configuration | ErrorCategory::System => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.response_body()).into_response()
    }
}
