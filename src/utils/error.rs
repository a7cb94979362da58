use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Invalid parameter '{field}' = {value}: {reason}")]
    InvalidParameter {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown food type: {value}")]
    UnknownFoodType { value: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration parse error in {field}: {message}")]
    ConfigParseError { field: String, message: String },

    #[error("Export error: {message}")]
    ExportError { message: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Io,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskError {
    pub fn invalid_parameter(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        RiskError::InvalidParameter {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RiskError::InvalidParameter { .. } | RiskError::UnknownFoodType { .. } => {
                ErrorCategory::Input
            }
            RiskError::ConfigError { .. } | RiskError::ConfigParseError { .. } => {
                ErrorCategory::Configuration
            }
            RiskError::IoError(_) => ErrorCategory::Io,
            RiskError::ExportError { .. }
            | RiskError::ZipError(_)
            | RiskError::CsvError(_)
            | RiskError::SerializationError(_) => ErrorCategory::Export,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Export => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RiskError::InvalidParameter { field, .. } => format!(
                "Check '{}': temperature 0-50 °C, exposure 0-72 h, pH 3.5-7.5, water activity 0.85-1.0 (or pass --clamp)",
                field
            ),
            RiskError::UnknownFoodType { .. } => {
                "Use one of: Poultry, Dairy, Produce, Seafood".to_string()
            }
            RiskError::ConfigError { .. } | RiskError::ConfigParseError { .. } => {
                "Review the scenario file against the documented [batch]/[[scenarios]]/[export] layout".to_string()
            }
            RiskError::IoError(_) => {
                "Make sure the output directory exists and is writable".to_string()
            }
            RiskError::ExportError { .. }
            | RiskError::ZipError(_)
            | RiskError::CsvError(_)
            | RiskError::SerializationError(_) => {
                "Retry the export, or choose a different output format".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Simulation input rejected: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("File system problem: {}", self),
            ErrorCategory::Export => format!("Could not export results: {}", self),
        }
    }

    /// Process exit code for the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, RiskError>;
