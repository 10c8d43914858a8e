use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Parse error on line {line}: {content:?} (expected <parent>)<child>)")]
    ParseError { line: usize, content: String },

    #[error("Malformed orbit map: {message}")]
    MalformedGraph { message: String },

    #[error("Unknown body: {name}")]
    UnknownNode { name: String },

    #[error("Cycle detected in orbit map at body: {name}")]
    CycleDetected { name: String },

    #[error("No common ancestor between {origin} and {destination}")]
    NoCommonAncestor { origin: String, destination: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: {value:?} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Graph,
    Query,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SurveyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SurveyError::ParseError { .. } => ErrorCategory::Input,
            SurveyError::MalformedGraph { .. } | SurveyError::CycleDetected { .. } => {
                ErrorCategory::Graph
            }
            SurveyError::UnknownNode { .. } | SurveyError::NoCommonAncestor { .. } => {
                ErrorCategory::Query
            }
            SurveyError::ConfigValidationError { .. }
            | SurveyError::InvalidConfigValueError { .. }
            | SurveyError::MissingConfigError { .. } => ErrorCategory::Config,
            SurveyError::IoError(_) | SurveyError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SurveyError::UnknownNode { .. } | SurveyError::NoCommonAncestor { .. } => {
                ErrorSeverity::Medium
            }
            SurveyError::ParseError { .. }
            | SurveyError::MalformedGraph { .. }
            | SurveyError::CycleDetected { .. } => ErrorSeverity::High,
            SurveyError::ConfigValidationError { .. }
            | SurveyError::InvalidConfigValueError { .. }
            | SurveyError::MissingConfigError { .. } => ErrorSeverity::High,
            SurveyError::IoError(_) | SurveyError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SurveyError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            SurveyError::SerializationError(_) => {
                "Report writing failed; check disk space and permissions".to_string()
            }
            SurveyError::ParseError { line, .. } => format!(
                "Fix line {} of the orbit map; every record must look like AAA)BBB",
                line
            ),
            SurveyError::MalformedGraph { .. } => {
                "The map violates the one-orbit-per-body rule; re-download it or rerun with duplicate policy 'overwrite'"
                    .to_string()
            }
            SurveyError::UnknownNode { name } => format!(
                "Body {:?} is not in the map; check the query names or pass --allow-missing",
                name
            ),
            SurveyError::CycleDetected { .. } => {
                "The map contains a cycle and is not a valid orbit tree; the input is corrupted"
                    .to_string()
            }
            SurveyError::NoCommonAncestor { .. } => {
                "The two bodies are in disconnected trees; verify the map has a single COM root"
                    .to_string()
            }
            SurveyError::ConfigValidationError { field, .. }
            | SurveyError::InvalidConfigValueError { field, .. }
            | SurveyError::MissingConfigError { field } => {
                format!("Correct the {} setting and try again", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SurveyError::IoError(e) => format!("Could not read or write a file: {}", e),
            SurveyError::SerializationError(_) => "Could not write the survey report".to_string(),
            SurveyError::ParseError { line, content } => {
                format!("Orbit map line {} is not a valid record: {:?}", line, content)
            }
            SurveyError::MalformedGraph { message } => {
                format!("The orbit map is malformed: {}", message)
            }
            SurveyError::UnknownNode { name } => {
                format!("The orbit map does not contain a body named {:?}", name)
            }
            SurveyError::CycleDetected { name } => {
                format!("The orbit map loops back on itself at {:?}", name)
            }
            SurveyError::NoCommonAncestor {
                origin,
                destination,
            } => format!("{} and {} never meet on a common orbit", origin, destination),
            SurveyError::ConfigValidationError { field, message } => {
                format!("Configuration problem ({}): {}", field, message)
            }
            SurveyError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("{} = {:?} is invalid: {}", field, value, reason),
            SurveyError::MissingConfigError { field } => {
                format!("The {} setting is required but missing", field)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;
