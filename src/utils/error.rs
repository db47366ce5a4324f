use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown app: {name}")]
    UnknownApp { name: String },

    #[error("App not found in registry: {app}")]
    AppNotFound { app: String },

    #[error("App {app} has no admin account")]
    AdminNotSet { app: String },

    #[error("{app} {action} failed with code {code}: {message}")]
    AssertionFailed {
        app: String,
        action: String,
        code: u16,
        message: String,
    },

    #[error("Interface error: {message}")]
    InterfaceError { message: String },

    #[error("Interface call timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Interface,
    Assertion,
    Registry,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code: 1 test failure, 2 configuration, 3 interface or system.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl HarnessError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HarnessError::ConfigError { .. }
            | HarnessError::MissingConfigError { .. }
            | HarnessError::InvalidConfigValueError { .. }
            | HarnessError::TomlError(_)
            | HarnessError::UnknownApp { .. } => ErrorCategory::Configuration,
            HarnessError::HttpError(_)
            | HarnessError::InterfaceError { .. }
            | HarnessError::Timeout { .. }
            | HarnessError::SerializationError(_) => ErrorCategory::Interface,
            HarnessError::AssertionFailed { .. } => ErrorCategory::Assertion,
            HarnessError::AppNotFound { .. } | HarnessError::AdminNotSet { .. } => {
                ErrorCategory::Registry
            }
            HarnessError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Assertion | ErrorCategory::Registry => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Interface | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HarnessError::ConfigError { .. }
            | HarnessError::MissingConfigError { .. }
            | HarnessError::InvalidConfigValueError { .. }
            | HarnessError::TomlError(_) => "Check the harness configuration file",
            HarnessError::UnknownApp { .. } => "Valid apps are: core, accounts, files",
            HarnessError::AppNotFound { .. } | HarnessError::AdminNotSet { .. } => {
                "Include the accounts app in the run so its admin is created first"
            }
            HarnessError::AssertionFailed { .. } => {
                "Inspect the server error log for the failing action"
            }
            HarnessError::HttpError(_) | HarnessError::Timeout { .. } => {
                "Make sure the server is reachable and raise interface.timeout_seconds if needed"
            }
            HarnessError::InterfaceError { .. } | HarnessError::SerializationError(_) => {
                "Make sure interface.server_root points at an Andromeda checkout"
            }
            HarnessError::IoError(_) => "Check file permissions and that php_binary is installed",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HarnessError::AssertionFailed {
                app,
                action,
                message,
                ..
            } => format!("'{} {}' did not succeed: {}", app, action, message),
            HarnessError::Timeout { seconds } => {
                format!("The server did not answer within {} seconds", seconds)
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_failure_is_high_severity() {
        let err = HarnessError::AssertionFailed {
            app: "files".to_string(),
            action: "install".to_string(),
            code: 500,
            message: "SERVER_ERROR".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Assertion);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(
            err.user_friendly_message(),
            "'files install' did not succeed: SERVER_ERROR"
        );
    }

    #[test]
    fn test_config_errors_are_medium() {
        let err = HarnessError::MissingConfigError {
            field: "interface.url".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.severity().exit_code(), 2);
    }

    #[test]
    fn test_exit_codes_by_category() {
        let unreachable = HarnessError::InterfaceError {
            message: "connection refused".to_string(),
        };
        let missing_admin = HarnessError::AdminNotSet {
            app: "accounts".to_string(),
        };
        let io = HarnessError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "php not found",
        ));

        assert_eq!(unreachable.severity().exit_code(), 3);
        assert_eq!(HarnessError::Timeout { seconds: 30 }.severity().exit_code(), 3);
        assert_eq!(io.severity().exit_code(), 3);
        assert_eq!(missing_admin.severity().exit_code(), 1);
    }
}
