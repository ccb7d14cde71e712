use thiserror::Error;

#[derive(Error, Debug)]
pub enum HrError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("Invalid request body: {message}")]
    InvalidPayload { message: String },

    #[error("An error occurred while {action}")]
    Unexpected { action: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("No authentication token found")]
    MissingToken,

    #[error("401: Unauthorized")]
    Unauthorized,

    #[error("Login failed")]
    LoginFailed,

    #[error("Remote request failed: {status} {message}")]
    RemoteStatus { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// How a failure is reported over the mock REST surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidPayload,
    Unexpected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HrError {
    pub fn employee_not_found(id: impl ToString) -> Self {
        HrError::NotFound {
            entity: "Employee",
            id: id.to_string(),
        }
    }

    pub fn department_not_found(id: impl ToString) -> Self {
        HrError::NotFound {
            entity: "Department",
            id: id.to_string(),
        }
    }

    pub fn unexpected(action: impl Into<String>) -> Self {
        HrError::Unexpected {
            action: action.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HrError::NotFound { .. } => ErrorKind::NotFound,
            HrError::Conflict { .. } => ErrorKind::Conflict,
            HrError::InvalidPayload { .. } => ErrorKind::InvalidPayload,
            _ => ErrorKind::Unexpected,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HrError::NotFound { .. } | HrError::Conflict { .. } => ErrorSeverity::Low,
            HrError::ApiError(_) | HrError::RemoteStatus { .. } => ErrorSeverity::Medium,
            HrError::MissingToken
            | HrError::Unauthorized
            | HrError::LoginFailed
            | HrError::InvalidPayload { .. }
            | HrError::SerializationError(_)
            | HrError::ConfigValidationError { .. }
            | HrError::MissingConfigError { .. }
            | HrError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            HrError::Unexpected { .. } | HrError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的提示
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HrError::MissingToken | HrError::Unauthorized => {
                "Log in again with `hr_client login` and retry with the new token"
            }
            HrError::LoginFailed => "Check the email and password",
            HrError::ApiError(_) | HrError::RemoteStatus { .. } => {
                "Check that the backend is reachable at the configured --api-url"
            }
            HrError::ConfigValidationError { .. } | HrError::InvalidConfigValueError { .. } => {
                "Fix the configuration and restart"
            }
            HrError::MissingConfigError { .. } => "Add the missing setting to the TOML file",
            HrError::SerializationError(_) => {
                "The backend answered with an unexpected body; check the API version"
            }
            _ => "Retry the request; if it keeps failing, check the server logs",
        }
    }
}

pub type Result<T> = std::result::Result<T, HrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity() {
        assert_eq!(HrError::employee_not_found(3).to_string(), "Employee not found");
        assert_eq!(
            HrError::department_not_found("abc").to_string(),
            "Department not found"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(HrError::employee_not_found(1).kind(), ErrorKind::NotFound);
        assert_eq!(
            HrError::Conflict {
                message: "busy".into()
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(HrError::MissingToken.kind(), ErrorKind::Unexpected);
        assert_eq!(
            HrError::unexpected("deleting the department").to_string(),
            "An error occurred while deleting the department"
        );
    }

    #[test]
    fn test_severity_ordering() {
        assert!(HrError::unexpected("x").severity() > HrError::Unauthorized.severity());
        assert_eq!(HrError::employee_not_found(1).severity(), ErrorSeverity::Low);
    }
}
