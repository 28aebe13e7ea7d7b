use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Custom field not set: {key}")]
    MissingCustomField { key: String },

    #[error("Custom field {key} is not a {expected}: {source}")]
    CustomFieldType {
        key: String,
        expected: &'static str,
        source: serde_json::Error,
    },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Unexpected JSON shape: {message}")]
    UnexpectedShape { message: String },

    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Service error is missing its {part}")]
    IncompleteServiceError { part: &'static str },

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Error returned by the TestRail service, e.g. a 400 with `{"error": "..."}`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{response_code} - {error}")]
pub struct ServiceError {
    pub response_code: u16,
    pub error: String,
}

impl ServiceError {
    pub fn builder() -> ServiceErrorBuilder {
        ServiceErrorBuilder::default()
    }

    /// Decodes the service's error body. Bodies without an `error` member
    /// are carried verbatim as the message.
    pub fn from_response(response_code: u16, body: &str) -> ModelResult<Self> {
        #[derive(Deserialize)]
        struct ErrorBody {
            error: Option<String>,
        }

        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody { error: Some(error) }) => error,
            _ => body.trim().to_string(),
        };

        Self::builder()
            .response_code(response_code)
            .error(message)
            .build()
    }
}

#[derive(Debug, Default, Clone)]
pub struct ServiceErrorBuilder {
    response_code: Option<u16>,
    error: Option<String>,
}

impl ServiceErrorBuilder {
    pub fn response_code(mut self, response_code: u16) -> Self {
        self.response_code = Some(response_code);
        self
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn build(self) -> ModelResult<ServiceError> {
        let response_code = self
            .response_code
            .ok_or(ModelError::IncompleteServiceError {
                part: "response code",
            })?;
        let error = self
            .error
            .ok_or(ModelError::IncompleteServiceError { part: "message" })?;
        Ok(ServiceError {
            response_code,
            error,
        })
    }
}
