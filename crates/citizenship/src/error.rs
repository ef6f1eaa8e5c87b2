use crate::config::ConfigError;
use crate::eligibility::{RuleDocumentError, ServiceError, WizardError};
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Rules(RuleDocumentError),
    Wizard(WizardError),
    Service(ServiceError),
    Input(String),
}

impl AppError {
    /// Process exit code for the command line front end.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Input(_) | AppError::Service(ServiceError::InvalidRequest(_)) => 2,
            AppError::Service(
                ServiceError::CountryUnavailable(_) | ServiceError::RulesNotFound(_),
            ) => 3,
            AppError::Rules(_) | AppError::Wizard(_) => 4,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Service(_) => 1,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Rules(err) => write!(f, "rules error: {}", err),
            AppError::Wizard(err) => write!(f, "wizard error: {}", err),
            AppError::Service(err) => write!(f, "eligibility error: {}", err),
            AppError::Input(message) => write!(f, "invalid input: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Rules(err) => Some(err),
            AppError::Wizard(err) => Some(err),
            AppError::Service(err) => Some(err),
            AppError::Input(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RuleDocumentError> for AppError {
    fn from(value: RuleDocumentError) -> Self {
        Self::Rules(value)
    }
}

impl From<WizardError> for AppError {
    fn from(value: WizardError) -> Self {
        Self::Wizard(value)
    }
}

impl From<ServiceError> for AppError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}
