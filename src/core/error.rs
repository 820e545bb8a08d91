//! Error taxonomy. Nothing here is fatal: location errors become status
//! messages, everything else is logged.

use thiserror::Error;

/// Why a location request or subscription update failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("location request timed out")]
    Timeout,
    #[error("location error (code {code}): {message}")]
    Unknown { code: u16, message: String },
}

impl LocationError {
    pub const CODE_PERMISSION_DENIED: u16 = 1;
    pub const CODE_POSITION_UNAVAILABLE: u16 = 2;
    pub const CODE_TIMEOUT: u16 = 3;

    /// Classify a platform error code.
    pub fn from_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            Self::CODE_PERMISSION_DENIED => LocationError::PermissionDenied,
            Self::CODE_POSITION_UNAVAILABLE => LocationError::PositionUnavailable,
            Self::CODE_TIMEOUT => LocationError::Timeout,
            _ => LocationError::Unknown {
                code,
                message: message.into(),
            },
        }
    }

    /// Error for a platform call that threw instead of reporting through its callback.
    pub fn platform(message: impl Into<String>) -> Self {
        LocationError::Unknown {
            code: 0,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("location capability absent")]
    CapabilityAbsent,
    #[error(transparent)]
    Location(#[from] LocationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    #[error("permission query failed: {0}")]
    QueryFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("worker registration failed: {0}")]
    Failed(String),
    #[error("worker registration returned an unexpected value")]
    UnexpectedResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkerError {
    #[error("skip_waiting() failed: {0}")]
    SkipWaiting(String),
    #[error("clients.claim() failed: {0}")]
    Claim(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}
