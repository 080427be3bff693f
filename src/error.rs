use thiserror::Error;

/// Application-level errors using thiserror for structured error handling.
///
/// These errors represent domain-specific failures that can occur during
/// the intake flow. They provide context and can be chained with anyhow.

/// Failures while checking a one-time verification code.
///
/// All variants are recoverable: the wizard stays on the verification step
/// and the view surfaces a single step-level message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    #[error("The code you entered does not match")]
    Mismatch,

    #[error("This code has expired, request a new one")]
    Expired,

    #[error("This code was already used, request a new one")]
    AlreadyConsumed,
}

/// Failures reported by the triage assessment collaborator.
///
/// Never fatal: the wizard remains on the pre-assessment step so the
/// submitter can retry.
#[derive(Error, Debug)]
pub enum AssessmentError {
    #[error("Assessment engine unavailable: {0}")]
    Unavailable(String),

    #[error("Assessment failed")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("No committed patient record to assess")]
    MissingRecord,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create config directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
