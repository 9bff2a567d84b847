//! Custom error types for the cache manager
//!
//! Most plumbing propagates `anyhow::Error`; these types carry the failures a
//! caller needs to tell apart, such as a rejected schedule versus a broken
//! database.

use std::fmt;

/// Main error type for the cache manager
#[derive(Debug)]
pub enum ManagerError {
    /// Configuration-related errors (service file or schedule values)
    Config(ConfigError),

    /// Settings store errors
    Database(DatabaseError),

    /// Periodic trigger errors
    Schedule(ScheduleError),

    /// Other errors with context
    Other(String),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Missing required configuration
    MissingRequired { field: String },
}

/// Settings store error variants
#[derive(Debug)]
pub enum DatabaseError {
    /// Connection failed
    ConnectionFailed { reason: String },

    /// Query or transaction failed
    QueryFailed { query: String, reason: String },
}

/// Periodic trigger error variants
#[derive(Debug)]
pub enum ScheduleError {
    /// The trigger could not be registered with the job scheduler
    RegistrationFailed { reason: String },
}

impl ManagerError {
    pub fn invalid_value(field: &str, reason: impl Into<String>) -> Self {
        ManagerError::Config(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        })
    }

    pub fn missing_required(field: &str) -> Self {
        ManagerError::Config(ConfigError::MissingRequired {
            field: field.to_string(),
        })
    }

    /// Whether the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ManagerError::Config(ConfigError::InvalidValue { .. })
                | ManagerError::Config(ConfigError::MissingRequired { .. })
        )
    }
}

impl fmt::Display for ManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManagerError::Config(e) => write!(f, "Configuration error: {}", e),
            ManagerError::Database(e) => write!(f, "Database error: {}", e),
            ManagerError::Schedule(e) => write!(f, "Schedule error: {}", e),
            ManagerError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::MissingRequired { field } => {
                write!(f, "Missing required field: {}", field)
            }
        }
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::ConnectionFailed { reason } => {
                write!(f, "Database connection failed: {}", reason)
            }
            DatabaseError::QueryFailed { query, reason } => {
                write!(f, "Query '{}' failed: {}", query, reason)
            }
        }
    }
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::RegistrationFailed { reason } => {
                write!(f, "Failed to register periodic trigger: {}", reason)
            }
        }
    }
}

impl std::error::Error for ManagerError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for DatabaseError {}
impl std::error::Error for ScheduleError {}

impl From<ConfigError> for ManagerError {
    fn from(err: ConfigError) -> Self {
        ManagerError::Config(err)
    }
}

impl From<DatabaseError> for ManagerError {
    fn from(err: DatabaseError) -> Self {
        ManagerError::Database(err)
    }
}

impl From<ScheduleError> for ManagerError {
    fn from(err: ScheduleError) -> Self {
        ManagerError::Schedule(err)
    }
}
