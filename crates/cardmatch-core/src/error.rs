//! Error types and exit codes for cardmatch
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (storage, IO, malformed store)
//! - 2: Usage error (bad flags/args, out-of-range values)
//! - 3: Not found (absent, or owned by someone else)
//! - 4: Conflict (assignment uniqueness/exclusivity, locked entities)
//! - 5: Validation (insufficient compatibility, missing requirements, bad card counts)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the cardmatch CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Entity absent or not owned by the caller (3)
    NotFound = 3,
    /// Uniqueness, exclusivity or lock violation (4)
    Conflict = 4,
    /// Business-rule validation failure (5)
    Validation = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Coarse error taxonomy surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    NotFound,
    Conflict,
    Validation,
    Failure,
}

impl From<rusqlite::Error> for MatchError {
    fn from(err: rusqlite::Error) -> Self {
        tracing::error!(error = %err, "database error");
        MatchError::Storage {
            operation: "access the database".to_string(),
        }
    }
}

/// Errors that can occur during cardmatch operations
#[derive(Error, Debug)]
pub enum MatchError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Not found (exit code 3)
    #[error("store not found (searched from {search_root:?})")]
    StoreNotFound { search_root: PathBuf },

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    // Conflicts (exit code 4)
    #[error("project {project_id} is already matched in assignment {assignment_id}")]
    ProjectAlreadyAssigned { project_id: i64, assignment_id: i64 },

    #[error("card {card_id} ({card_name}) is already assigned to assignment {assignment_id}")]
    CardAlreadyAssigned {
        card_id: i64,
        card_name: String,
        assignment_id: i64,
    },

    #[error("{entity} {id} is locked because it is matched in assignment {assignment_id}; {action} is not allowed")]
    Locked {
        entity: String,
        id: i64,
        assignment_id: i64,
        action: String,
    },

    #[error("{context} already exists: {value}")]
    AlreadyExists { context: String, value: String },

    #[error("{entity} {id} is still referenced by {referenced_by}")]
    InUse {
        entity: String,
        id: i64,
        referenced_by: String,
    },

    // Validation (exit code 5)
    #[error("insufficient compatibility ({percentage:.2}%): must be greater than {threshold}%")]
    InsufficientCompatibility { percentage: f64, threshold: f64 },

    #[error("project {project_id} has no required technologies configured")]
    NoRequirements { project_id: i64 },

    #[error("card count {count} outside allowed range {min}..={max}")]
    CardCount { count: usize, min: usize, max: usize },

    #[error("no available cards to build a team for project {project_id}")]
    EmptyPool { project_id: i64 },

    #[error("no fields to update on {entity} {id}")]
    EmptyUpdate { entity: String, id: i64 },

    // Generic failures (exit code 1)
    #[error("failed to {operation}")]
    Storage { operation: String },

    #[error("invalid store: {reason}")]
    InvalidStore { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl MatchError {
    /// Create an error for a failed database operation.
    ///
    /// The underlying cause is logged, never rendered.
    pub fn storage(operation: &str, error: impl std::fmt::Display) -> Self {
        tracing::error!(operation, error = %error, "storage failure");
        MatchError::Storage {
            operation: operation.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        MatchError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that already exists
    pub fn already_exists(context: &str, value: impl std::fmt::Display) -> Self {
        MatchError::AlreadyExists {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that is absent or owned by someone else
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        MatchError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Create a lock violation for a matched entity
    pub fn locked(entity: &str, id: i64, assignment_id: i64, action: impl Into<String>) -> Self {
        MatchError::Locked {
            entity: entity.to_string(),
            id,
            assignment_id,
            action: action.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatchError::UsageError(_) | MatchError::InvalidValue { .. } => ErrorKind::Usage,

            MatchError::StoreNotFound { .. } | MatchError::NotFound { .. } => ErrorKind::NotFound,

            MatchError::ProjectAlreadyAssigned { .. }
            | MatchError::CardAlreadyAssigned { .. }
            | MatchError::Locked { .. }
            | MatchError::AlreadyExists { .. }
            | MatchError::InUse { .. } => ErrorKind::Conflict,

            MatchError::InsufficientCompatibility { .. }
            | MatchError::NoRequirements { .. }
            | MatchError::CardCount { .. }
            | MatchError::EmptyPool { .. }
            | MatchError::EmptyUpdate { .. } => ErrorKind::Validation,

            MatchError::Storage { .. }
            | MatchError::InvalidStore { .. }
            | MatchError::Io(_)
            | MatchError::Json(_)
            | MatchError::Toml(_) => ErrorKind::Failure,
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self.kind() {
            ErrorKind::Usage => ExitCode::Usage,
            ErrorKind::NotFound => ExitCode::NotFound,
            ErrorKind::Conflict => ExitCode::Conflict,
            ErrorKind::Validation => ExitCode::Validation,
            ErrorKind::Failure => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            MatchError::UsageError(_) => "usage_error",
            MatchError::InvalidValue { .. } => "invalid_value",
            MatchError::StoreNotFound { .. } => "store_not_found",
            MatchError::NotFound { .. } => "not_found",
            MatchError::ProjectAlreadyAssigned { .. } => "project_already_assigned",
            MatchError::CardAlreadyAssigned { .. } => "card_already_assigned",
            MatchError::Locked { .. } => "locked",
            MatchError::AlreadyExists { .. } => "already_exists",
            MatchError::InUse { .. } => "in_use",
            MatchError::InsufficientCompatibility { .. } => "insufficient_compatibility",
            MatchError::NoRequirements { .. } => "no_requirements",
            MatchError::CardCount { .. } => "card_count",
            MatchError::EmptyPool { .. } => "empty_pool",
            MatchError::EmptyUpdate { .. } => "empty_update",
            MatchError::Storage { .. } => "storage",
            MatchError::InvalidStore { .. } => "invalid_store",
            MatchError::Io(_) => "io_error",
            MatchError::Json(_) => "json_error",
            MatchError::Toml(_) => "toml_error",
        }
    }

    /// Convert error to JSON representation for structured error output.
    ///
    /// Conflict and validation errors carry the details a caller needs to
    /// explain the failure (blocking assignment, computed percentage).
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        match self {
            MatchError::Locked {
                entity,
                id,
                assignment_id,
                ..
            } => {
                error_obj["entity"] = serde_json::json!(entity);
                error_obj["id"] = serde_json::json!(id);
                error_obj["assignment_id"] = serde_json::json!(assignment_id);
            }
            MatchError::CardAlreadyAssigned {
                card_id,
                assignment_id,
                ..
            } => {
                error_obj["card_id"] = serde_json::json!(card_id);
                error_obj["assignment_id"] = serde_json::json!(assignment_id);
            }
            MatchError::ProjectAlreadyAssigned {
                project_id,
                assignment_id,
            } => {
                error_obj["project_id"] = serde_json::json!(project_id);
                error_obj["assignment_id"] = serde_json::json!(assignment_id);
            }
            MatchError::InsufficientCompatibility {
                percentage,
                threshold,
            } => {
                error_obj["percentage"] = serde_json::json!(percentage);
                error_obj["threshold"] = serde_json::json!(threshold);
            }
            _ => {}
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for cardmatch operations
pub type Result<T> = std::result::Result<T, MatchError>;
