//! Error types for port operations.

/// Record store errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Stored row could not be decoded into a record.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Unique or foreign key constraint rejected the write.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a ConstraintViolation error.
    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Search mirror errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MirrorError {
    #[error("Search mirror unavailable: {0}")]
    Unavailable(String),
    #[error("Search mirror request failed: {0}")]
    Request(String),
    #[error("Invalid search mirror response: {0}")]
    InvalidResponse(String),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("Record cannot be indexed: {0}")]
    InvalidDocument(String),
}
