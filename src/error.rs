use serde_json::{Value, json};

/// Errors surfaced by the migration engine and its collaborators.
///
/// Only [`AppError::Storage`] aborts a run. [`AppError::Notification`] is
/// produced by notifiers and swallowed by the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {message}")]
    Configuration { message: String, details: Value },

    #[error("storage error: {message}")]
    Storage { message: String, details: Value },

    #[error("notification error: {message}")]
    Notification { message: String, details: Value },

    #[error("internal error: {message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn configuration(message: impl Into<String>, details: Value) -> Self {
        Self::Configuration {
            message: message.into(),
            details,
        }
    }
    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }
    pub fn notification(message: impl Into<String>, details: Value) -> Self {
        Self::Notification {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Short machine-readable code, used as a metrics label and in logs.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration { .. } => "configuration_error",
            AppError::Storage { .. } => "storage_error",
            AppError::Notification { .. } => "notification_error",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            AppError::Configuration { details, .. }
            | AppError::Storage { details, .. }
            | AppError::Notification { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        return AppError::storage(
            "Database error",
            json!({ "code": db.code(), "message": db.message() }),
        );
    }

    AppError::storage("Database error", json!({ "error": e.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::storage("x", json!({})).code(),
            "storage_error"
        );
        assert_eq!(
            AppError::configuration("x", json!({})).code(),
            "configuration_error"
        );
        assert_eq!(
            AppError::notification("x", json!({})).code(),
            "notification_error"
        );
    }

    #[test]
    fn test_display_includes_message() {
        let err = AppError::storage("Site update failed", json!({"blog_id": 2}));
        assert_eq!(err.to_string(), "storage error: Site update failed");
        assert_eq!(err.details()["blog_id"], 2);
    }

    #[test]
    fn test_sqlx_error_maps_to_storage() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Storage { .. }));
    }
}
