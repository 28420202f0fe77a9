use shared_types::AppError;

/// Friendly conflict messages keyed on the unique constraint that fired.
const UNIQUE_MESSAGES: &[(&str, &str)] = &[
    ("newsletter_subscriptions_email_key", "This email is already subscribed"),
    ("users_email_key", "An account with this email already exists"),
    ("user_roles_user_id_key", "This user already has a role"),
    ("blog_posts_slug_key", "A blog post with this slug already exists"),
];

/// Conflict error for a unique constraint, by constraint name. The
/// in-memory store raises the same errors under the same names.
pub fn unique_violation(constraint: &str) -> AppError {
    let friendly = UNIQUE_MESSAGES
        .iter()
        .find(|(name, _)| *name == constraint)
        .map(|(_, message)| *message)
        .unwrap_or("A record with this value already exists");
    AppError::conflict(friendly)
}

/// Convert a sqlx::Error into an AppError.
pub fn sqlx_to_app_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::not_found("Resource not found"),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation (error code 23505)
            if db_err.code().as_deref() == Some("23505") {
                return unique_violation(db_err.constraint().unwrap_or_default());
            }
            tracing::error!(error = %err, "database error");
            AppError::database(err.to_string())
        }
        _ => {
            tracing::error!(error = %err, "database error");
            AppError::database(err.to_string())
        }
    }
}

/// Extension trait providing `.into_app_error()` on sqlx::Error.
pub trait SqlxErrorExt {
    fn into_app_error(self) -> AppError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_app_error(self) -> AppError {
        sqlx_to_app_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
