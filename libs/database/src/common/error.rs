/// Errors raised while probing or migrating the database.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// The server could not be reached or no pooled connection was available
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
