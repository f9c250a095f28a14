use thiserror::Error;

/// Failure taxonomy for store operations.
///
/// Domain variants carry messages safe to show to API clients; `Db` wraps
/// everything else and is sanitized at the GraphQL boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("an author with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("no author with email '{0}'")]
    UnknownAuthorEmail(String),

    #[error("database error")]
    Db(#[from] sqlx::Error),
}

impl StoreError {
    /// Map a sqlx error on author insert: unique-index violations become
    /// `DuplicateEmail`, everything else stays a `Db` error.
    pub fn from_author_insert(e: sqlx::Error, email: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return StoreError::DuplicateEmail(email.to_string());
            }
        }
        StoreError::Db(e)
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
