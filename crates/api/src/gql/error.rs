use infra::StoreError;

/// Unified error type for GraphQL resolvers.
///
/// async-graphql has a blanket `impl<T: Display + Send + Sync + 'static> From<T> for Error`,
/// so this type auto-converts via `?` once a `StoreError` has been wrapped.
///
/// Domain store failures (not-found, duplicate email, unresolvable author
/// email) carry client-safe messages and pass through verbatim; raw
/// database errors are logged server-side and replaced with a sanitized
/// message.
#[derive(Debug)]
pub enum GqlError {
    Store(StoreError),
    Custom(String),
}

impl GqlError {
    pub fn new(msg: impl Into<String>) -> Self {
        GqlError::Custom(msg.into())
    }
}

impl std::fmt::Display for GqlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GqlError::Store(StoreError::Db(e)) => {
                // Log the real error server-side; return a generic message to clients
                tracing::error!("Database error: {e}");
                write!(f, "Internal database error")
            }
            GqlError::Store(e) => write!(f, "{e}"),
            GqlError::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for GqlError {}

impl From<StoreError> for GqlError {
    fn from(e: StoreError) -> Self {
        GqlError::Store(e)
    }
}
