use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("No identity established. Sign in before writing.")]
    AuthRequired,

    #[error("Storage layer failed to initialize: {0}")]
    StorageUnavailable(String),

    #[error("Access denied: {0}")]
    PermissionDenied(String),

    #[error("Daily focus list is full ({0} slots). Defer or complete a mission first.")]
    CapacityExceeded(usize),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Ambiguous short ID. Did you mean one of these?")]
    AmbiguousId(Vec<(String, String)>), // Vec of (ID, Title)
}
