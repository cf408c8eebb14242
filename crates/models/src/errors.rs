use thiserror::Error;

/// Storage-layer failures surfaced by entity helpers. Field validation is a
/// business concern and lives in the service layer, not here.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("database error: {0}")]
    Db(String),
}
