use thiserror::Error;

use crate::accounts::GatewayError;

/// First violated field rule for a candidate record. The field name is the
/// caller-facing one ("FirstName", "LastName", "DNI", "Email").
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    RequiredField(&'static str),
    #[error("invalid {0} format")]
    InvalidFormat(&'static str),
    #[error("a customer with this {0} already exists")]
    DuplicateKey(&'static str),
}

/// Business errors for customer workflows. Every failing path leaves the
/// record store unchanged for that operation.
#[derive(Debug, Error)]
pub enum CustomerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("customer {0} not found")]
    NotFound(i32),
    #[error("cannot delete customer {0}: active accounts exist")]
    HasActiveAccounts(i32),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("repository error: {0}")]
    Repository(String),
}

impl CustomerError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            CustomerError::Validation(_) => 1001,
            CustomerError::NotFound(_) => 1002,
            CustomerError::HasActiveAccounts(_) => 1003,
            CustomerError::Gateway(_) => 1100,
            CustomerError::Repository(_) => 1200,
        }
    }
}
