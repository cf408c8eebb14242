use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::domain::CustomerDraft;
use super::errors::{CustomerError, ValidationError};
use super::repository::CustomerRepository;

static DNI_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new("^[0-9]{8}$").unwrap());
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Za-z0-9_.-]+@[A-Za-z0-9.-]+$").unwrap());

/// Field checks for a candidate record. Checks run in a fixed order and stop
/// at the first violated rule, so exactly one reason is ever reported. The
/// only side effect is the uniqueness read against the repository.
pub struct CustomerValidator {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerValidator {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }

    /// `identity` is the id of the record being updated, if any; the
    /// uniqueness check treats that record as "self". A candidate without
    /// identity conflicts with every existing holder of the same DNI.
    pub async fn validate(
        &self,
        draft: &CustomerDraft,
        identity: Option<i32>,
    ) -> Result<(), CustomerError> {
        require_non_empty(&draft.first_name, "FirstName")?;
        require_non_empty(&draft.last_name, "LastName")?;
        if !DNI_PATTERN.is_match(&draft.dni) {
            return Err(ValidationError::InvalidFormat("DNI").into());
        }
        if !EMAIL_PATTERN.is_match(&draft.email) {
            return Err(ValidationError::InvalidFormat("Email").into());
        }
        if let Some(existing) = self.repo.find_by_dni(&draft.dni).await? {
            if identity != Some(existing.id) {
                return Err(ValidationError::DuplicateKey("DNI").into());
            }
        }
        Ok(())
    }
}

fn require_non_empty(field: &str, name: &'static str) -> Result<(), ValidationError> {
    if field.is_empty() {
        return Err(ValidationError::RequiredField(name));
    }
    Ok(())
}
