use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::accounts::AccountsGateway;

use super::domain::{Customer, CustomerDraft};
use super::errors::CustomerError;
use super::repository::CustomerRepository;
use super::validator::CustomerValidator;

/// Orchestrates the five customer operations. Every mutation goes through the
/// field validator first; deletion additionally consults the accounts gateway
/// and fails closed when the activity status cannot be confirmed.
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
    accounts: Arc<dyn AccountsGateway>,
    validator: CustomerValidator,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>, accounts: Arc<dyn AccountsGateway>) -> Self {
        let validator = CustomerValidator::new(Arc::clone(&repo));
        Self { repo, accounts, validator }
    }

    /// All customers on record.
    pub async fn list(&self) -> Result<Vec<Customer>, CustomerError> {
        self.repo.find_all().await
    }

    /// Lookup by id. Absence is a plain `None`, not an error.
    pub async fn get(&self, id: i32) -> Result<Option<Customer>, CustomerError> {
        self.repo.find_by_id(id).await
    }

    /// Validated insert; the store assigns the identity.
    #[instrument(skip(self, draft), fields(dni = %draft.dni))]
    pub async fn create(&self, draft: CustomerDraft) -> Result<Customer, CustomerError> {
        self.validator.validate(&draft, None).await?;
        let created = self.repo.insert(&draft).await?;
        info!(customer_id = created.id, "customer created");
        Ok(created)
    }

    /// Validated full-field replace. Identity and DNI are immutable: the
    /// stored DNI is carried over even when the candidate supplies a
    /// different one, and the candidate is validated with its identity
    /// forced to `id` so the uniqueness check treats the stored record as
    /// "self".
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: i32, draft: CustomerDraft) -> Result<Customer, CustomerError> {
        let existing = self.repo.find_by_id(id).await?.ok_or(CustomerError::NotFound(id))?;
        self.validator.validate(&draft, Some(id)).await?;
        let record = Customer {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            dni: existing.dni,
            email: draft.email,
        };
        let updated = self.repo.update(&record).await?;
        info!(customer_id = id, "customer updated");
        Ok(updated)
    }

    /// Guarded delete. Ordering is mandatory: existence check before the
    /// gateway call, gateway call before any mutation. A gateway failure
    /// blocks the delete; it never counts as "no active accounts".
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), CustomerError> {
        let existing = self.repo.find_by_id(id).await?.ok_or(CustomerError::NotFound(id))?;
        if self.accounts.has_active_accounts(id).await? {
            warn!(customer_id = id, "delete blocked: active accounts exist");
            return Err(CustomerError::HasActiveAccounts(id));
        }
        self.repo.delete(existing.id).await?;
        info!(customer_id = id, "customer deleted");
        Ok(())
    }
}
