use async_trait::async_trait;

use super::domain::{Customer, CustomerDraft};
use super::errors::CustomerError;

/// Persistence abstraction for customer records. The store assigns identity
/// on insert and is the single source of truth for existence.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, CustomerError>;
    async fn find_by_dni(&self, dni: &str) -> Result<Option<Customer>, CustomerError>;
    async fn exists_by_id(&self, id: i32) -> Result<bool, CustomerError>;
    async fn find_all(&self) -> Result<Vec<Customer>, CustomerError>;
    async fn insert(&self, draft: &CustomerDraft) -> Result<Customer, CustomerError>;
    async fn update(&self, record: &Customer) -> Result<Customer, CustomerError>;
    async fn delete(&self, id: i32) -> Result<(), CustomerError>;
}

/// Simple in-memory repository for tests and doc examples; ids are assigned
/// sequentially starting at 1, like the real store.
pub mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct InMemoryCustomerRepository {
        inner: Mutex<Inner>,
    }

    #[derive(Default)]
    struct Inner {
        records: HashMap<i32, Customer>,
        next_id: i32,
    }

    #[async_trait]
    impl CustomerRepository for InMemoryCustomerRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, CustomerError> {
            Ok(self.inner.lock().unwrap().records.get(&id).cloned())
        }

        async fn find_by_dni(&self, dni: &str) -> Result<Option<Customer>, CustomerError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.records.values().find(|c| c.dni == dni).cloned())
        }

        async fn exists_by_id(&self, id: i32) -> Result<bool, CustomerError> {
            Ok(self.inner.lock().unwrap().records.contains_key(&id))
        }

        async fn find_all(&self) -> Result<Vec<Customer>, CustomerError> {
            let inner = self.inner.lock().unwrap();
            let mut all: Vec<Customer> = inner.records.values().cloned().collect();
            all.sort_by_key(|c| c.id);
            Ok(all)
        }

        async fn insert(&self, draft: &CustomerDraft) -> Result<Customer, CustomerError> {
            let mut inner = self.inner.lock().unwrap();
            inner.next_id += 1;
            let record = Customer {
                id: inner.next_id,
                first_name: draft.first_name.clone(),
                last_name: draft.last_name.clone(),
                dni: draft.dni.clone(),
                email: draft.email.clone(),
            };
            inner.records.insert(record.id, record.clone());
            Ok(record)
        }

        async fn update(&self, record: &Customer) -> Result<Customer, CustomerError> {
            let mut inner = self.inner.lock().unwrap();
            if !inner.records.contains_key(&record.id) {
                return Err(CustomerError::NotFound(record.id));
            }
            inner.records.insert(record.id, record.clone());
            Ok(record.clone())
        }

        async fn delete(&self, id: i32) -> Result<(), CustomerError> {
            self.inner.lock().unwrap().records.remove(&id);
            Ok(())
        }
    }
}
