use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use crate::customer::domain::{Customer, CustomerDraft};
use crate::customer::errors::CustomerError;
use crate::customer::repository::CustomerRepository;

/// SeaORM-backed record store over the `customer` table.
pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(m: models::customer::Model) -> Customer {
    Customer {
        id: m.id,
        first_name: m.first_name,
        last_name: m.last_name,
        dni: m.dni,
        email: m.email,
    }
}

fn db_err(e: sea_orm::DbErr) -> CustomerError {
    CustomerError::Repository(e.to_string())
}

#[async_trait::async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, CustomerError> {
        let found = models::customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(to_domain))
    }

    async fn find_by_dni(&self, dni: &str) -> Result<Option<Customer>, CustomerError> {
        let found = models::customer::find_by_dni(&self.db, dni)
            .await
            .map_err(|e| CustomerError::Repository(e.to_string()))?;
        Ok(found.map(to_domain))
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, CustomerError> {
        let count = models::customer::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn find_all(&self) -> Result<Vec<Customer>, CustomerError> {
        let all = models::customer::Entity::find()
            .order_by_asc(models::customer::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(all.into_iter().map(to_domain).collect())
    }

    async fn insert(&self, draft: &CustomerDraft) -> Result<Customer, CustomerError> {
        let am = models::customer::ActiveModel {
            first_name: Set(draft.first_name.clone()),
            last_name: Set(draft.last_name.clone()),
            dni: Set(draft.dni.clone()),
            email: Set(draft.email.clone()),
            ..Default::default()
        };
        let inserted = am.insert(&self.db).await.map_err(db_err)?;
        Ok(to_domain(inserted))
    }

    async fn update(&self, record: &Customer) -> Result<Customer, CustomerError> {
        let am = models::customer::ActiveModel {
            id: Set(record.id),
            first_name: Set(record.first_name.clone()),
            last_name: Set(record.last_name.clone()),
            dni: Set(record.dni.clone()),
            email: Set(record.email.clone()),
        };
        let updated = am.update(&self.db).await.map_err(db_err)?;
        Ok(to_domain(updated))
    }

    async fn delete(&self, id: i32) -> Result<(), CustomerError> {
        models::customer::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
