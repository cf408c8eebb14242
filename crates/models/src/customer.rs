use sea_orm::{entity::prelude::*, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Customer row. `id` is assigned by the store on first insert; `dni` carries
/// a unique constraint.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub dni: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Lookup by the natural key.
pub async fn find_by_dni(db: &DatabaseConnection, dni: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Dni.eq(dni))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}
