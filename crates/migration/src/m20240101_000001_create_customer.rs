//! Create the `customer` table.
//!
//! The unique key on `dni` backs up the validator's uniqueness check at the
//! storage layer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(pk_auto(Customer::Id))
                    .col(string_len(Customer::FirstName, 128).not_null())
                    .col(string_len(Customer::LastName, 128).not_null())
                    .col(string_len(Customer::Dni, 8).unique_key().not_null())
                    .col(string_len(Customer::Email, 255).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Customer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Customer { Table, Id, FirstName, LastName, Dni, Email }
