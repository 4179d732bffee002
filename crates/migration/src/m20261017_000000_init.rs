//! Initial schema migration.
//!
//! - `users`: authentication and the owner side of a transaction
//! - `transactions`: real-estate deals and listings

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Password,
    Name,
    Email,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    UserId,
    Name,
    Kind,
    Status,
    Description,
    PurchasePrice,
    ListPrice,
    ListDate,
    EffectiveDate,
    ExpirationDate,
    ClosingDate,
    Comments,
    MlsNumber,
    #[iden = "address_line1"]
    AddressLine1,
    #[iden = "address_line2"]
    AddressLine2,
    City,
    County,
    State,
    Zip,
    TaxId,
    PropertyType,
    CreateDate,
    UpdateDate,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::Name).string())
                    .col(ColumnDef::new(Users::Email).string())
                    .to_owned(),
            )
            .await?;

        // `user_id` is a lookup-only reference: no foreign key, so removing a
        // user leaves its transactions in place.
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::UserId).string())
                    .col(ColumnDef::new(Transactions::Name).string().not_null())
                    .col(ColumnDef::new(Transactions::Kind).string().not_null())
                    .col(ColumnDef::new(Transactions::Status).string().not_null())
                    .col(ColumnDef::new(Transactions::Description).string())
                    .col(ColumnDef::new(Transactions::PurchasePrice).double())
                    .col(ColumnDef::new(Transactions::ListPrice).double())
                    .col(ColumnDef::new(Transactions::ListDate).timestamp())
                    .col(ColumnDef::new(Transactions::EffectiveDate).timestamp())
                    .col(ColumnDef::new(Transactions::ExpirationDate).timestamp())
                    .col(ColumnDef::new(Transactions::ClosingDate).timestamp())
                    .col(ColumnDef::new(Transactions::Comments).string())
                    .col(ColumnDef::new(Transactions::MlsNumber).string())
                    .col(ColumnDef::new(Transactions::AddressLine1).string())
                    .col(ColumnDef::new(Transactions::AddressLine2).string())
                    .col(ColumnDef::new(Transactions::City).string())
                    .col(ColumnDef::new(Transactions::County).string())
                    .col(ColumnDef::new(Transactions::State).string())
                    .col(ColumnDef::new(Transactions::Zip).string())
                    .col(ColumnDef::new(Transactions::TaxId).string())
                    .col(ColumnDef::new(Transactions::PropertyType).string())
                    .col(ColumnDef::new(Transactions::CreateDate).timestamp())
                    .col(ColumnDef::new(Transactions::UpdateDate).timestamp())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-user_id")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}
