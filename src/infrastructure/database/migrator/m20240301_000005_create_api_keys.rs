//! Create api_keys table migration

use sea_orm_migration::prelude::*;

use super::m20240301_000004_create_admins::Admins;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApiKeys::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ApiKeys::KeyHash)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ApiKeys::AdminUsername)
                            .string_len(64)
                            .null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_api_keys_admin_username")
                            .from(ApiKeys::Table, ApiKeys::AdminUsername)
                            .to(Admins::Table, Admins::Username)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Authentication looks keys up by admin username
        manager
            .create_index(
                Index::create()
                    .name("idx_api_keys_admin_username")
                    .table(ApiKeys::Table)
                    .col(ApiKeys::AdminUsername)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApiKeys::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ApiKeys {
    Table,
    KeyHash,
    AdminUsername,
}
