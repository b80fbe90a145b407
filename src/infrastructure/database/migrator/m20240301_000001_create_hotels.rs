//! Create hotels table migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hotels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hotels::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Hotels::Name)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Hotels::Country).string_len(64).not_null())
                    .col(ColumnDef::new(Hotels::City).string_len(64).not_null())
                    .col(ColumnDef::new(Hotels::Street).string_len(64).not_null())
                    .to_owned(),
            )
            .await?;

        // Availability search filters on location
        manager
            .create_index(
                Index::create()
                    .name("idx_hotels_country_city")
                    .table(Hotels::Table)
                    .col(Hotels::Country)
                    .col(Hotels::City)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Hotels::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Hotels {
    Table,
    Id,
    Name,
    Country,
    City,
    Street,
}
