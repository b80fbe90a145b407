//! Create rooms table migration

use sea_orm_migration::prelude::*;

use super::m20240301_000001_create_hotels::Hotels;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::HotelId).integer().null())
                    .col(ColumnDef::new(Rooms::Number).integer().not_null())
                    .col(ColumnDef::new(Rooms::RoomType).string_len(64).not_null())
                    .col(ColumnDef::new(Rooms::Price).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_hotel_id")
                            .from(Rooms::Table, Rooms::HotelId)
                            .to(Hotels::Table, Hotels::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // The booking scan fetches rooms by hotel and type
        manager
            .create_index(
                Index::create()
                    .name("idx_rooms_hotel_type")
                    .table(Rooms::Table)
                    .col(Rooms::HotelId)
                    .col(Rooms::RoomType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Rooms {
    Table,
    Id,
    HotelId,
    Number,
    RoomType,
    Price,
}
