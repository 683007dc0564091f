use sea_orm_migration::prelude::*;

use crate::m20261019_000001_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bugs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bugs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bugs::OwnerId).integer().not_null())
                    .col(ColumnDef::new(Bugs::Title).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Bugs::State)
                            .text()
                            .not_null()
                            .default("open"),
                    )
                    .col(ColumnDef::new(Bugs::Text).text().not_null())
                    .col(
                        ColumnDef::new(Bugs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bugs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bugs_owner_id")
                            .from(Bugs::Table, Bugs::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 列表页按创建时间倒序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bugs_created_at")
                    .table(Bugs::Table)
                    .col(Bugs::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_bugs_created_at").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Bugs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bugs {
    Table,
    Id,
    OwnerId,
    Title,
    State,
    Text,
    CreatedAt,
    UpdatedAt,
}
