//! Migration: Create the documents table.
//!
//! Rows are never removed; soft deletion sets `status = 'DELETED'`
//! together with `deleted_at`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Documents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Documents::Filename).string_len(255).not_null())
                    .col(ColumnDef::new(Documents::OriginalName).string_len(255).null())
                    .col(ColumnDef::new(Documents::Filepath).string_len(500).not_null())
                    .col(
                        ColumnDef::new(Documents::Size)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Documents::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Documents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Documents::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Documents::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .check(Expr::col(Documents::Status).is_in(["CREATED", "UPLOADED", "DELETED"]))
                    .to_owned(),
            )
            .await?;

        // Listing filters by status and orders by creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_documents_status_created_at")
                    .table(Documents::Table)
                    .col(Documents::Status)
                    .col(Documents::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Documents {
    Table,
    Id,
    Filename,
    OriginalName,
    Filepath,
    Size,
    Status,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
