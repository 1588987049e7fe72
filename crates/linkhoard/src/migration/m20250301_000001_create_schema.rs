//! Initial migration to create the linkhoard database schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_items(manager).await?;
        self.create_lists(manager).await?;
        self.create_item_lists(manager).await?;
        self.create_github_stars_syncs(manager).await?;
        self.create_api_tokens(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApiTokens::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GithubStarsSyncs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ItemLists::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lists::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await?;
        Ok(())
    }
}

impl Migration {
    async fn create_items(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Items::UserId).uuid().not_null())
                    // Content
                    .col(ColumnDef::new(Items::Url).text().not_null())
                    .col(ColumnDef::new(Items::Title).text().not_null())
                    .col(ColumnDef::new(Items::Description).text().null())
                    .col(ColumnDef::new(Items::Content).text().null())
                    .col(ColumnDef::new(Items::Context).text().null())
                    .col(ColumnDef::new(Items::Image).text().null())
                    .col(ColumnDef::new(Items::ItemType).string().not_null())
                    .col(
                        ColumnDef::new(Items::Metadata)
                            .json()
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    // Timestamps
                    .col(
                        ColumnDef::new(Items::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Items::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // Archival
                    .col(
                        ColumnDef::new(Items::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Items::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Duplicate lookups. Deliberately not unique: archived rows may share a URL.
        manager
            .create_index(
                Index::create()
                    .name("idx_items_user_url")
                    .table(Items::Table)
                    .col(Items::UserId)
                    .col(Items::Url)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_user_type")
                    .table(Items::Table)
                    .col(Items::UserId)
                    .col(Items::ItemType)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_lists(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lists::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Lists::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Lists::UserId).uuid().not_null())
                    .col(ColumnDef::new(Lists::Name).string().not_null())
                    .col(ColumnDef::new(Lists::Slug).string().not_null())
                    .col(ColumnDef::new(Lists::Description).text().null())
                    .col(ColumnDef::new(Lists::Source).string().null())
                    .col(
                        ColumnDef::new(Lists::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Lists::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lists_user_source")
                    .table(Lists::Table)
                    .col(Lists::UserId)
                    .col(Lists::Source)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_item_lists(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ItemLists::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ItemLists::ItemId).uuid().not_null())
                    .col(ColumnDef::new(ItemLists::ListId).uuid().not_null())
                    .col(
                        ColumnDef::new(ItemLists::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_item_lists")
                            .col(ItemLists::ItemId)
                            .col(ItemLists::ListId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_lists_item")
                            .from(ItemLists::Table, ItemLists::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_lists_list")
                            .from(ItemLists::Table, ItemLists::ListId)
                            .to(Lists::Table, Lists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_item_lists_list")
                    .table(ItemLists::Table)
                    .col(ItemLists::ListId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_github_stars_syncs(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GithubStarsSyncs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GithubStarsSyncs::UserId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GithubStarsSyncs::GithubUsername)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GithubStarsSyncs::Etag).text().null())
                    .col(
                        ColumnDef::new(GithubStarsSyncs::LastSyncedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_api_tokens(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApiTokens::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ApiTokens::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ApiTokens::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(ApiTokens::TokenHash)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ApiTokens::Label).string().not_null())
                    .col(
                        ColumnDef::new(ApiTokens::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ApiTokens::LastUsedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ApiTokens::RevokedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_api_tokens_user")
                    .table(ApiTokens::Table)
                    .col(ApiTokens::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
    UserId,
    Url,
    Title,
    Description,
    Content,
    Context,
    Image,
    ItemType,
    Metadata,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Lists {
    Table,
    Id,
    UserId,
    Name,
    Slug,
    Description,
    Source,
    IsDeleted,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ItemLists {
    Table,
    ItemId,
    ListId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum GithubStarsSyncs {
    Table,
    UserId,
    GithubUsername,
    Etag,
    LastSyncedAt,
}

#[derive(DeriveIden)]
enum ApiTokens {
    Table,
    Id,
    UserId,
    TokenHash,
    Label,
    CreatedAt,
    LastUsedAt,
    RevokedAt,
}
