use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create block_records table (scan checkpoints)
        manager
            .create_table(
                Table::create()
                    .table(BlockRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlockRecords::BlockNumber)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlockRecords::ChainId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlockRecords::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(BlockRecords::TimestampMs)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(BlockRecords::Transactions).json().not_null())
                    .col(ColumnDef::new(BlockRecords::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(BlockRecords::UpdatedAt).timestamp().not_null())
                    .primary_key(
                        Index::create()
                            .col(BlockRecords::BlockNumber)
                            .col(BlockRecords::ChainId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_block_records_chain_status")
                    .table(BlockRecords::Table)
                    .col(BlockRecords::ChainId)
                    .col(BlockRecords::Status)
                    .to_owned(),
            )
            .await?;

        // Create names table
        manager
            .create_table(
                Table::create()
                    .table(Names::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Names::TokenId).string().not_null())
                    .col(ColumnDef::new(Names::ChainId).big_integer().not_null())
                    .col(ColumnDef::new(Names::Name).string().not_null())
                    .col(ColumnDef::new(Names::NameHash).string().not_null())
                    .col(ColumnDef::new(Names::Owner).string())
                    .col(
                        ColumnDef::new(Names::ExpiresAt)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Names::IsPrimaryName)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Names::LogoUrl).string())
                    .col(ColumnDef::new(Names::BannerUrl).string())
                    .col(ColumnDef::new(Names::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Names::UpdatedAt).timestamp().not_null())
                    .primary_key(Index::create().col(Names::TokenId).col(Names::ChainId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_names_chain_name")
                    .table(Names::Table)
                    .col(Names::ChainId)
                    .col(Names::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_names_chain_name_hash")
                    .table(Names::Table)
                    .col(Names::ChainId)
                    .col(Names::NameHash)
                    .to_owned(),
            )
            .await?;

        // Create text_records table
        manager
            .create_table(
                Table::create()
                    .table(TextRecords::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TextRecords::EthName).string().not_null())
                    .col(ColumnDef::new(TextRecords::ChainId).big_integer().not_null())
                    .col(ColumnDef::new(TextRecords::Addresses).json().not_null())
                    .col(ColumnDef::new(TextRecords::Avatar).string())
                    .col(ColumnDef::new(TextRecords::Banner).string())
                    .col(ColumnDef::new(TextRecords::Url).string())
                    .col(ColumnDef::new(TextRecords::Description).string())
                    .col(ColumnDef::new(TextRecords::Email).string())
                    .col(ColumnDef::new(TextRecords::Twitter).string())
                    .col(ColumnDef::new(TextRecords::Github).string())
                    .col(ColumnDef::new(TextRecords::Discord).string())
                    .col(ColumnDef::new(TextRecords::Telegram).string())
                    .col(ColumnDef::new(TextRecords::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(TextRecords::UpdatedAt).timestamp().not_null())
                    .primary_key(
                        Index::create()
                            .col(TextRecords::EthName)
                            .col(TextRecords::ChainId),
                    )
                    .to_owned(),
            )
            .await?;

        // Create token_metadata table
        manager
            .create_table(
                Table::create()
                    .table(TokenMetadata::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TokenMetadata::TokenId).string().not_null())
                    .col(
                        ColumnDef::new(TokenMetadata::ChainId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TokenMetadata::Name).string().not_null())
                    .col(ColumnDef::new(TokenMetadata::Image).string().not_null())
                    .col(ColumnDef::new(TokenMetadata::ExternalUrl).string().not_null())
                    .col(ColumnDef::new(TokenMetadata::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(TokenMetadata::UpdatedAt).timestamp().not_null())
                    .primary_key(
                        Index::create()
                            .col(TokenMetadata::TokenId)
                            .col(TokenMetadata::ChainId),
                    )
                    .to_owned(),
            )
            .await?;

        // Create ipa_metadata table
        manager
            .create_table(
                Table::create()
                    .table(IpaMetadata::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IpaMetadata::IpId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(IpaMetadata::ChainId).big_integer().not_null())
                    .col(ColumnDef::new(IpaMetadata::TokenId).string())
                    .col(
                        ColumnDef::new(IpaMetadata::Status)
                            .string()
                            .not_null()
                            .default("REGISTERED"),
                    )
                    .col(ColumnDef::new(IpaMetadata::Title).string())
                    .col(ColumnDef::new(IpaMetadata::Description).string())
                    .col(ColumnDef::new(IpaMetadata::MediaUrl).string())
                    .col(
                        ColumnDef::new(IpaMetadata::RegistrationDateMs)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(IpaMetadata::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(IpaMetadata::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ipa_metadata_token")
                    .table(IpaMetadata::Table)
                    .col(IpaMetadata::TokenId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IpaMetadata::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TokenMetadata::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TextRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Names::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlockRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BlockRecords {
    Table,
    BlockNumber,
    ChainId,
    Status,
    TimestampMs,
    Transactions,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Names {
    Table,
    TokenId,
    ChainId,
    Name,
    NameHash,
    Owner,
    ExpiresAt,
    IsPrimaryName,
    LogoUrl,
    BannerUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TextRecords {
    Table,
    EthName,
    ChainId,
    Addresses,
    Avatar,
    Banner,
    Url,
    Description,
    Email,
    Twitter,
    Github,
    Discord,
    Telegram,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TokenMetadata {
    Table,
    TokenId,
    ChainId,
    Name,
    Image,
    ExternalUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum IpaMetadata {
    Table,
    IpId,
    ChainId,
    TokenId,
    Status,
    Title,
    Description,
    MediaUrl,
    RegistrationDateMs,
    CreatedAt,
    UpdatedAt,
}
