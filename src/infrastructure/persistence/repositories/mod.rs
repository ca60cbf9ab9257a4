pub mod block_record_repository;
pub mod ipa_metadata_repository;
pub mod name_repository;
pub mod text_record_repository;
pub mod token_metadata_repository;

pub use block_record_repository::BlockRecordRepository;
pub use ipa_metadata_repository::{IpaMetadataRepository, NewIpaMetadata};
pub use name_repository::{NameRepository, NewName};
pub use text_record_repository::TextRecordRepository;
pub use token_metadata_repository::TokenMetadataRepository;

/// All repositories created from one connection pool
#[derive(Clone)]
pub struct Repositories {
    pub block_records: BlockRecordRepository,
    pub names: NameRepository,
    pub text_records: TextRecordRepository,
    pub token_metadata: TokenMetadataRepository,
    pub ipa_metadata: IpaMetadataRepository,
}

impl Repositories {
    pub fn new(
        block_records: BlockRecordRepository,
        names: NameRepository,
        text_records: TextRecordRepository,
        token_metadata: TokenMetadataRepository,
        ipa_metadata: IpaMetadataRepository,
    ) -> Self {
        Self {
            block_records,
            names,
            text_records,
            token_metadata,
            ipa_metadata,
        }
    }
}
