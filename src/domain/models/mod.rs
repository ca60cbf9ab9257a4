pub mod block_record;
pub mod chain;
pub mod event;
pub mod text_field;

pub use block_record::{BlockRecord, BlockScanStatus, TxScanStatus, TxStatus};
pub use chain::{Chain, ChainRegistry, ContractAddresses};
pub use event::{
    DecodedEvent, EventData, EventJob, EventKind, IpAssetData, ReceiptContext, RegistrationData,
    RenewalData, TextChangedData, TransferData,
};
pub use text_field::TextField;
