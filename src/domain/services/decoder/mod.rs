//! Event decoding
//!
//! Maps raw receipt logs to typed domain events. Matching is by signature
//! topic plus emitting contract; anything else is ignored. A log that
//! matches but fails to decode is dropped and logged, never propagated, so
//! one malformed log cannot abort its transaction's processing.

pub mod abi;
pub mod namehash;

use alloy::primitives::{Address, U256};
use alloy::sol_types::{SolCall, SolEvent};
use std::fmt;

use crate::domain::models::{
    Chain, DecodedEvent, EventData, EventKind, IpAssetData, RegistrationData, RenewalData,
    TextChangedData, TransferData,
};
use crate::infrastructure::evm::{ChainClient, RawLog, TxReceipt};
use crate::utils::logging;

use namehash::namehash;

/// Why a matched log produced no event. Only ever logged.
#[derive(Debug)]
pub struct DecodeFailure(String);

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decoder for one chain's watched contracts
#[derive(Debug, Clone)]
pub struct EventDecoder {
    chain: Chain,
}

impl EventDecoder {
    pub fn new(chain: Chain) -> Self {
        Self { chain }
    }

    /// Decode every log in a receipt into zero or more typed events,
    /// preserving log order. Undecodable logs are dropped.
    pub async fn decode_receipt(
        &self,
        client: &dyn ChainClient,
        receipt: &TxReceipt,
    ) -> Vec<DecodedEvent> {
        let mut events = Vec::new();

        for log in &receipt.logs {
            match self.decode_log(client, receipt, log).await {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(e) => {
                    logging::log_warning(&format!(
                        "[{}] Dropped undecodable log in tx {}: {}",
                        self.chain.name, receipt.transaction_hash, e
                    ));
                }
            }
        }

        events
    }

    async fn decode_log(
        &self,
        client: &dyn ChainClient,
        receipt: &TxReceipt,
        log: &RawLog,
    ) -> Result<Option<DecodedEvent>, DecodeFailure> {
        let Some(topic0) = log.topics.first().copied() else {
            return Ok(None);
        };
        let contracts = &self.chain.contracts;

        match topic0 {
            t if t == abi::NameRegistered::SIGNATURE_HASH && log.address == contracts.registrar => {
                self.decode_registration(log).map(Some)
            }
            t if t == abi::NameRenewed::SIGNATURE_HASH && log.address == contracts.registrar => {
                self.decode_renewal(log).map(Some)
            }
            t if t == abi::Transfer::SIGNATURE_HASH && log.address == contracts.registrar => {
                self.decode_transfer(log)
            }
            t if t == abi::TextChanged::SIGNATURE_HASH && log.address == contracts.resolver => {
                self.decode_text_changed(log).map(Some)
            }
            t if t == abi::IPRegistered::SIGNATURE_HASH
                && log.address == contracts.ip_asset_registry =>
            {
                self.decode_ip_registration(client, receipt, log).await.map(Some)
            }
            _ => Ok(None),
        }
    }

    fn decode_registration(&self, log: &RawLog) -> Result<DecodedEvent, DecodeFailure> {
        let ev = abi::NameRegistered::decode_raw_log_validate(log.topics.iter().copied(), &log.data)
            .map_err(|e| DecodeFailure(format!("NameRegistered: {}", e)))?;

        let token_id = U256::from_be_bytes(ev.label.0);
        let full_name = self.chain.full_name(&ev.name);
        let name_hash = namehash(&full_name);

        Ok(DecodedEvent {
            kind: EventKind::Register,
            data: EventData::Registration(RegistrationData {
                label: ev.name,
                full_name: full_name.clone(),
                token_id: format!("{:#x}", token_id),
                name_hash: format!("{:#x}", name_hash),
                owner: format!("{:#x}", ev.owner),
                base_cost: ev.baseCost.to_string(),
                premium: ev.premium.to_string(),
                expires_at: to_millis(ev.expires),
            }),
        })
    }

    fn decode_renewal(&self, log: &RawLog) -> Result<DecodedEvent, DecodeFailure> {
        let ev = abi::NameRenewed::decode_raw_log_validate(log.topics.iter().copied(), &log.data)
            .map_err(|e| DecodeFailure(format!("NameRenewed: {}", e)))?;

        let token_id = U256::from_be_bytes(ev.label.0);
        let full_name = self.chain.full_name(&ev.name);
        let name_hash = namehash(&full_name);

        Ok(DecodedEvent {
            kind: EventKind::Renew,
            data: EventData::Renewal(RenewalData {
                label: ev.name,
                full_name,
                token_id: format!("{:#x}", token_id),
                name_hash: format!("{:#x}", name_hash),
                cost: ev.cost.to_string(),
                expires_at: to_millis(ev.expires),
            }),
        })
    }

    /// A transfer from the zero address is a mint, not a real transfer, and
    /// decodes to no event.
    fn decode_transfer(&self, log: &RawLog) -> Result<Option<DecodedEvent>, DecodeFailure> {
        let ev = abi::Transfer::decode_raw_log_validate(log.topics.iter().copied(), &log.data)
            .map_err(|e| DecodeFailure(format!("Transfer: {}", e)))?;

        if ev.from == Address::ZERO {
            return Ok(None);
        }

        Ok(Some(DecodedEvent {
            kind: EventKind::TransferOwnership,
            data: EventData::Transfer(TransferData {
                from: format!("{:#x}", ev.from),
                to: format!("{:#x}", ev.to),
                token_id: format!("{:#x}", ev.tokenId),
            }),
        }))
    }

    fn decode_text_changed(&self, log: &RawLog) -> Result<DecodedEvent, DecodeFailure> {
        let ev = abi::TextChanged::decode_raw_log_validate(log.topics.iter().copied(), &log.data)
            .map_err(|e| DecodeFailure(format!("TextChanged: {}", e)))?;

        Ok(DecodedEvent {
            kind: EventKind::TextChanged,
            data: EventData::TextChanged(TextChangedData {
                node: format!("{:#x}", ev.node),
                key: ev.key,
                value: ev.value,
            }),
        })
    }

    /// The registration log alone lacks descriptive fields, so the decoder
    /// fetches the triggering transaction's call data and, when the selector
    /// matches the registration entry point, merges the decoded arguments
    /// with the log fields.
    async fn decode_ip_registration(
        &self,
        client: &dyn ChainClient,
        receipt: &TxReceipt,
        log: &RawLog,
    ) -> Result<DecodedEvent, DecodeFailure> {
        let ev = abi::IPRegistered::decode_raw_log_validate(log.topics.iter().copied(), &log.data)
            .map_err(|e| DecodeFailure(format!("IPRegistered: {}", e)))?;

        let input = client
            .get_transaction_input(&receipt.transaction_hash)
            .await
            .map_err(|e| DecodeFailure(format!("transaction fetch: {}", e)))?;

        let (title, description, media_url) = match input {
            Some(input)
                if input.len() >= 4 && input[..4] == abi::mintAndRegisterIpCall::SELECTOR =>
            {
                match abi::mintAndRegisterIpCall::abi_decode_validate(&input) {
                    Ok(call) => (call.title, Some(call.description), Some(call.mediaUrl)),
                    Err(e) => {
                        logging::log_debug(&format!(
                            "[{}] Call data of tx {} did not decode: {}",
                            self.chain.name, receipt.transaction_hash, e
                        ));
                        (ev.name.clone(), None, None)
                    }
                }
            }
            _ => (ev.name.clone(), None, None),
        };

        Ok(DecodedEvent {
            kind: EventKind::IpAssetRegistered,
            data: EventData::IpAssetRegistered(IpAssetData {
                ip_id: format!("{:#x}", ev.ipId),
                token_contract: format!("{:#x}", ev.tokenContract),
                token_id: format!("{:#x}", ev.tokenId),
                name: ev.name,
                uri: ev.uri,
                registration_date: to_millis(ev.registrationDate),
                title,
                description,
                media_url,
            }),
        })
    }
}

/// Chain-native seconds to a millisecond epoch
pub fn to_millis(seconds: U256) -> i64 {
    let seconds: u64 = seconds.try_into().unwrap_or(u64::MAX);
    i64::try_from(seconds).unwrap_or(i64::MAX).saturating_mul(1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ContractAddresses;
    use crate::infrastructure::evm::{ChainBlock, EvmClientError};
    use alloy::primitives::{address, B256};
    use async_trait::async_trait;

    const REGISTRAR: Address = address!("1111111111111111111111111111111111111111");
    const RESOLVER: Address = address!("2222222222222222222222222222222222222222");
    const IP_REGISTRY: Address = address!("3333333333333333333333333333333333333333");

    struct MockClient {
        input: Option<Vec<u8>>,
    }

    #[async_trait]
    impl ChainClient for MockClient {
        async fn get_block_number(&self) -> Result<u64, EvmClientError> {
            Ok(0)
        }

        async fn get_block(&self, _number: u64) -> Result<Option<ChainBlock>, EvmClientError> {
            Ok(None)
        }

        async fn get_transaction_receipt(
            &self,
            _tx_hash: &str,
        ) -> Result<Option<TxReceipt>, EvmClientError> {
            Ok(None)
        }

        async fn get_transaction_input(
            &self,
            _tx_hash: &str,
        ) -> Result<Option<Vec<u8>>, EvmClientError> {
            Ok(self.input.clone())
        }
    }

    fn test_chain() -> Chain {
        Chain {
            name: "testnet".to_string(),
            chain_id: 1315,
            rpc_url: "http://localhost:8545".to_string(),
            explorer_url: "http://localhost:4000".to_string(),
            contracts: ContractAddresses {
                registrar: REGISTRAR,
                resolver: RESOLVER,
                ip_asset_registry: IP_REGISTRY,
            },
            tld: "ip".to_string(),
            genesis_block: 0,
        }
    }

    fn raw_log<E: SolEvent>(address: Address, event: &E) -> RawLog {
        let log_data = event.encode_log_data();
        RawLog {
            address,
            topics: log_data.topics().to_vec(),
            data: log_data.data.to_vec(),
        }
    }

    fn receipt(logs: Vec<RawLog>) -> TxReceipt {
        TxReceipt {
            transaction_hash: format!("{:#x}", B256::repeat_byte(0xab)),
            logs,
        }
    }

    #[tokio::test]
    async fn registration_derives_hashed_identifiers_and_millisecond_expiry() {
        let decoder = EventDecoder::new(test_chain());
        let client = MockClient { input: None };

        let event = abi::NameRegistered {
            name: "alice".to_string(),
            label: namehash::labelhash("alice"),
            owner: address!("4444444444444444444444444444444444444444"),
            baseCost: U256::from(100),
            premium: U256::from(0),
            expires: U256::from(1_700_000_000u64),
        };
        let receipt = receipt(vec![raw_log(REGISTRAR, &event)]);

        let events = decoder.decode_receipt(&client, &receipt).await;

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Register);
        let EventData::Registration(data) = &events[0].data else {
            panic!("expected registration data");
        };
        assert_eq!(data.full_name, "alice.ip");
        assert_eq!(
            data.token_id,
            format!("{:#x}", U256::from_be_bytes(namehash::labelhash("alice").0))
        );
        assert_eq!(data.name_hash, format!("{:#x}", namehash("alice.ip")));
        assert_eq!(data.expires_at, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn transfer_from_zero_address_is_a_mint_and_produces_no_event() {
        let decoder = EventDecoder::new(test_chain());
        let client = MockClient { input: None };

        let mint = abi::Transfer {
            from: Address::ZERO,
            to: address!("4444444444444444444444444444444444444444"),
            tokenId: U256::from(7),
        };
        let receipt = receipt(vec![raw_log(REGISTRAR, &mint)]);

        let events = decoder.decode_receipt(&client, &receipt).await;

        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn real_transfer_decodes() {
        let decoder = EventDecoder::new(test_chain());
        let client = MockClient { input: None };

        let transfer = abi::Transfer {
            from: address!("4444444444444444444444444444444444444444"),
            to: address!("5555555555555555555555555555555555555555"),
            tokenId: U256::from(7),
        };
        let receipt = receipt(vec![raw_log(REGISTRAR, &transfer)]);

        let events = decoder.decode_receipt(&client, &receipt).await;

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::TransferOwnership);
    }

    #[tokio::test]
    async fn logs_from_unwatched_contracts_are_ignored() {
        let decoder = EventDecoder::new(test_chain());
        let client = MockClient { input: None };

        let transfer = abi::Transfer {
            from: address!("4444444444444444444444444444444444444444"),
            to: address!("5555555555555555555555555555555555555555"),
            tokenId: U256::from(7),
        };
        // Same signature, wrong contract
        let receipt = receipt(vec![raw_log(RESOLVER, &transfer)]);

        let events = decoder.decode_receipt(&client, &receipt).await;

        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn malformed_log_is_dropped_without_aborting_the_receipt() {
        let decoder = EventDecoder::new(test_chain());
        let client = MockClient { input: None };

        let broken = RawLog {
            address: REGISTRAR,
            topics: vec![abi::NameRegistered::SIGNATURE_HASH],
            data: vec![0x01, 0x02],
        };
        let renewal = abi::NameRenewed {
            name: "alice".to_string(),
            label: namehash::labelhash("alice"),
            cost: U256::from(1),
            expires: U256::from(1_700_000_000u64),
        };
        let receipt = receipt(vec![broken, raw_log(REGISTRAR, &renewal)]);

        let events = decoder.decode_receipt(&client, &receipt).await;

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Renew);
    }

    #[tokio::test]
    async fn text_change_decodes_key_and_value_from_the_resolver() {
        let decoder = EventDecoder::new(test_chain());
        let client = MockClient { input: None };

        let node = namehash("alice.ip");
        let event = abi::TextChanged {
            node,
            indexedKey: alloy::primitives::keccak256("avatar".as_bytes()),
            key: "avatar".to_string(),
            value: "https://cdn/avatar.png".to_string(),
        };
        let receipt = receipt(vec![raw_log(RESOLVER, &event)]);

        let events = decoder.decode_receipt(&client, &receipt).await;

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::TextChanged);
        let EventData::TextChanged(data) = &events[0].data else {
            panic!("expected text changed data");
        };
        assert_eq!(data.node, format!("{:#x}", node));
        assert_eq!(data.key, "avatar");
        assert_eq!(data.value, "https://cdn/avatar.png");
    }

    #[tokio::test]
    async fn ip_registration_merges_call_data_when_selector_matches() {
        let call = abi::mintAndRegisterIpCall {
            nftContract: address!("6666666666666666666666666666666666666666"),
            recipient: address!("4444444444444444444444444444444444444444"),
            title: "My Artwork".to_string(),
            description: "A very nice piece".to_string(),
            mediaUrl: "ipfs://media".to_string(),
        };
        let decoder = EventDecoder::new(test_chain());
        let client = MockClient {
            input: Some(call.abi_encode()),
        };

        let event = abi::IPRegistered {
            ipId: address!("7777777777777777777777777777777777777777"),
            chainId: U256::from(1315),
            tokenContract: address!("6666666666666666666666666666666666666666"),
            tokenId: U256::from(9),
            name: "asset-9".to_string(),
            uri: "ipfs://meta".to_string(),
            registrationDate: U256::from(1_700_000_000u64),
        };
        let receipt = receipt(vec![raw_log(IP_REGISTRY, &event)]);

        let events = decoder.decode_receipt(&client, &receipt).await;

        assert_eq!(events.len(), 1);
        let EventData::IpAssetRegistered(data) = &events[0].data else {
            panic!("expected ip asset data");
        };
        assert_eq!(data.title, "My Artwork");
        assert_eq!(data.description.as_deref(), Some("A very nice piece"));
        assert_eq!(data.media_url.as_deref(), Some("ipfs://media"));
        assert_eq!(data.registration_date, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn ip_registration_falls_back_to_log_fields_on_selector_mismatch() {
        let decoder = EventDecoder::new(test_chain());
        let client = MockClient {
            input: Some(vec![0xde, 0xad, 0xbe, 0xef, 0x00]),
        };

        let event = abi::IPRegistered {
            ipId: address!("7777777777777777777777777777777777777777"),
            chainId: U256::from(1315),
            tokenContract: address!("6666666666666666666666666666666666666666"),
            tokenId: U256::from(9),
            name: "asset-9".to_string(),
            uri: "ipfs://meta".to_string(),
            registrationDate: U256::from(1_700_000_000u64),
        };
        let receipt = receipt(vec![raw_log(IP_REGISTRY, &event)]);

        let events = decoder.decode_receipt(&client, &receipt).await;

        assert_eq!(events.len(), 1);
        let EventData::IpAssetRegistered(data) = &events[0].data else {
            panic!("expected ip asset data");
        };
        assert_eq!(data.title, "asset-9");
        assert_eq!(data.description, None);
    }
}
