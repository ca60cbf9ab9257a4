use serde::{Deserialize, Serialize};

/// The five event families produced by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "register")]
    Register,
    #[serde(rename = "renew")]
    Renew,
    #[serde(rename = "transferOwnership")]
    TransferOwnership,
    #[serde(rename = "textChanged")]
    TextChanged,
    #[serde(rename = "ipAssetRegistered")]
    IpAssetRegistered,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Register,
        EventKind::Renew,
        EventKind::TransferOwnership,
        EventKind::TextChanged,
        EventKind::IpAssetRegistered,
    ];

    /// Name of the queue this event family is dispatched to
    pub fn queue_name(&self) -> &'static str {
        match self {
            EventKind::Register => "name-registered-queue",
            EventKind::Renew => "name-renewed-queue",
            EventKind::TransferOwnership => "ownership-transfer-queue",
            EventKind::TextChanged => "text-changed-queue",
            EventKind::IpAssetRegistered => "ip-asset-registered-queue",
        }
    }

    /// Job name used for deliveries on this family's queue
    pub fn job_name(&self) -> &'static str {
        match self {
            EventKind::Register => "handle-name-registered",
            EventKind::Renew => "handle-name-renewed",
            EventKind::TransferOwnership => "handle-ownership-transfer",
            EventKind::TextChanged => "handle-text-changed",
            EventKind::IpAssetRegistered => "handle-ip-asset-registered",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::Register => "register",
            EventKind::Renew => "renew",
            EventKind::TransferOwnership => "transferOwnership",
            EventKind::TextChanged => "textChanged",
            EventKind::IpAssetRegistered => "ipAssetRegistered",
        };
        write!(f, "{}", name)
    }
}

/// Decoded fields of a registration event. Hashed identifiers are derived
/// at decode time so projectors stay chain-agnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationData {
    /// Registered label, e.g. `alice`
    pub label: String,
    /// Full name including the TLD, e.g. `alice.ip`
    pub full_name: String,
    /// uint256(labelhash(label)), 0x-prefixed hex
    pub token_id: String,
    /// namehash(full_name), 0x-prefixed hex
    pub name_hash: String,
    pub owner: String,
    pub base_cost: String,
    pub premium: String,
    /// Millisecond epoch
    pub expires_at: i64,
}

/// Decoded fields of a renewal event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalData {
    pub label: String,
    pub full_name: String,
    pub token_id: String,
    pub name_hash: String,
    pub cost: String,
    /// Millisecond epoch
    pub expires_at: i64,
}

/// Decoded fields of an ownership transfer event. Mints (transfer from the
/// zero address) never reach this type; the decoder drops them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferData {
    pub from: String,
    pub to: String,
    pub token_id: String,
}

/// Decoded fields of a text record change event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChangedData {
    /// namehash of the name the record belongs to, 0x-prefixed hex
    pub node: String,
    pub key: String,
    pub value: String,
}

/// Decoded fields of an IP asset registration, merged from the log and the
/// triggering transaction's call data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAssetData {
    pub ip_id: String,
    pub token_contract: String,
    pub token_id: String,
    pub name: String,
    pub uri: String,
    /// Millisecond epoch
    pub registration_date: i64,
    /// From call data when the selector matched, otherwise the log name
    pub title: String,
    pub description: Option<String>,
    pub media_url: Option<String>,
}

/// Tagged union of per-family payloads. `event_type` on the job carries the
/// tag on the wire; the enum keeps dispatch exhaustive in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventData {
    Registration(RegistrationData),
    IpAssetRegistered(IpAssetData),
    Renewal(RenewalData),
    Transfer(TransferData),
    TextChanged(TextChangedData),
}

/// One decoded event, before it is tagged with its sequence index
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEvent {
    pub kind: EventKind,
    pub data: EventData,
}

/// Transaction context carried with every job payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptContext {
    pub tx_hash: String,
    pub block_number: u64,
    pub chain_id: u64,
    /// Block timestamp as a millisecond epoch
    pub timestamp_ms: i64,
}

/// Queue job payload. Wire shape is stable:
/// `{ txReceipt, returnValues, eventType, index }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventJob {
    #[serde(rename = "txReceipt")]
    pub receipt: ReceiptContext,
    #[serde(rename = "returnValues")]
    pub return_values: EventData,
    #[serde(rename = "eventType")]
    pub event_type: EventKind,
    /// Zero-based sequence index of the event within its transaction
    pub index: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_wire_shape_is_stable() {
        let job = EventJob {
            receipt: ReceiptContext {
                tx_hash: "0xabc".to_string(),
                block_number: 42,
                chain_id: 1315,
                timestamp_ms: 1_700_000_000_000,
            },
            return_values: EventData::Renewal(RenewalData {
                label: "alice".to_string(),
                full_name: "alice.ip".to_string(),
                token_id: "0x1".to_string(),
                name_hash: "0x2".to_string(),
                cost: "0".to_string(),
                expires_at: 1_800_000_000_000,
            }),
            event_type: EventKind::Renew,
            index: 0,
        };

        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["eventType"], "renew");
        assert_eq!(json["index"], 0);
        assert_eq!(json["txReceipt"]["txHash"], "0xabc");
        assert_eq!(json["returnValues"]["fullName"], "alice.ip");
    }

    #[test]
    fn queue_routing_is_one_queue_per_family() {
        let mut names: Vec<&str> = EventKind::ALL.iter().map(|k| k.queue_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), EventKind::ALL.len());
    }
}
