//! Standard label/name hashing for the name service

use alloy::primitives::{keccak256, B256};

/// keccak256 of a single label
pub fn labelhash(label: &str) -> B256 {
    keccak256(label.as_bytes())
}

/// Recursive namehash over dot-separated labels. The empty name hashes to
/// the zero node.
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }

    for label in name.rsplit('.') {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(labelhash(label).as_slice());
        node = keccak256(buf);
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_zero_node() {
        assert_eq!(namehash(""), B256::ZERO);
    }

    #[test]
    fn matches_reference_vectors() {
        assert_eq!(
            format!("{:#x}", namehash("eth")),
            "0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae"
        );
        assert_eq!(
            format!("{:#x}", namehash("foo.eth")),
            "0xde9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f"
        );
        assert_eq!(
            format!("{:#x}", labelhash("eth")),
            "0x4f5b812789fc606be1b3b16908db13fc7a9adf7ca72641f84d75b47069d3d7f0"
        );
    }
}
