/// Identifiers for participants, groups and stored messages.
///
/// Participant and group ids are fixed-size byte arrays that round-trip
/// through hex via `Display` / `FromStr`. `MessageId` is a storage row id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// ParticipantId
// ---------------------------------------------------------------------------

/// BLAKE3 of the participant's Ed25519 public key, truncated to 16 bytes.
/// Displays and parses as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub [u8; 16]);

impl ParticipantId {
    pub fn from_pubkey(pubkey: &[u8; 32]) -> Self {
        let digest = blake3::hash(pubkey);
        let mut id = [0u8; 16];
        id.copy_from_slice(&digest.as_bytes()[..16]);
        ParticipantId(id)
    }

    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        ParticipantId(bytes)
    }
}

impl FromStr for ParticipantId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut id = [0u8; 16];
        hex::decode_to_slice(s, &mut id)?;
        Ok(ParticipantId(id))
    }
}

impl fmt::Debug for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParticipantId({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// GroupId
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub [u8; 32]);

impl GroupId {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        GroupId(bytes)
    }
}

impl FromStr for GroupId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut id = [0u8; 32];
        hex::decode_to_slice(s, &mut id)?;
        Ok(GroupId(id))
    }
}

impl fmt::Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupId({}..)", hex::encode(&self.0[..6]))
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// MessageId
// ---------------------------------------------------------------------------

/// Row id of a message record. Edit records point at their original by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const ALICE_PUB: [u8; 32] =
        hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");

    #[test]
    fn test_participant_id_from_pubkey_deterministic() {
        let a = ParticipantId::from_pubkey(&ALICE_PUB);
        let b = ParticipantId::from_pubkey(&ALICE_PUB);
        assert_eq!(a, b);
        assert_eq!(&a.0[..], &blake3::hash(&ALICE_PUB).as_bytes()[..16]);
    }

    #[test]
    fn test_participant_id_differs_per_key() {
        let a = ParticipantId::from_pubkey(&ALICE_PUB);
        let b = ParticipantId::from_pubkey(&[0x01; 32]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_participant_id_parses_its_display() {
        let id = ParticipantId::from_pubkey(&ALICE_PUB);
        let text = id.to_string();
        assert_eq!(text.len(), 32);
        assert_eq!(text.parse::<ParticipantId>().unwrap(), id);
    }

    #[test]
    fn test_group_id_parse() {
        let gid: GroupId = "ab".repeat(32).parse().unwrap();
        assert_eq!(gid, GroupId::from_bytes([0xAB; 32]));
    }

    #[test]
    fn test_parse_wrong_length_rejected() {
        assert!("abcd".parse::<ParticipantId>().is_err());
        assert!("00".repeat(16).parse::<GroupId>().is_err());
        assert!("zz".repeat(16).parse::<ParticipantId>().is_err());
    }

    #[test]
    fn test_debug_is_abbreviated() {
        let gid = GroupId::from_bytes([0xAB; 32]);
        assert_eq!(format!("{:?}", gid), "GroupId(abababababab..)");
        let pid = ParticipantId::from_bytes([0x01; 16]);
        assert_eq!(format!("{:?}", pid), "ParticipantId(01010101)");
    }

    #[test]
    fn test_message_id_display() {
        assert_eq!(MessageId(42).to_string(), "#42");
    }
}
