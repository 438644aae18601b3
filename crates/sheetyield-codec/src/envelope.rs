//! The binary container: a fixed magic, the scheme name, the key-field
//! ordering used to build the store, and one self-contained encoded
//! record per row.

use serde::{Deserialize, Serialize};
use sheetyield_common::Record;

use crate::error::{DecodeError, EncodeError};

pub const MAGIC: u32 = 0x09CC_9A4B;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub magic: u32,
    pub scheme: String,
    pub keys: Vec<String>,
    pub datas: Vec<Vec<u8>>,
    /// Reserved; always empty in this revision.
    pub hash: String,
}

impl Envelope {
    /// Build an envelope from a flat, first-level record list (the order
    /// the Row Parser produced, not the store's nested order — the
    /// hierarchy is reconstructed from `keys` on load).
    pub fn build(scheme: &str, keys: &[String], records: &[Record]) -> Result<Self, EncodeError> {
        let datas = records
            .iter()
            .map(bincode::serialize)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            magic: MAGIC,
            scheme: scheme.to_string(),
            keys: keys.to_vec(),
            datas,
            hash: String::new(),
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode and verify the magic number. A mismatch means "not loaded" per the
    /// decoder contract — callers should treat this as an absent store, not panic.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let envelope: Envelope = bincode::deserialize(bytes)?;
        if envelope.magic != MAGIC {
            return Err(DecodeError::MagicMismatch {
                expected: MAGIC,
                found: envelope.magic,
            });
        }
        Ok(envelope)
    }

    pub fn records(&self) -> Result<Vec<Record>, DecodeError> {
        self.datas
            .iter()
            .map(|data| bincode::deserialize(data).map_err(DecodeError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetyield_common::{Scalar, Value};
    use std::collections::BTreeMap;

    fn record(roleid: i64) -> Record {
        let mut fields = BTreeMap::new();
        fields.insert(1, Value::Scalar(Scalar::I64(roleid)));
        Value::Message(fields)
    }

    #[test]
    fn round_trips_through_bytes() {
        let records = vec![record(10001), record(10002)];
        let envelope = Envelope::build("Role", &["roleid".to_string()], &records).unwrap();
        let bytes = envelope.to_bytes().unwrap();

        let decoded = Envelope::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.scheme, "Role");
        assert_eq!(decoded.keys, vec!["roleid".to_string()]);
        assert_eq!(decoded.records().unwrap(), records);
    }

    #[test]
    fn magic_mismatch_is_rejected() {
        let mut envelope = Envelope::build("Role", &["roleid".to_string()], &[]).unwrap();
        envelope.magic = 0xDEAD_BEEF;
        let bytes = envelope.to_bytes().unwrap();
        let err = Envelope::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::MagicMismatch { .. }));
    }

    #[test]
    fn truncated_bytes_are_rejected() {
        let records = vec![record(1)];
        let envelope = Envelope::build("Role", &["roleid".to_string()], &records).unwrap();
        let bytes = envelope.to_bytes().unwrap();
        let err = Envelope::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }
}
