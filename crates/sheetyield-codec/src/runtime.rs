//! Runtime Store Loader: rebuilds a nested [`Store`] from a decoded
//! envelope and serves `GetConfig`-style point lookups.

use sheetyield_common::{Key, Record};
use sheetyield_descriptor::MessageDescriptor;
use sheetyield_store::Store;

use crate::envelope::Envelope;
use crate::error::RuntimeError;

/// A store rebuilt from an envelope's bytes, scoped to one scheme.
pub struct Runtime {
    scheme: String,
    store: Store,
}

impl Runtime {
    /// Decode `bytes`, verify the magic, and rebuild the nested index
    /// against `message`.
    pub fn load(bytes: &[u8], message: &MessageDescriptor) -> Result<Self, RuntimeError> {
        let envelope = Envelope::from_bytes(bytes)?;
        let records = envelope.records()?;
        let store = sheetyield_store::build(records, &envelope.keys, message)?;
        Ok(Self {
            scheme: envelope.scheme,
            store,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// First record reachable by a single key, or absent at any miss.
    pub fn get_config1(&self, k1: &Key) -> Option<&Record> {
        self.store.get(k1).and_then(Store::first_record)
    }

    /// First record reachable by two successive keys, or absent at any miss.
    pub fn get_config2(&self, k1: &Key, k2: &Key) -> Option<&Record> {
        self.store
            .get(k1)
            .and_then(|child| child.get(k2))
            .and_then(Store::first_record)
    }
}

/// A [`Runtime`] that tolerates a failed load: per the decoder contract, a
/// bad magic or a truncated/malformed envelope degrades to "not loaded"
/// rather than propagating further — every query on it then returns absent.
pub enum LoadedStore {
    Loaded(Runtime),
    Unloaded,
}

impl LoadedStore {
    pub fn load(bytes: &[u8], message: &MessageDescriptor) -> Self {
        match Runtime::load(bytes, message) {
            Ok(runtime) => LoadedStore::Loaded(runtime),
            Err(err) => {
                tracing::warn!(error = %err, "store failed to load; all queries will return absent");
                LoadedStore::Unloaded
            }
        }
    }

    pub fn get_config1(&self, k1: &Key) -> Option<&Record> {
        match self {
            LoadedStore::Loaded(runtime) => runtime.get_config1(k1),
            LoadedStore::Unloaded => None,
        }
    }

    pub fn get_config2(&self, k1: &Key, k2: &Key) -> Option<&Record> {
        match self {
            LoadedStore::Loaded(runtime) => runtime.get_config2(k1, k2),
            LoadedStore::Unloaded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetyield_common::{Scalar, Value};
    use sheetyield_descriptor::SchemaDocument;
    use std::collections::BTreeMap;

    const SCHEMA: &str = r#"
schemes: [Role]
messages:
  Role:
    options: { excel: roles.xlsx, sheet: Roles, key: roleid }
    fields:
      - { name: roleid, tag: 1, kind: i32 }
      - { name: name, tag: 2, kind: string }
"#;

    fn record(roleid: i64, name: &str) -> Record {
        let mut fields = BTreeMap::new();
        fields.insert(1, Value::Scalar(Scalar::I64(roleid)));
        fields.insert(2, Value::Scalar(Scalar::Str(name.to_string())));
        Value::Message(fields)
    }

    #[test]
    fn loads_and_serves_get_config1() {
        let doc = SchemaDocument::from_yaml_str(SCHEMA).unwrap();
        let role = doc.resolve("Role").unwrap();
        let records = vec![record(10001, "alice")];
        let envelope = Envelope::build("Role", &["roleid".to_string()], &records).unwrap();
        let bytes = envelope.to_bytes().unwrap();

        let runtime = Runtime::load(&bytes, &role).unwrap();
        assert_eq!(runtime.scheme(), "Role");
        assert!(runtime.get_config1(&Key::Int(10001)).is_some());
        assert!(runtime.get_config1(&Key::Int(10002)).is_none());
    }

    #[test]
    fn unloaded_store_returns_absent_on_every_query() {
        let doc = SchemaDocument::from_yaml_str(SCHEMA).unwrap();
        let role = doc.resolve("Role").unwrap();

        let loaded = LoadedStore::load(b"not an envelope", &role);
        assert!(loaded.get_config1(&Key::Int(1)).is_none());
        assert!(loaded.get_config2(&Key::Int(1), &Key::Int(2)).is_none());
    }
}
