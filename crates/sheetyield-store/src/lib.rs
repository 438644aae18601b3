//! Hierarchical Keyed Store (C4): builds an n-level nested index over a
//! flat record list using an ordered list of key field names.

pub mod error;

use std::collections::BTreeMap;

use sheetyield_common::{Key, Record};
use sheetyield_descriptor::MessageDescriptor;

pub use error::SchemaError;

/// A tree node owning either a children mapping (internal) or, at the
/// bottom of the recursion, just the records it was built from (leaf).
///
/// An internal node also carries the flattened record list of everything
/// beneath it, per §3's data model — useful for round-trip checks without
/// re-walking the tree.
#[derive(Debug, Clone)]
pub struct Store {
    records: Vec<Record>,
    children: Option<BTreeMap<Key, Store>>,
}

impl Store {
    fn leaf(records: Vec<Record>) -> Self {
        Self {
            records,
            children: None,
        }
    }

    fn internal(records: Vec<Record>, children: BTreeMap<Key, Store>) -> Self {
        Self {
            records,
            children: Some(children),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// All records reachable beneath this node, in first-seen order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The first record at this node, the shape `GetConfig` ultimately
    /// returns: first-wins on duplicate key tuples (§9 resolved quirk).
    pub fn first_record(&self) -> Option<&Record> {
        self.records.first()
    }

    /// Children keys in Key-total-order (free from `BTreeMap`'s own
    /// ordering, since `Key: Ord` implements exactly that order).
    pub fn export_keys(&self) -> Vec<Key> {
        match &self.children {
            Some(children) => children.keys().cloned().collect(),
            None => Vec::new(),
        }
    }

    pub fn get(&self, key: &Key) -> Option<&Store> {
        self.children.as_ref()?.get(key)
    }

    pub fn children(&self) -> Option<&BTreeMap<Key, Store>> {
        self.children.as_ref()
    }
}

/// Build a store from a flat record list and an ordered, non-empty list of
/// key field names, resolved against `message`.
///
/// Partitions `records` by the first key field's value (preserving
/// relative order within each bucket), recurses with the remaining key
/// names on each bucket, and terminates in a leaf once the key list is
/// exhausted.
pub fn build(
    records: Vec<Record>,
    key_names: &[String],
    message: &MessageDescriptor,
) -> Result<Store, SchemaError> {
    if key_names.is_empty() {
        return Err(SchemaError::EmptyKeyList(message.name.clone()));
    }
    build_level(records, key_names, message)
}

fn build_level(
    records: Vec<Record>,
    key_names: &[String],
    message: &MessageDescriptor,
) -> Result<Store, SchemaError> {
    let Some((field_name, rest)) = key_names.split_first() else {
        return Ok(Store::leaf(records));
    };

    let field = message
        .find_field(field_name)
        .ok_or_else(|| SchemaError::UnknownKeyField {
            message: message.name.clone(),
            field: field_name.clone(),
        })?;
    if !field.kind.is_key_capable() {
        return Err(SchemaError::NonKeyCapableField {
            message: message.name.clone(),
            field: field_name.clone(),
            kind: field.kind.to_string(),
        });
    }

    // Partition preserving relative order: a BTreeMap<Key, Vec<Record>>
    // groups by key while a plain `entry(..).or_default().push(..)` keeps
    // each bucket's records in the order they were encountered.
    let mut buckets: BTreeMap<Key, Vec<Record>> = BTreeMap::new();
    for record in records {
        let field_value = record
            .as_message()
            .and_then(|fields| fields.get(&field.tag))
            .ok_or_else(|| SchemaError::MissingKeyValue {
                message: message.name.clone(),
                field: field_name.clone(),
            })?;
        let key = field_value
            .as_key()
            .ok_or_else(|| SchemaError::NonKeyCapableField {
                message: message.name.clone(),
                field: field_name.clone(),
                kind: field.kind.to_string(),
            })?;
        buckets.entry(key).or_default().push(record);
    }

    let mut children = BTreeMap::new();
    let mut flattened = Vec::new();
    for (key, bucket) in buckets {
        flattened.extend(bucket.iter().cloned());
        let child = build_level(bucket, rest, message)?;
        children.insert(key, child);
    }

    Ok(Store::internal(flattened, children))
}
