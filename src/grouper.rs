//! Streaming grouping of feed records
//!
//! Consumes the feed's JSON array element by element, decoding and folding
//! each record into an ordered group map without materializing the raw
//! record list. A single malformed element fails the whole batch; records
//! with blank names are silently dropped.

use crate::error::Result;
use crate::record::{Item, ListId, Record};
use serde::Serialize;
use serde::de::{self, Deserializer as _};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Read;

/// Items grouped by [`ListId`] in ascending order, each group sorted by name
///
/// Groups contain only items with non-blank names; a key with zero
/// qualifying items is absent entirely. Within a group, items are sorted
/// ascending by name using plain byte-wise `str` ordering (total and
/// locale-independent); items with equal names keep their decode order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GroupedItems(BTreeMap<ListId, Vec<Item>>);

impl GroupedItems {
    /// Parse and group a feed body from a reader
    ///
    /// The payload must be exactly one JSON array of record objects;
    /// trailing content after the array is rejected.
    ///
    /// # Errors
    /// Returns a parse error if the JSON is malformed, the top level is not
    /// an array, or any element fails to decode.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_reader(reader);
        let mut groups = (&mut deserializer).deserialize_seq(GroupVisitor)?;
        deserializer.end()?;

        for items in groups.values_mut() {
            // Stable sort: equal names keep their decode order
            items.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Ok(GroupedItems(groups))
    }

    /// Parse and group a feed body held in memory
    ///
    /// # Errors
    /// Same conditions as [`GroupedItems::from_reader`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(bytes)
    }

    /// Number of non-empty groups
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no group qualified
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of items across all groups
    pub fn total_items(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Items of one group, if the group exists
    pub fn get(&self, list_id: ListId) -> Option<&[Item]> {
        self.0.get(&list_id).map(Vec::as_slice)
    }

    /// Iterate groups in ascending [`ListId`] order
    pub fn iter(&self) -> impl Iterator<Item = (ListId, &[Item])> + '_ {
        self.0.iter().map(|(id, items)| (*id, items.as_slice()))
    }

    /// Group keys in ascending order
    pub fn list_ids(&self) -> impl Iterator<Item = ListId> + '_ {
        self.0.keys().copied()
    }
}

struct GroupVisitor;

impl<'de> de::Visitor<'de> for GroupVisitor {
    type Value = BTreeMap<ListId, Vec<Item>>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("a JSON array of item records")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        let mut groups: BTreeMap<ListId, Vec<Item>> = BTreeMap::new();
        let mut seen = 0usize;
        let mut dropped = 0usize;

        while let Some(value) = seq.next_element::<Value>()? {
            seen += 1;
            let record = Record::decode(&value).map_err(de::Error::custom)?;
            if record.item.has_display_name() {
                groups.entry(record.list_id).or_default().push(record.item);
            } else {
                dropped += 1;
                tracing::debug!(
                    id = record.item.id,
                    list_id = %record.list_id,
                    "dropping record with blank name"
                );
            }
        }

        tracing::debug!(
            records = seen,
            dropped = dropped,
            groups = groups.len(),
            "grouped feed records"
        );

        Ok(groups)
    }
}
