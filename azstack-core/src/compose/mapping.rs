//! Placeholder mapping table.
//!
//! Derives the placeholder -> replacement table from a validated port
//! mapping document. The rules are fixed: they cover the three well-known
//! services of the emulator stack, and entries are emitted in rule order
//! (mongodb, storage, cosmosdb) so the operator listing is deterministic.

use crate::ports::{PortDocument, PortEntry};
use indexmap::IndexMap;

/// Ordered placeholder -> replacement table.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: IndexMap<String, String>,
}

impl MappingTable {
    /// Build the mapping table from a validated port mapping document.
    ///
    /// - A single-record `mongodb` service emits `MONGODB_AS_COSMOSDB_PORT`
    ///   and `MONGODB_PORT` with the same value. `MONGODB_PORT` is a
    ///   deprecated alias kept for older templates; the two are always
    ///   emitted together.
    /// - A list-valued `storage` service emits `STORAGE_PORT_<i>` per
    ///   element, 1-based in document order.
    /// - A list-valued `cosmosdb` service emits `COSMOSDB_PORT_<i>` likewise.
    /// - All other services emit nothing.
    pub fn build(doc: &PortDocument) -> Self {
        let mut entries = IndexMap::new();

        if let Some(PortEntry::Single(record)) = doc.get("mongodb") {
            if let Some(pair) = record.pair() {
                entries.insert("MONGODB_AS_COSMOSDB_PORT".to_string(), pair.clone());
                entries.insert("MONGODB_PORT".to_string(), pair);
            }
        }

        extend_indexed(&mut entries, doc, "storage", "STORAGE_PORT");
        extend_indexed(&mut entries, doc, "cosmosdb", "COSMOSDB_PORT");

        Self { entries }
    }

    /// Look up a replacement value by placeholder key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    /// Iterate entries in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn extend_indexed(
    entries: &mut IndexMap<String, String>,
    doc: &PortDocument,
    service: &str,
    prefix: &str,
) {
    if let Some(PortEntry::Multiple(records)) = doc.get(service) {
        for (i, record) in records.iter().enumerate() {
            if let Some(pair) = record.pair() {
                entries.insert(format!("{}_{}", prefix, i + 1), pair);
            }
        }
    }
}
