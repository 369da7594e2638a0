//! Contracts for the stores the term-list iterator collaborates with.
//!
//! The iterator itself only decodes bytes; everything it needs from the
//! surrounding engine crosses one of the traits below. A database handle
//! implementing them is shared read-only (`Arc`) across any number of
//! concurrently open iterators.

use quern_common::Result;

use crate::DocId;

/// Access to the key-value table holding raw term-list records.
pub trait TermListStore {
    /// Fetches the raw record stored under `key`, or `Ok(None)` when the
    /// table holds no entry for it. Absence is a recoverable condition, not
    /// a corruption error.
    fn get_exact_entry(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;
}

/// Collection-wide term statistics.
pub trait TermStatistics {
    /// Number of documents in the collection containing `term`.
    ///
    /// A term that occurs in any document has a frequency of at least one;
    /// backends never report zero for a stored term.
    fn term_frequency(&self, term: &[u8]) -> u64;

    /// Total number of documents in the collection.
    fn document_count(&self) -> u64;
}

/// Access to the per-term position lists used for phrase and proximity
/// matching.
pub trait PositionStore {
    /// Token positions at which `term` occurs within document `doc_id`, in
    /// increasing order.
    fn position_list(&self, doc_id: DocId, term: &[u8]) -> Box<dyn Iterator<Item = u32> + '_>;

    /// Number of positions at which `term` occurs within document `doc_id`.
    fn position_count(&self, doc_id: DocId, term: &[u8]) -> u32;
}

/// Sink for the per-term statistics consumed by relevance-feedback and
/// query-expansion scoring.
pub trait StatsAccumulator {
    fn accumulate(&mut self, wdf: u32, doc_len: u32, term_freq: u64, doc_count: u64);
}

/// Builds the table key under which a document's term-list record is stored.
///
/// The packing preserves sort order: a length byte followed by the
/// big-endian significant bytes of the id, so byte-wise key comparison
/// matches numeric id comparison and table iteration visits documents in id
/// order.
pub fn doc_id_to_key(doc_id: DocId) -> Vec<u8> {
    let be = doc_id.to_be_bytes();
    let skip = (doc_id.leading_zeros() / 8) as usize;
    let mut key = Vec::with_capacity(1 + be.len() - skip);
    key.push((be.len() - skip) as u8);
    key.extend_from_slice(&be[skip..]);
    key
}
