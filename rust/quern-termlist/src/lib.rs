//! Read path for per-document term lists.
//!
//! An inverted index answers "which documents contain term T"; this crate
//! answers the reverse question. For a given document identifier it
//! reconstructs the ordered list of terms occurring in that document,
//! together with the per-term occurrence count (wdf), from a single compact
//! binary record held in a key-value table.
//!
//! # Record format
//!
//! A term-list record is densely packed and forward-only: a small header
//! (document length and an advisory term count, as varints) followed by a
//! sequence of front-coded entries. Consecutive terms are stored in byte
//! order, so each entry records only how many leading bytes of the previous
//! term to keep plus the new suffix; small occurrence counts are packed into
//! the otherwise-unused numeric range of the prefix-reuse byte. See the
//! [`record layout`](TermListIterator#record-layout) notes on the iterator.
//!
//! # Usage
//!
//! [`TermListIterator`] is a forward cursor over one document's record:
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use quern_termlist::TermListIterator;
//! # fn demo<D>(db: Arc<D>) -> quern_common::Result<()>
//! # where D: quern_termlist::TermListStore + quern_termlist::TermStatistics {
//! let mut termlist = TermListIterator::open(db, 7)?;
//! while !termlist.at_end() && termlist.advance()? {
//!     let term = termlist.current_term().to_vec();
//!     let wdf = termlist.current_wdf();
//!     let term_freq = termlist.term_frequency();
//!     // ...
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Decoding is lazy throughout: entries are materialized one at a time, the
//! collection-wide term frequency is resolved only on request (and memoized
//! per position), and position lists are fetched on demand through the
//! [`PositionStore`] collaborator.

mod record;
mod store;
mod termlist;

pub use store::{PositionStore, StatsAccumulator, TermListStore, TermStatistics, doc_id_to_key};
pub use termlist::TermListIterator;

/// Identifier of a document within the collection.
///
/// Valid identifiers are positive; the engine never assigns id 0.
pub type DocId = u64;
