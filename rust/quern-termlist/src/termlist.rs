//! Forward iterator over one document's term-list record.

use std::sync::Arc;

use quern_common::{Result, error::Error};

use crate::DocId;
use crate::record::{self, Header};
use crate::store::{PositionStore, StatsAccumulator, TermListStore, TermStatistics, doc_id_to_key};

/// Cursor over the record buffer. Exactly one of the two states holds at
/// any time; `Exhausted` is terminal.
#[derive(Debug)]
enum Cursor {
    /// Offset of the next undecoded byte within the record.
    Positioned(usize),
    /// The record has been fully consumed.
    Exhausted,
}

/// A lazy, forward-only cursor over the terms of one document.
///
/// Opening the iterator fetches the document's term-list record from the
/// table and decodes its header; every call to [`advance`](Self::advance)
/// then decodes exactly one front-coded entry. Each entry is
/// delta-compressed against its predecessor, so the record is forward-only:
/// there is no random access, and [`skip_to`](Self::skip_to) is a linear
/// scan.
///
/// Terms are byte strings and enumerate in strictly increasing byte order.
/// The iterator owns a private copy of the record; the database handle `D`
/// is shared read-only, so any number of iterators may be open against it
/// at once, each used from one thread at a time.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use quern_termlist::TermListIterator;
/// # fn demo<D: quern_termlist::TermListStore>(db: Arc<D>) -> quern_common::Result<()> {
/// let mut termlist = TermListIterator::open(db, 7)?;
/// while !termlist.at_end() && termlist.advance()? {
///     println!("{:?} x{}", termlist.current_term(), termlist.current_wdf());
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Record layout
///
/// A record is a header (document length and advisory term count, as
/// varints, plus an optional writer-padding byte) followed by front-coded
/// entries: a prefix-reuse byte (which may also carry a small occurrence
/// count packed into its unused numeric range), a suffix length byte, the
/// suffix itself, and the occurrence count as a varint when it was not
/// packed. A record that ends inside any field reports corruption; a
/// truncated count never defaults to zero.
///
/// # Preconditions
///
/// [`current_term`](Self::current_term), [`current_wdf`](Self::current_wdf)
/// and the per-position queries (term frequency, statistics, positions) are
/// meaningful only between the first successful `advance` and the terminal
/// transition. Querying them in the terminal state, or advancing past it,
/// is caller misuse and is enforced with debug assertions rather than
/// reported as a recoverable error.
pub struct TermListIterator<D> {
    db: Arc<D>,
    doc_id: DocId,
    /// Private copy of the raw record, owned for the iterator's lifetime.
    data: Box<[u8]>,
    cursor: Cursor,
    doc_len: u32,
    term_count: u32,
    current_term: Vec<u8>,
    current_wdf: u32,
    /// Collection-wide document frequency of `current_term`; `None` until
    /// first requested for the current position.
    current_termfreq: Option<u64>,
}

impl<D> std::fmt::Debug for TermListIterator<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermListIterator")
            .field("doc_id", &self.doc_id)
            .field("data", &self.data)
            .field("cursor", &self.cursor)
            .field("doc_len", &self.doc_len)
            .field("term_count", &self.term_count)
            .field("current_term", &self.current_term)
            .field("current_wdf", &self.current_wdf)
            .field("current_termfreq", &self.current_termfreq)
            .finish_non_exhaustive()
    }
}

impl<D: TermListStore> TermListIterator<D> {
    /// Opens the term list of `doc_id`.
    ///
    /// Fails with a not-found error when the table holds no record for the
    /// document, and with a corruption error when the record's header does
    /// not decode. A zero-byte record is a valid empty term list: document
    /// length and term count are zero and the iterator starts exhausted,
    /// as it does for a header-only record with no entries.
    pub fn open(db: Arc<D>, doc_id: DocId) -> Result<Self> {
        let data = db
            .get_exact_entry(&doc_id_to_key(doc_id))?
            .ok_or_else(|| Error::document_not_found(doc_id))?
            .into_boxed_slice();
        log::debug!("opened termlist for document {doc_id}: {} bytes", data.len());

        if data.is_empty() {
            return Ok(Self {
                db,
                doc_id,
                data,
                cursor: Cursor::Exhausted,
                doc_len: 0,
                term_count: 0,
                current_term: Vec::new(),
                current_wdf: 0,
                current_termfreq: None,
            });
        }

        let Header {
            doc_len,
            term_count,
            entries_start,
        } = record::parse_header(&data)?;
        let cursor = if entries_start == data.len() {
            Cursor::Exhausted
        } else {
            Cursor::Positioned(entries_start)
        };
        Ok(Self {
            db,
            doc_id,
            data,
            cursor,
            doc_len,
            term_count,
            current_term: Vec::new(),
            current_wdf: 0,
            current_termfreq: None,
        })
    }
}

impl<D> TermListIterator<D> {
    /// The document this iterator was opened for.
    pub fn doc_id(&self) -> DocId {
        self.doc_id
    }

    /// Total token count of the document, from the record header.
    pub fn document_length(&self) -> u32 {
        self.doc_len
    }

    /// Advisory term count from the record header; not necessarily exact.
    pub fn term_count(&self) -> u32 {
        self.term_count
    }

    /// True once the record is fully consumed. Terminal: no further
    /// `advance` is permitted.
    pub fn at_end(&self) -> bool {
        matches!(self.cursor, Cursor::Exhausted)
    }

    /// The term at the current position.
    pub fn current_term(&self) -> &[u8] {
        debug_assert!(!self.at_end(), "current_term queried on exhausted termlist");
        &self.current_term
    }

    /// Occurrence count of the current term within this document.
    pub fn current_wdf(&self) -> u32 {
        debug_assert!(!self.at_end(), "current_wdf queried on exhausted termlist");
        self.current_wdf
    }

    /// Moves to the next entry, returning `false` on the transition into
    /// the terminal state (no term is produced and none consumed).
    pub fn advance(&mut self) -> Result<bool> {
        let mut pos = match self.cursor {
            Cursor::Positioned(pos) => pos,
            Cursor::Exhausted => {
                debug_assert!(false, "advance called on exhausted termlist");
                return Ok(false);
            }
        };
        if pos == self.data.len() {
            log::trace!("termlist for document {} exhausted", self.doc_id);
            self.cursor = Cursor::Exhausted;
            return Ok(false);
        }

        self.current_termfreq = None;
        self.current_wdf = record::read_entry(&self.data, &mut pos, &mut self.current_term)?;
        self.cursor = Cursor::Positioned(pos);
        Ok(true)
    }

    /// Advances until `current_term >= target` (byte order) or the list is
    /// exhausted. A no-op when already at or past `target`, including in
    /// the terminal state.
    ///
    /// The format is only forward-decodable, so this is linear in the
    /// number of skipped entries.
    pub fn skip_to(&mut self, target: &[u8]) -> Result<()> {
        while !self.at_end() && self.current_term.as_slice() < target {
            self.advance()?;
        }
        Ok(())
    }
}

impl<D: TermStatistics> TermListIterator<D> {
    /// Number of documents in the collection containing the current term,
    /// resolved through the term-statistics store on first request and
    /// memoized until the next `advance`.
    pub fn term_frequency(&mut self) -> u64 {
        debug_assert!(!self.at_end(), "term_frequency queried on exhausted termlist");
        match self.current_termfreq {
            Some(freq) => freq,
            None => {
                let freq = self.db.term_frequency(&self.current_term);
                // The current term occurs in this document, so the
                // collection-wide frequency is at least one.
                debug_assert!(freq > 0, "zero term frequency for a stored term");
                self.current_termfreq = Some(freq);
                freq
            }
        }
    }

    /// Feeds the current position's statistics into an expansion-statistics
    /// accumulator: (wdf, document length, term frequency, collection
    /// document count).
    pub fn accumulate_stats<S: StatsAccumulator>(&mut self, stats: &mut S) {
        debug_assert!(!self.at_end(), "accumulate_stats on exhausted termlist");
        let term_freq = self.term_frequency();
        stats.accumulate(
            self.current_wdf,
            self.doc_len,
            term_freq,
            self.db.document_count(),
        );
    }
}

impl<D: PositionStore> TermListIterator<D> {
    /// Token positions of the current term within this document, fetched
    /// fresh from the position-list store.
    pub fn position_list(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        debug_assert!(!self.at_end(), "position_list queried on exhausted termlist");
        self.db.position_list(self.doc_id, &self.current_term)
    }

    /// Number of positions of the current term within this document.
    pub fn position_count(&self) -> u32 {
        debug_assert!(!self.at_end(), "position_count queried on exhausted termlist");
        self.db.position_count(self.doc_id, &self.current_term)
    }
}
