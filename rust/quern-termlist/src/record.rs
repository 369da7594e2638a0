//! Byte layout of a term-list record.
//!
//! One record holds the complete term list of one document:
//!
//! ```text
//! +--------+-----------+-----+---------+---------+-----+
//! | doclen | list size | '0' | entry 0 | entry 1 | ... |
//! +--------+-----------+-----+---------+---------+-----+
//!   varint   varint      opt
//! ```
//!
//! `doclen` is the document's total token count and `list size` an advisory
//! (not necessarily exact) term count. The optional `'0'` byte is a padding
//! marker the writer leaves to permit limited in-place growth; when present
//! directly after the header it is always consumed as padding, never
//! interpreted as entry data.
//!
//! Each entry front-codes one term against its predecessor:
//!
//! ```text
//! +-----------+------------+----------------+-------+
//! | reuse_len | append_len | suffix bytes   | [wdf] |
//! +-----------+------------+----------------+-------+
//!   1 byte      1 byte       append_len       varint, only if not packed
//! ```
//!
//! The `reuse_len` byte is dual-purpose. A value no greater than the
//! previous term's length is a plain prefix-reuse count, and the entry's
//! wdf follows the suffix as a varint. A value *exceeding* the previous
//! term's length packs both fields into the one byte: with
//! `divisor = previous_len + 1`, the wdf is `reuse_len / divisor - 1` and
//! the true reuse count is `reuse_len % divisor`. The comparison against
//! the previous term's length is the only flag; the first entry of a record
//! decodes by the same rule against the empty string.
//!
//! Every read is bounds-checked: a record that ends inside a field is
//! reported as corruption, never as a short term or a defaulted count.

use quern_common::{Result, error::Error};
use quern_varint::{DecodeError, VarUint};

/// Padding marker the writer may leave after the header.
const PADDING_MARKER: u8 = b'0';

/// Decoded fixed header of a term-list record.
#[derive(Debug)]
pub(crate) struct Header {
    pub doc_len: u32,
    pub term_count: u32,
    /// Offset of the first entry, past the optional padding byte.
    pub entries_start: usize,
}

/// Parses the record header. The caller handles the zero-byte record case;
/// `buf` is non-empty here.
pub(crate) fn parse_header(buf: &[u8]) -> Result<Header> {
    let mut pos = 0;
    let doc_len = read_uint::<u32>(buf, &mut pos, "doclen")?;
    let term_count = read_uint::<u32>(buf, &mut pos, "list size")?;

    // Writer padding, consumed exactly once when present. A first-entry
    // reuse_len byte of 0x30 therefore cannot exist at this offset.
    if buf.get(pos) == Some(&PADDING_MARKER) {
        pos += 1;
    }

    Ok(Header {
        doc_len,
        term_count,
        entries_start: pos,
    })
}

/// Decodes one front-coded entry at `pos`, transforming `term` from the
/// previous term into the new one. Returns the entry's wdf and leaves `pos`
/// on the next entry (or the record end).
pub(crate) fn read_entry(buf: &[u8], pos: &mut usize, term: &mut Vec<u8>) -> Result<u32> {
    let mut reuse_len = take_byte(buf, pos)? as usize;
    let mut packed_wdf = None;
    if reuse_len > term.len() {
        // The wdf is packed into the reuse byte.
        let divisor = term.len() + 1;
        packed_wdf = Some((reuse_len / divisor - 1) as u32);
        reuse_len %= divisor;
    }
    term.truncate(reuse_len);

    let append_len = take_byte(buf, pos)? as usize;
    let suffix_end = *pos + append_len;
    if suffix_end > buf.len() {
        return Err(too_little_data("term"));
    }
    term.extend_from_slice(&buf[*pos..suffix_end]);
    *pos = suffix_end;

    match packed_wdf {
        Some(wdf) => Ok(wdf),
        None => read_uint::<u32>(buf, pos, "wdf"),
    }
}

/// Decodes one varint at `pos`, mapping the codec's failure kinds onto the
/// record-level corruption diagnostics for `field`.
pub(crate) fn read_uint<T: VarUint>(buf: &[u8], pos: &mut usize, field: &str) -> Result<T> {
    match T::decode_varint(&buf[*pos..]) {
        Ok((value, used)) => {
            *pos += used;
            Ok(value)
        }
        Err(DecodeError::Truncated) => Err(too_little_data(field)),
        Err(DecodeError::Overflow) => Err(overflowed_value(field)),
    }
}

fn take_byte(buf: &[u8], pos: &mut usize) -> Result<u8> {
    let Some(&byte) = buf.get(*pos) else {
        return Err(too_little_data("term"));
    };
    *pos += 1;
    Ok(byte)
}

#[cold]
fn too_little_data(field: &str) -> Error {
    Error::corrupt(format!("Too little data for {field} in termlist"))
}

#[cold]
fn overflowed_value(field: &str) -> Error {
    Error::corrupt(format!("Overflowed value for {field} in termlist"))
}
