//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for applications that need fine control over
//! decoder internals, such as those streaming a recording straight off the
//! watch. See [`crate::avec`] for implementations covering common decoding
//! patterns.
//!
//! # Architecture
//!
//! All states are represented by a zero-size, non-copy token. Once enough bytes
//! are ready, transition to another state by calling the token's `advance`
//! method. This will return a successor state token, along with any extracted
//! data.
//!
//! A recording opens with a file header record, whose body is followed by a
//! table of `(tag, length)` entries. Every later record is a tag byte and a
//! body whose size is only known from that table. The finite-state machine
//! does not keep the table itself: implementations collect the entries into a
//! [`table::LengthTable`] and consult it between the [`record::RecordHeader`]
//! and [`record::RecordBody`] states.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! constructed.
//!
//! Some areas of the decoding process are not represented in the finite-state
//! machine and must be carefully written:
//!
//! - Reading bytes from the correct place in the document, including buffering
//!   as necessary.
//!
//! - Sizing each record body from the length table, and ending decoding once
//!   the document is exhausted.
//!
//! - Placing time-series records by timestamp. See [`crate::avec::slice`] for
//!   the reference behaviour.

use zerocopy::TryFromBytes;

pub mod header;
pub mod record;
pub mod table;

/// Entrypoint to the finite-state machine.
pub type Decoder = header::StreamStart;

/// Record tags known to this crate.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromBytes)]
pub enum Tag {
    FileHeader = 0x20,
    Status = 0x21,
    Position = 0x22,
    HeartRate = 0x25,
    Summary = 0x27,
    Lap = 0x2f,
    Treadmill = 0x32,
    Swim = 0x34,
}

impl Tag {
    /// Interpret a tag byte, if it names a known record kind.
    pub fn from_byte(b: u8) -> Option<Tag> {
        let tag: Result<Tag, _> = zerocopy::try_transmute!(b);
        tag.ok()
    }
}
