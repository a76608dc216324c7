//! States processing the file header and its record length entries.

use either::Either::{self, Left, Right};
use thiserror::Error;
use zerocopy::{
    FromBytes, Immutable, KnownLayout, Unaligned,
    byteorder::little_endian::{U16, U32},
};

use super::{Tag, record::RecordHeader};

/// Size of the file header body, excluding its tag.
pub const FILE_HEADER_SIZE: usize = size_of::<FileHeaderBody>();

/// An error advancing over the start of a stream.
#[derive(Debug, Error)]
pub enum StreamHeaderError {
    /// The stream opened with a tag other than the file header.
    #[error("Stream opens with tag {0:#04x} instead of a file header.")]
    NotFileHeader(u8),
}

/// State token to decode the leading tag of a stream.
#[derive(Debug)]
pub struct StreamStart;

impl StreamStart {
    /// Transition to another state by decoding the leading tag of a stream.
    ///
    /// Returns a successor state token.
    pub fn advance(r: [u8; 1]) -> Result<FileHeader, StreamHeaderError> {
        match Tag::from_byte(r[0]) {
            Some(Tag::FileHeader) => Ok(FileHeader(())),
            _ => Err(StreamHeaderError::NotFileHeader(r[0])),
        }
    }
}

/// Identification of the recording device and file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    pub file_version: u8,
    pub firmware_version: [u8; 4],
    pub product_id: u16,
    /// Device-local creation time, in seconds.
    pub timestamp: u32,
}

#[repr(C)]
#[derive(FromBytes, KnownLayout, Immutable, Unaligned)]
struct FileHeaderBody {
    file_version: u8,
    firmware_version: [u8; 4],
    product_id: U16,
    timestamp: U32,
    _reserved: [u8; 105],
    length_count: u8,
}

/// State token to decode the body of a file header.
#[derive(Debug)]
pub struct FileHeader(pub(super) ());

impl FileHeader {
    /// Transition to another state by decoding the body of a file header.
    ///
    /// Returns the file identification, and a successor state token.
    pub fn advance(self, r: [u8; FILE_HEADER_SIZE]) -> (FileInfo, Either<LengthEntry, RecordHeader>) {
        let FileHeaderBody {
            file_version,
            firmware_version,
            product_id,
            timestamp,
            length_count,
            ..
        } = zerocopy::transmute!(r);

        let info = FileInfo {
            file_version,
            firmware_version,
            product_id: product_id.get(),
            timestamp: timestamp.get(),
        };

        let successor = if length_count != 0 {
            Left(LengthEntry {
                entries_remaining: length_count,
            })
        } else {
            Right(RecordHeader(()))
        };

        (info, successor)
    }
}

/// State token to decode a record length entry.
#[derive(Debug)]
pub struct LengthEntry {
    pub(super) entries_remaining: u8,
}

impl LengthEntry {
    /// Transition to another state by decoding a record length entry.
    ///
    /// Returns the tag and its declared record length (including the tag
    /// byte), and a successor state token.
    pub fn advance(self, r: [u8; 3]) -> ((u8, u16), Either<LengthEntry, RecordHeader>) {
        let tag = r[0];
        let length = u16::from_le_bytes([r[1], r[2]]);

        let entries_remaining = self.entries_remaining - 1;

        let successor = if entries_remaining != 0 {
            Left(LengthEntry { entries_remaining })
        } else {
            Right(RecordHeader(()))
        };

        ((tag, length), successor)
    }
}
