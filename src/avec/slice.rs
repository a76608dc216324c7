//! Slice-based decoder implementation.

use either::Either::{Left, Right};
use log::debug;
use thiserror::Error;

use crate::{
    model::ActivityFile,
    sans::{
        Decoder,
        header::StreamHeaderError,
        record::RecordError,
        table::LengthTable,
    },
};

use super::{
    Options,
    assemble::Assembler,
    series::{Series, SeriesError},
};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error)]
pub enum Error {
    /// The stream does not follow the recording format.
    #[error("Malformed stream: {0}")]
    MalformedStream(#[from] Malformed),
    /// Unexpectedly reached the end of the slice.
    #[error("Record at offset {offset} needs {needed} bytes, but only {available} remain.")]
    TruncatedRecord {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// A timestamp lies too far from the start of its series.
    #[error("{series:?} sample at index {index} exceeds the limit of {limit} samples.")]
    ResourceLimitExceeded {
        series: Series,
        index: usize,
        limit: usize,
    },
}

/// Ways in which a stream can break the recording format.
#[derive(Debug, Error)]
pub enum Malformed {
    /// The slice is empty.
    #[error("no file header.")]
    MissingFileHeader,
    /// The first record is not a file header.
    #[error("stream opens with tag {0:#04x} instead of a file header.")]
    NotFileHeader(u8),
    /// Found a second file header.
    #[error("found a file header after the start of the stream.")]
    RepeatedFileHeader,
    /// A tag has no declared length, so its record cannot be skipped.
    #[error("tag {tag:#04x} at offset {offset} has no declared length.")]
    UnknownTag { tag: u8, offset: usize },
    /// A tag's declared length does not cover its tag byte.
    #[error("tag {tag:#04x} at offset {offset} declares a length of zero.")]
    ZeroLength { tag: u8, offset: usize },
    /// A known tag's declared length is shorter than its layout.
    #[error("record {tag:#04x} declares {declared} bytes, but its layout needs {required}.")]
    ShortRecord {
        tag: u8,
        declared: usize,
        required: usize,
    },
    /// A sample predates the first sample of its series.
    #[error("{series:?} sample at {timestamp} predates the first sample at {baseline}.")]
    TimestampRegression {
        series: Series,
        timestamp: u32,
        baseline: u32,
    },
}

impl From<StreamHeaderError> for Error {
    fn from(err: StreamHeaderError) -> Self {
        match err {
            StreamHeaderError::NotFileHeader(tag) => Malformed::NotFileHeader(tag).into(),
        }
    }
}

impl From<RecordError> for Error {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::RepeatedFileHeader => Malformed::RepeatedFileHeader.into(),
            RecordError::ShortRecord {
                tag,
                declared,
                required,
            } => Malformed::ShortRecord {
                tag,
                declared,
                required,
            }
            .into(),
        }
    }
}

impl From<SeriesError> for Error {
    fn from(err: SeriesError) -> Self {
        match err {
            SeriesError::Regression {
                series,
                timestamp,
                baseline,
            } => Malformed::TimestampRegression {
                series,
                timestamp,
                baseline,
            }
            .into(),
            SeriesError::Limit {
                series,
                index,
                limit,
            } => Self::ResourceLimitExceeded {
                series,
                index,
                limit,
            },
        }
    }
}

/// Decode a recording from a slice, with default [`Options`].
///
/// This method is also re-exported as `ttbin::avec::decode_slice`.
pub fn decode(r: &[u8]) -> Result<ActivityFile, Error> {
    decode_with(r, &Options::default())
}

/// Decode a recording from a slice.
///
/// The slice must end exactly at the end of a record. Nothing is returned
/// unless the whole slice decodes.
pub fn decode_with(r: &[u8], options: &Options) -> Result<ActivityFile, Error> {
    let i = &mut 0; // Counter of bytes read, used to read bytes from the tip.

    if r.is_empty() {
        Err(Malformed::MissingFileHeader)?;
    }

    let file_header = Decoder::advance(take(r, i)?)?;
    let (info, successor) = file_header.advance(take(r, i)?);

    // Declared length of each record kind, used to find record boundaries.
    let mut length_table = LengthTable::new();

    let mut record_header = match successor {
        Left(mut state) => loop {
            let ((tag, length), successor) = state.advance(take(r, i)?);
            length_table.insert(tag, length);

            state = match successor {
                Left(state) => state,
                Right(state) => break state,
            };
        },
        Right(state) => state,
    };

    let mut assembler = Assembler::new(info, options);

    while *i < r.len() {
        let offset = *i;
        let (tag, state) = record_header.advance(take(r, i)?)?;

        let length = length_table
            .get(tag)
            .ok_or(Malformed::UnknownTag { tag, offset })?;
        let size = usize::from(length)
            .checked_sub(1)
            .ok_or(Malformed::ZeroLength { tag, offset })?;

        let (record, successor) = state.advance(take_slice(r, i, size)?)?;

        match record {
            Some(record) => assembler.add(record)?,
            None => debug!("Skipping unknown record {tag:#04x} at offset {offset}."),
        }

        record_header = successor;
    }

    Ok(assembler.finish())
}

/// Take an exact number of bytes from an offset in a slice, advancing the offset.
fn take<const N: usize>(r: &[u8], i: &mut usize) -> Result<[u8; N], Error> {
    let bytes = take_slice(r, i, N)?;
    <[u8; N]>::try_from(bytes).map_err(|_| truncated(r, *i - N, N))
}

/// Take a run of bytes from an offset in a slice, advancing the offset.
fn take_slice<'a>(r: &'a [u8], i: &mut usize, n: usize) -> Result<&'a [u8], Error> {
    let s = *i;
    let bytes = r.get(s..s + n).ok_or_else(|| truncated(r, s, n))?;
    *i += n;

    Ok(bytes)
}

fn truncated(r: &[u8], offset: usize, needed: usize) -> Error {
    Error::TruncatedRecord {
        offset,
        needed,
        available: r.len().saturating_sub(offset),
    }
}
