//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::{io::Read, vec::Vec};

use thiserror::Error;

use crate::model::ActivityFile;

use super::{Options, slice};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The bytes read do not decode.
    #[error(transparent)]
    Decode(#[from] slice::Error),
}

/// Decode a recording from a reader, with default [`Options`].
///
/// This method is also re-exported as `ttbin::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read) -> Result<ActivityFile, Error> {
    decode_with(r, &Options::default())
}

/// Decode a recording from a reader.
///
/// Records are sized by a table in the file header, so the reader is drained
/// to its end before decoding begins.
///
/// _Requires Cargo feature `std`._
pub fn decode_with(r: &mut impl Read, options: &Options) -> Result<ActivityFile, Error> {
    let mut data = Vec::new();
    r.read_to_end(&mut data)?;

    Ok(slice::decode_with(&data, options)?)
}
