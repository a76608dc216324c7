#![no_std]

//! A decoder for the tagged binary activity recordings (`.ttbin`) written by
//! TomTom GPS watches.
//!
//! A recording is a single interleaved byte stream. It opens with a file
//! header declaring the on-disk length of every record kind, followed by
//! tagged records for status changes, GPS positions, heart rate, laps,
//! treadmill and pool swim samples. Decoding reassembles these into one
//! [`model::ActivityFile`], with time-series records placed by their offset
//! from the first sample of their series.
//!
//! Most users should begin with the functions in the [`avec`] module. If these
//! prove insufficient, the underlying finite-state machine is exposed in the
//! [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based decoder (default).
//! - `serde`: derive `Serialize` and `Deserialize` for the decoded model and
//!   decoder options.

extern crate alloc;

pub mod avec;
pub mod model;
pub mod sans;
