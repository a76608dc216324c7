//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module decode a whole recording, from a data slice or
//! a reader, into an [`ActivityFile`](crate::model::ActivityFile).
//!
//! ```
//! let data = std::fs::read("activity.ttbin")?;
//! let activity = ttbin::avec::decode_slice(&data)?;
//!
//! for position in activity.positions() {
//!     println!("{} {}", position.latitude, position.longitude);
//! }
//! ```

mod assemble;
#[cfg(feature = "std")]
pub mod reader;
mod series;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use series::{MergeTarget, Series};
pub use slice::decode as decode_slice;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Clock used to place heart rate readings into another time series.
///
/// Heart rate readings are never stored on their own. Each is merged into the
/// position or treadmill series, whichever received a sample first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeartRateAlignment {
    /// Place a reading at its timestamp's offset from the first sample of the
    /// target series, next to the sample taken at the same second.
    #[default]
    SeriesClock,
    /// Place a reading at its timestamp's offset from the first heart rate
    /// reading, as the watch's own software does.
    HeartRateClock,
}

/// Options controlling a decode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Options {
    /// Largest number of slots a time series may grow to.
    pub max_samples: usize,
    pub heart_rate_alignment: HeartRateAlignment,
}

impl Options {
    /// Seven days of one-second samples.
    pub const DEFAULT_MAX_SAMPLES: usize = 7 * 24 * 60 * 60;

    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    pub fn with_heart_rate_alignment(mut self, alignment: HeartRateAlignment) -> Self {
        self.heart_rate_alignment = alignment;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_samples: Self::DEFAULT_MAX_SAMPLES,
            heart_rate_alignment: HeartRateAlignment::default(),
        }
    }
}
