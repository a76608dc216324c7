//! Decoded activity model.
//!
//! Time-series collections ([`ActivityFile::positions`],
//! [`ActivityFile::treadmill`], [`ActivityFile::swims`]) are sparse: a record
//! sits at its timestamp's offset from the first sample of the series, and
//! seconds without a sample hold a zero-valued record.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of activity being recorded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Activity {
    Running,
    Cycling,
    Swimming,
    Treadmill,
    Freestyle,
    #[default]
    Unknown,
}

impl From<u8> for Activity {
    fn from(b: u8) -> Self {
        match b {
            0 => Self::Running,
            1 => Self::Cycling,
            2 => Self::Swimming,
            7 => Self::Treadmill,
            8 => Self::Freestyle,
            _ => Self::Unknown,
        }
    }
}

/// State of the activity timer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    #[default]
    Ready,
    Active,
    Paused,
    Stopped,
    Unknown,
}

impl From<u8> for Status {
    fn from(b: u8) -> Self {
        match b {
            0 => Self::Ready,
            1 => Self::Active,
            2 => Self::Paused,
            3 => Self::Stopped,
            _ => Self::Unknown,
        }
    }
}

/// A change of timer state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatusRecord {
    pub status: Status,
    pub activity: Activity,
    /// Device-local time, in seconds.
    pub timestamp: u32,
}

/// A GPS sample.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionRecord {
    /// Degrees.
    pub latitude: f64,
    /// Degrees.
    pub longitude: f64,
    /// Metres. Not recorded by the watch; see [`ActivityFile::apply_elevations`].
    pub elevation: f32,
    /// Degrees, where north is 0 and east is 90.
    pub heading: f32,
    /// Metres per second.
    pub speed: f32,
    /// GPS time, in seconds.
    pub timestamp: u32,
    pub calories: u16,
    /// Metres since the previous sample.
    pub inc_distance: f32,
    /// Metres since the start of the activity.
    pub cum_distance: f32,
    /// Steps, pedal strokes or other cycles.
    pub cycles: u8,
    /// Beats per minute, if a heart rate reading was merged into this slot.
    pub heart_rate: Option<u8>,
}

/// A treadmill sample.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreadmillRecord {
    pub timestamp: u32,
    /// Metres.
    pub distance: f32,
    pub calories: u16,
    pub steps: u32,
    /// Beats per minute, if a heart rate reading was merged into this slot.
    pub heart_rate: Option<u8>,
}

/// A pool swim sample.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SwimRecord {
    pub timestamp: u32,
    /// Metres since the start of the activity.
    pub total_distance: f32,
    /// Strokes since the previous sample.
    pub strokes: u32,
    pub completed_laps: u32,
    pub total_calories: u16,
}

/// Totals at the end of a lap.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LapRecord {
    /// Seconds since the start of the activity.
    pub total_time: u32,
    /// Metres.
    pub total_distance: f32,
    pub total_calories: u16,
}

/// Elevations could not be applied to the position records.
#[derive(Debug, Error)]
#[error("Received {received} elevations for {expected} position records.")]
pub struct ElevationCountMismatch {
    pub expected: usize,
    pub received: usize,
}

/// A decoded activity recording.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActivityFile {
    pub(crate) file_version: u8,
    pub(crate) firmware_version: [u8; 4],
    pub(crate) product_id: u16,
    pub(crate) timestamp: u32,

    pub(crate) activity: Activity,
    pub(crate) total_distance: f32,
    pub(crate) duration: u32,
    pub(crate) total_calories: u16,

    pub(crate) has_heart_rate: bool,

    pub(crate) status_records: Vec<StatusRecord>,
    pub(crate) positions: Vec<PositionRecord>,
    pub(crate) treadmill: Vec<TreadmillRecord>,
    pub(crate) swims: Vec<SwimRecord>,
    pub(crate) laps: Vec<LapRecord>,
}

impl ActivityFile {
    pub fn file_version(&self) -> u8 {
        self.file_version
    }

    pub fn firmware_version(&self) -> [u8; 4] {
        self.firmware_version
    }

    pub fn product_id(&self) -> u16 {
        self.product_id
    }

    /// Device-local creation time, in seconds.
    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// Activity kind from the summary, or [`Activity::Unknown`] if the
    /// recording has none.
    pub fn activity(&self) -> Activity {
        self.activity
    }

    /// Metres.
    pub fn total_distance(&self) -> f32 {
        self.total_distance
    }

    /// Seconds, exactly as stored in the summary.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn total_calories(&self) -> u16 {
        self.total_calories
    }

    /// Whether any heart rate reading was recorded, merged or not.
    pub fn has_heart_rate(&self) -> bool {
        self.has_heart_rate
    }

    pub fn status_records(&self) -> &[StatusRecord] {
        &self.status_records
    }

    pub fn positions(&self) -> &[PositionRecord] {
        &self.positions
    }

    pub fn treadmill(&self) -> &[TreadmillRecord] {
        &self.treadmill
    }

    pub fn swims(&self) -> &[SwimRecord] {
        &self.swims
    }

    pub fn laps(&self) -> &[LapRecord] {
        &self.laps
    }

    /// Iterate over `(latitude, longitude)` of every position slot, in order.
    ///
    /// This is the order expected by [`ActivityFile::apply_elevations`].
    pub fn coordinates(&self) -> impl ExactSizeIterator<Item = (f64, f64)> + '_ {
        self.positions.iter().map(|p| (p.latitude, p.longitude))
    }

    /// Store one elevation per position slot, in the order of
    /// [`ActivityFile::coordinates`].
    ///
    /// Nothing is written unless the counts match.
    pub fn apply_elevations(&mut self, elevations: &[f32]) -> Result<(), ElevationCountMismatch> {
        if elevations.len() != self.positions.len() {
            Err(ElevationCountMismatch {
                expected: self.positions.len(),
                received: elevations.len(),
            })?;
        }

        for (position, elevation) in self.positions.iter_mut().zip(elevations) {
            position.elevation = *elevation;
        }

        Ok(())
    }
}
