//! States processing tagged records.

use thiserror::Error;
use zerocopy::{
    FromBytes, Immutable, KnownLayout, Unaligned,
    byteorder::little_endian::{F32, I32, U16, U32},
};

use crate::model::{Activity, LapRecord, PositionRecord, StatusRecord, SwimRecord, TreadmillRecord};

use super::Tag;

/// An error advancing over a record.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Found a second file header.
    #[error("Found a file header after the start of the stream.")]
    RepeatedFileHeader,
    /// The declared length is too short for the record's layout.
    #[error("Record {tag:#04x} declares {declared} bytes, but its layout needs {required}.")]
    ShortRecord {
        tag: u8,
        declared: usize,
        required: usize,
    },
}

/// State token to decode a record tag.
#[derive(Debug)]
pub struct RecordHeader(pub(super) ());

impl RecordHeader {
    /// Transition to another state by decoding a record tag.
    ///
    /// Returns the tag, and a successor state token. The caller sizes the
    /// record body from the length table before advancing the successor.
    pub fn advance(self, r: [u8; 1]) -> Result<(u8, RecordBody), RecordError> {
        let tag = r[0];

        if Tag::from_byte(tag) == Some(Tag::FileHeader) {
            Err(RecordError::RepeatedFileHeader)?;
        }

        Ok((tag, RecordBody { tag }))
    }
}

/// State token to decode a record body.
#[derive(Debug)]
pub struct RecordBody {
    tag: u8,
}

/// Activity totals, written once the activity ends.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Summary {
    pub activity: Activity,
    /// Metres.
    pub distance: f32,
    /// Seconds, as stored.
    pub duration: u32,
    pub calories: u16,
}

/// A heart rate reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartRateSample {
    /// Beats per minute.
    pub heart_rate: u8,
    /// Device-local time, in seconds.
    pub timestamp: u32,
}

/// A decoded record.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Summary(Summary),
    Status(StatusRecord),
    /// A GPS sample. The timestamp is as stored, including the lost-signal
    /// marker.
    Position(PositionRecord),
    HeartRate(HeartRateSample),
    Lap(LapRecord),
    Treadmill(TreadmillRecord),
    Swim(SwimRecord),
}

#[repr(C)]
#[derive(FromBytes, KnownLayout, Immutable, Unaligned)]
struct SummaryLayout {
    activity: u8,
    distance: F32,
    duration: U32,
    calories: U16,
}

#[repr(C)]
#[derive(FromBytes, KnownLayout, Immutable, Unaligned)]
struct StatusLayout {
    status: u8,
    activity: u8,
    timestamp: U32,
}

#[repr(C)]
#[derive(FromBytes, KnownLayout, Immutable, Unaligned)]
struct PositionLayout {
    latitude: I32,
    longitude: I32,
    heading: U16,
    speed: U16,
    timestamp: U32,
    calories: U16,
    inc_distance: F32,
    cum_distance: F32,
    cycles: u8,
}

#[repr(C)]
#[derive(FromBytes, KnownLayout, Immutable, Unaligned)]
struct HeartRateLayout {
    heart_rate: u8,
    _reserved: u8,
    timestamp: U32,
}

#[repr(C)]
#[derive(FromBytes, KnownLayout, Immutable, Unaligned)]
struct LapLayout {
    total_time: U32,
    total_distance: F32,
    total_calories: U16,
}

#[repr(C)]
#[derive(FromBytes, KnownLayout, Immutable, Unaligned)]
struct TreadmillLayout {
    timestamp: U32,
    distance: F32,
    calories: U16,
    steps: U32,
    _reserved: U16,
}

#[repr(C)]
#[derive(FromBytes, KnownLayout, Immutable, Unaligned)]
struct SwimLayout {
    timestamp: U32,
    total_distance: F32,
    _reserved: [u8; 2],
    strokes: U32,
    completed_laps: U32,
    total_calories: U16,
}

impl RecordBody {
    /// Transition to another state by decoding a record body.
    ///
    /// `r` must hold the whole body, as sized by the length table. Known
    /// layouts are read from its start and any trailing bytes are ignored.
    ///
    /// Returns the record if the tag is known, and a successor state token.
    pub fn advance(self, r: &[u8]) -> Result<(Option<Record>, RecordHeader), RecordError> {
        let tag = self.tag;

        let record = match Tag::from_byte(tag) {
            Some(Tag::Summary) => {
                let SummaryLayout {
                    activity,
                    distance,
                    duration,
                    calories,
                } = layout(tag, r)?;

                Some(Record::Summary(Summary {
                    activity: activity.into(),
                    distance: distance.get(),
                    duration: duration.get(),
                    calories: calories.get(),
                }))
            }
            Some(Tag::Status) => {
                let StatusLayout {
                    status,
                    activity,
                    timestamp,
                } = layout(tag, r)?;

                Some(Record::Status(StatusRecord {
                    status: status.into(),
                    activity: activity.into(),
                    timestamp: timestamp.get(),
                }))
            }
            Some(Tag::Position) => {
                let p: PositionLayout = layout(tag, r)?;

                Some(Record::Position(PositionRecord {
                    latitude: f64::from(p.latitude.get()) * 1e-7,
                    longitude: f64::from(p.longitude.get()) * 1e-7,
                    elevation: 0.0,
                    heading: f32::from(p.heading.get()) / 100.0,
                    speed: f32::from(p.speed.get()) / 100.0,
                    timestamp: p.timestamp.get(),
                    calories: p.calories.get(),
                    inc_distance: p.inc_distance.get(),
                    cum_distance: p.cum_distance.get(),
                    cycles: p.cycles,
                    heart_rate: None,
                }))
            }
            Some(Tag::HeartRate) => {
                let HeartRateLayout {
                    heart_rate,
                    timestamp,
                    ..
                } = layout(tag, r)?;

                Some(Record::HeartRate(HeartRateSample {
                    heart_rate,
                    timestamp: timestamp.get(),
                }))
            }
            Some(Tag::Lap) => {
                let LapLayout {
                    total_time,
                    total_distance,
                    total_calories,
                } = layout(tag, r)?;

                Some(Record::Lap(LapRecord {
                    total_time: total_time.get(),
                    total_distance: total_distance.get(),
                    total_calories: total_calories.get(),
                }))
            }
            Some(Tag::Treadmill) => {
                let t: TreadmillLayout = layout(tag, r)?;

                Some(Record::Treadmill(TreadmillRecord {
                    timestamp: t.timestamp.get(),
                    distance: t.distance.get(),
                    calories: t.calories.get(),
                    steps: t.steps.get(),
                    heart_rate: None,
                }))
            }
            Some(Tag::Swim) => {
                let s: SwimLayout = layout(tag, r)?;

                Some(Record::Swim(SwimRecord {
                    timestamp: s.timestamp.get(),
                    total_distance: s.total_distance.get(),
                    strokes: s.strokes.get(),
                    completed_laps: s.completed_laps.get(),
                    total_calories: s.total_calories.get(),
                }))
            }
            Some(Tag::FileHeader) | None => None,
        };

        Ok((record, RecordHeader(())))
    }
}

/// Read a fixed layout from the start of a record body.
fn layout<T: FromBytes>(tag: u8, r: &[u8]) -> Result<T, RecordError> {
    match T::read_from_prefix(r) {
        Ok((value, _)) => Ok(value),
        Err(_) => Err(RecordError::ShortRecord {
            tag,
            declared: r.len() + 1,
            required: size_of::<T>() + 1,
        }),
    }
}
