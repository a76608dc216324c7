//! Assembly of decoded records into an activity.

use log::{debug, trace};

use crate::{
    model::{ActivityFile, PositionRecord, SwimRecord, TreadmillRecord},
    sans::{
        header::FileInfo,
        record::{HeartRateSample, Record, Summary},
    },
};

use super::{
    Options,
    series::{MergeTarget, Series, SeriesError, TimeSeries},
};

/// Timestamp stored by the watch for positions taken without a GPS fix.
pub(crate) const LOST_SIGNAL: u32 = u32::MAX;

/// State built up over one decode.
pub(crate) struct Assembler<'a> {
    options: &'a Options,
    file: ActivityFile,
    positions: TimeSeries<PositionRecord>,
    treadmill: TimeSeries<TreadmillRecord>,
    swims: TimeSeries<SwimRecord>,
    heart_rate_baseline: Option<u32>,
    merge_target: MergeTarget,
}

impl<'a> Assembler<'a> {
    pub fn new(info: FileInfo, options: &'a Options) -> Self {
        let FileInfo {
            file_version,
            firmware_version,
            product_id,
            timestamp,
        } = info;

        Self {
            options,
            file: ActivityFile {
                file_version,
                firmware_version,
                product_id,
                timestamp,
                ..Default::default()
            },
            positions: TimeSeries::new(Series::Position),
            treadmill: TimeSeries::new(Series::Treadmill),
            swims: TimeSeries::new(Series::Swim),
            heart_rate_baseline: None,
            merge_target: MergeTarget::None,
        }
    }

    pub fn add(&mut self, record: Record) -> Result<(), SeriesError> {
        trace!("{record:?}");

        let limit = self.options.max_samples;

        match record {
            Record::Summary(Summary {
                activity,
                distance,
                duration,
                calories,
            }) => {
                self.file.activity = activity;
                self.file.total_distance = distance;
                self.file.duration = duration;
                self.file.total_calories = calories;
            }
            Record::Status(status) => self.file.status_records.push(status),
            Record::Position(position) => {
                if position.timestamp == LOST_SIGNAL {
                    debug!("Dropping position without a GPS fix.");
                    return Ok(());
                }

                let slot = self.positions.slot_at(position.timestamp, limit)?;
                *slot = PositionRecord {
                    heart_rate: slot.heart_rate,
                    ..position
                };
                self.merge_target.latch(MergeTarget::Position);
            }
            Record::HeartRate(sample) => self.merge_heart_rate(sample)?,
            Record::Lap(lap) => self.file.laps.push(lap),
            Record::Treadmill(treadmill) => {
                let slot = self.treadmill.slot_at(treadmill.timestamp, limit)?;
                *slot = TreadmillRecord {
                    heart_rate: slot.heart_rate,
                    ..treadmill
                };
                self.merge_target.latch(MergeTarget::Treadmill);
            }
            Record::Swim(swim) => *self.swims.slot_at(swim.timestamp, limit)? = swim,
        }

        Ok(())
    }

    fn merge_heart_rate(&mut self, sample: HeartRateSample) -> Result<(), SeriesError> {
        self.file.has_heart_rate = true;

        let baseline = *self.heart_rate_baseline.get_or_insert(sample.timestamp);
        let alignment = self.options.heart_rate_alignment;
        let limit = self.options.max_samples;

        match self.merge_target {
            MergeTarget::None => {
                debug!(
                    "Dropping heart rate at {}: no position or treadmill samples yet.",
                    sample.timestamp
                );
                Ok(())
            }
            MergeTarget::Position => {
                self.positions
                    .merge_heart_rate(sample, baseline, alignment, limit)
            }
            MergeTarget::Treadmill => {
                self.treadmill
                    .merge_heart_rate(sample, baseline, alignment, limit)
            }
        }
    }

    pub fn finish(self) -> ActivityFile {
        ActivityFile {
            positions: self.positions.into_records(),
            treadmill: self.treadmill.into_records(),
            swims: self.swims.into_records(),
            ..self.file
        }
    }
}
