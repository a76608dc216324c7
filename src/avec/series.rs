//! Sparse time series placed by timestamp.

use alloc::vec::Vec;

use log::debug;

use crate::{
    model::{PositionRecord, TreadmillRecord},
    sans::record::HeartRateSample,
};

use super::HeartRateAlignment;

/// A time series whose records are placed by timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Position,
    Treadmill,
    Swim,
}

/// Series receiving heart rate readings.
///
/// Latched to whichever of the position and treadmill series receives a
/// sample first, and fixed from then on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MergeTarget {
    /// Neither series has a sample yet; readings are dropped.
    #[default]
    None,
    Position,
    Treadmill,
}

impl MergeTarget {
    /// Latch onto a series if no target has been chosen.
    pub(crate) fn latch(&mut self, target: MergeTarget) {
        if *self == MergeTarget::None {
            *self = target;
        }
    }
}

#[derive(Debug)]
pub(crate) enum SeriesError {
    /// A sample predates the first sample of its series.
    Regression {
        series: Series,
        timestamp: u32,
        baseline: u32,
    },
    /// Placing a sample would grow the series past the slot limit.
    Limit {
        series: Series,
        index: usize,
        limit: usize,
    },
}

/// Records of one series, indexed by their offset from the first timestamp
/// seen (the baseline).
#[derive(Debug)]
pub(crate) struct TimeSeries<T> {
    series: Series,
    baseline: Option<u32>,
    records: Vec<T>,
}

impl<T: Default> TimeSeries<T> {
    pub fn new(series: Series) -> Self {
        Self {
            series,
            baseline: None,
            records: Vec::new(),
        }
    }

    /// Slot for a sample's timestamp, growing the series with zero-valued
    /// records as needed. The first timestamp seen becomes the baseline.
    pub fn slot_at(&mut self, timestamp: u32, limit: usize) -> Result<&mut T, SeriesError> {
        let baseline = *self.baseline.get_or_insert(timestamp);

        let Some(delta) = timestamp.checked_sub(baseline) else {
            return Err(SeriesError::Regression {
                series: self.series,
                timestamp,
                baseline,
            });
        };

        self.slot(delta, limit)
    }

    fn slot(&mut self, delta: u32, limit: usize) -> Result<&mut T, SeriesError> {
        let index = usize::try_from(delta).unwrap_or(usize::MAX);

        if index >= self.records.len() {
            if index >= limit {
                Err(SeriesError::Limit {
                    series: self.series,
                    index,
                    limit,
                })?;
            }

            self.records.resize_with(index + 1, T::default);
        }

        Ok(&mut self.records[index])
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

/// A record able to carry a merged heart rate reading.
pub(crate) trait HeartRateSlot: Default {
    fn timestamp(&self) -> u32;
    fn set_timestamp(&mut self, timestamp: u32);
    fn set_heart_rate(&mut self, heart_rate: u8);
}

impl HeartRateSlot for PositionRecord {
    fn timestamp(&self) -> u32 {
        self.timestamp
    }
    fn set_timestamp(&mut self, timestamp: u32) {
        self.timestamp = timestamp;
    }
    fn set_heart_rate(&mut self, heart_rate: u8) {
        self.heart_rate = Some(heart_rate);
    }
}

impl HeartRateSlot for TreadmillRecord {
    fn timestamp(&self) -> u32 {
        self.timestamp
    }
    fn set_timestamp(&mut self, timestamp: u32) {
        self.timestamp = timestamp;
    }
    fn set_heart_rate(&mut self, heart_rate: u8) {
        self.heart_rate = Some(heart_rate);
    }
}

impl<T: HeartRateSlot> TimeSeries<T> {
    /// Merge a heart rate reading into the slot chosen by `alignment`.
    ///
    /// A vacant slot takes the timestamp implied by its position in the series;
    /// an occupied slot keeps its own. Readings that fall before the chosen
    /// clock's baseline are dropped.
    pub fn merge_heart_rate(
        &mut self,
        sample: HeartRateSample,
        heart_rate_baseline: u32,
        alignment: HeartRateAlignment,
        limit: usize,
    ) -> Result<(), SeriesError> {
        let Some(baseline) = self.baseline else {
            return Ok(());
        };

        let clock = match alignment {
            HeartRateAlignment::SeriesClock => baseline,
            HeartRateAlignment::HeartRateClock => heart_rate_baseline,
        };

        let Some(delta) = sample.timestamp.checked_sub(clock) else {
            debug!(
                "Dropping heart rate at {}, before {:?} baseline {clock}.",
                sample.timestamp, self.series
            );
            return Ok(());
        };

        let slot = self.slot(delta, limit)?;

        if slot.timestamp() == 0 {
            slot.set_timestamp(baseline.saturating_add(delta));
        }
        slot.set_heart_rate(sample.heart_rate);

        Ok(())
    }
}
