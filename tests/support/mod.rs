#![allow(dead_code)]

//! Builder for recordings used across the integration tests.

pub const FILE_HEADER: u8 = 0x20;
pub const STATUS: u8 = 0x21;
pub const POSITION: u8 = 0x22;
pub const HEART_RATE: u8 = 0x25;
pub const SUMMARY: u8 = 0x27;
pub const LAP: u8 = 0x2f;
pub const TREADMILL: u8 = 0x32;
pub const SWIM: u8 = 0x34;

/// Record lengths as declared by a typical watch. Positions carry one byte of
/// padding past their layout.
pub const LENGTHS: &[(u8, u16)] = &[
    (STATUS, 7),
    (POSITION, 29),
    (HEART_RATE, 7),
    (SUMMARY, 12),
    (LAP, 11),
    (TREADMILL, 17),
    (SWIM, 21),
];

pub const T: u32 = 1_400_000_000;

pub struct Stream {
    bytes: Vec<u8>,
    lengths: Vec<(u8, u16)>,
}

impl Stream {
    pub fn new(lengths: &[(u8, u16)]) -> Self {
        Self::with_info(3, [1, 7, 0, 2], 0x0e01, T - 60, lengths)
    }

    pub fn with_info(
        file_version: u8,
        firmware_version: [u8; 4],
        product_id: u16,
        timestamp: u32,
        lengths: &[(u8, u16)],
    ) -> Self {
        let mut bytes = vec![FILE_HEADER, file_version];
        bytes.extend_from_slice(&firmware_version);
        bytes.extend_from_slice(&product_id.to_le_bytes());
        bytes.extend_from_slice(&timestamp.to_le_bytes());
        bytes.extend_from_slice(&[0; 105]);
        bytes.push(lengths.len() as u8);
        for (tag, length) in lengths {
            bytes.push(*tag);
            bytes.extend_from_slice(&length.to_le_bytes());
        }

        Self {
            bytes,
            lengths: lengths.to_vec(),
        }
    }

    /// Append a record, padding its body to the declared length.
    pub fn record(mut self, tag: u8, body: &[u8]) -> Self {
        let length = self
            .lengths
            .iter()
            .rev()
            .find(|(t, _)| *t == tag)
            .map(|(_, l)| *l as usize)
            .unwrap_or(body.len() + 1);

        self.bytes.push(tag);
        self.bytes.extend_from_slice(body);
        self.bytes
            .resize(self.bytes.len() + (length - 1).saturating_sub(body.len()), 0);
        self
    }

    /// Append raw bytes, without consulting the declared lengths.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn summary(self, activity: u8, distance: f32, duration: u32, calories: u16) -> Self {
        let mut body = vec![activity];
        body.extend_from_slice(&distance.to_le_bytes());
        body.extend_from_slice(&duration.to_le_bytes());
        body.extend_from_slice(&calories.to_le_bytes());
        self.record(SUMMARY, &body)
    }

    pub fn status(self, status: u8, activity: u8, timestamp: u32) -> Self {
        let mut body = vec![status, activity];
        body.extend_from_slice(&timestamp.to_le_bytes());
        self.record(STATUS, &body)
    }

    pub fn position(self, latitude: i32, longitude: i32, timestamp: u32) -> Self {
        self.position_full(latitude, longitude, 9000, 325, timestamp, 12, 3.25, 104.5, 2)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn position_full(
        self,
        latitude: i32,
        longitude: i32,
        heading: u16,
        speed: u16,
        timestamp: u32,
        calories: u16,
        inc_distance: f32,
        cum_distance: f32,
        cycles: u8,
    ) -> Self {
        let mut body = Vec::new();
        body.extend_from_slice(&latitude.to_le_bytes());
        body.extend_from_slice(&longitude.to_le_bytes());
        body.extend_from_slice(&heading.to_le_bytes());
        body.extend_from_slice(&speed.to_le_bytes());
        body.extend_from_slice(&timestamp.to_le_bytes());
        body.extend_from_slice(&calories.to_le_bytes());
        body.extend_from_slice(&inc_distance.to_le_bytes());
        body.extend_from_slice(&cum_distance.to_le_bytes());
        body.push(cycles);
        self.record(POSITION, &body)
    }

    pub fn heart_rate(self, heart_rate: u8, timestamp: u32) -> Self {
        let mut body = vec![heart_rate, 0];
        body.extend_from_slice(&timestamp.to_le_bytes());
        self.record(HEART_RATE, &body)
    }

    pub fn lap(self, total_time: u32, total_distance: f32, total_calories: u16) -> Self {
        let mut body = Vec::new();
        body.extend_from_slice(&total_time.to_le_bytes());
        body.extend_from_slice(&total_distance.to_le_bytes());
        body.extend_from_slice(&total_calories.to_le_bytes());
        self.record(LAP, &body)
    }

    pub fn treadmill(self, timestamp: u32, distance: f32, calories: u16, steps: u32) -> Self {
        let mut body = Vec::new();
        body.extend_from_slice(&timestamp.to_le_bytes());
        body.extend_from_slice(&distance.to_le_bytes());
        body.extend_from_slice(&calories.to_le_bytes());
        body.extend_from_slice(&steps.to_le_bytes());
        body.extend_from_slice(&[0; 2]);
        self.record(TREADMILL, &body)
    }

    pub fn swim(
        self,
        timestamp: u32,
        total_distance: f32,
        strokes: u32,
        completed_laps: u32,
        total_calories: u16,
    ) -> Self {
        let mut body = Vec::new();
        body.extend_from_slice(&timestamp.to_le_bytes());
        body.extend_from_slice(&total_distance.to_le_bytes());
        body.extend_from_slice(&[0xff, 0]);
        body.extend_from_slice(&strokes.to_le_bytes());
        body.extend_from_slice(&completed_laps.to_le_bytes());
        body.extend_from_slice(&total_calories.to_le_bytes());
        self.record(SWIM, &body)
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
