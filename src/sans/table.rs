//! Table of declared record lengths.

use core::fmt;

use alloc::vec::Vec;

/// Declared on-disk length of each record kind, keyed by tag.
///
/// Lengths count the whole record, including its one-byte tag. The table is
/// filled from the entries following the file header, and holds at most one
/// length per tag: a later entry for the same tag replaces the earlier one.
#[derive(Clone, PartialEq, Eq)]
pub struct LengthTable([Option<u16>; 256]);

impl LengthTable {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self([None; 256])
    }

    /// Record the declared length for a tag.
    pub fn insert(&mut self, tag: u8, length: u16) {
        self.0[tag as usize] = Some(length);
    }

    /// Declared length for a tag, if the header listed one.
    pub fn get(&self, tag: u8) -> Option<u16> {
        self.0[tag as usize]
    }

    /// Number of tags with a declared length.
    pub fn len(&self) -> usize {
        self.0.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// Iterate over `(tag, length)` entries in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u16)> + '_ {
        (0..=u8::MAX).filter_map(|tag| self.get(tag).map(|length| (tag, length)))
    }

    /// Serialize the entries as they are stored after the file header.
    ///
    /// Each entry is packed as a tag byte followed by a little-endian `u16`
    /// length. The entry count itself belongs to the file header and is not
    /// written.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len() * 3);
        for (tag, length) in self.iter() {
            out.push(tag);
            out.extend_from_slice(&length.to_le_bytes());
        }
        out
    }
}

impl Default for LengthTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LengthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(u8, u16)> for LengthTable {
    fn from_iter<I: IntoIterator<Item = (u8, u16)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (tag, length) in iter {
            table.insert(tag, length);
        }
        table
    }
}
