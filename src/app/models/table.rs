//! Raw tabular data as read from a data block, before normalization

use crate::app::models::Channel;
use std::collections::BTreeMap;

/// Numeric matrix of one data block
///
/// Rows may have different lengths; a cell that could not be read as a
/// number is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub rows: Vec<Vec<Option<f64>>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Option<f64>>>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Zero-based column index to canonical channel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    columns: BTreeMap<usize, Channel>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map columns by position, as in a fixed-layout payload
    pub fn positional(channels: &[Channel]) -> Self {
        Self {
            columns: channels.iter().copied().enumerate().collect(),
        }
    }

    /// Insert a mapping, refusing duplicate indices and duplicate channels
    ///
    /// Returns the channel already claiming the index or the index already
    /// carrying the channel when the insert is refused.
    pub fn insert(&mut self, index: usize, channel: Channel) -> Result<(), ColumnConflict> {
        if let Some(existing) = self.columns.get(&index) {
            return Err(ColumnConflict::DuplicateIndex {
                index,
                existing: *existing,
            });
        }
        if let Some(existing) = self.index_of(channel) {
            return Err(ColumnConflict::DuplicateChannel { channel, existing });
        }
        self.columns.insert(index, channel);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<Channel> {
        self.columns.get(&index).copied()
    }

    pub fn index_of(&self, channel: Channel) -> Option<usize> {
        self.columns
            .iter()
            .find(|(_, c)| **c == channel)
            .map(|(index, _)| *index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Channel)> + '_ {
        self.columns.iter().map(|(index, channel)| (*index, *channel))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Why a column mapping was refused
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnConflict {
    DuplicateIndex { index: usize, existing: Channel },
    DuplicateChannel { channel: Channel, existing: usize },
}

/// Zero-based column index to the sentinel treated as missing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoidMap {
    values: BTreeMap<usize, f64>,
}

impl VoidMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The same sentinel for the first `width` columns
    pub fn uniform(width: usize, value: f64) -> Self {
        Self {
            values: (0..width).map(|index| (index, value)).collect(),
        }
    }

    pub fn insert(&mut self, index: usize, value: f64) {
        self.values.insert(index, value);
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(&index).copied()
    }

    /// Whether `value` equals the sentinel of its column
    pub fn is_void(&self, index: usize, value: f64) -> bool {
        self.get(index)
            .is_some_and(|void| (value - void).abs() <= 1e-9 * void.abs().max(1.0))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_map_refuses_duplicates() {
        let mut map = ColumnMap::new();
        assert!(map.insert(0, Channel::PenetrationLength).is_ok());
        assert!(map.insert(1, Channel::ConeResistance).is_ok());

        assert_eq!(
            map.insert(1, Channel::LocalFriction),
            Err(ColumnConflict::DuplicateIndex {
                index: 1,
                existing: Channel::ConeResistance
            })
        );
        assert_eq!(
            map.insert(2, Channel::ConeResistance),
            Err(ColumnConflict::DuplicateChannel {
                channel: Channel::ConeResistance,
                existing: 1
            })
        );
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(1), Some(Channel::ConeResistance));
    }

    #[test]
    fn test_positional_map() {
        let map = ColumnMap::positional(&[Channel::PenetrationLength, Channel::Depth]);
        assert_eq!(map.get(0), Some(Channel::PenetrationLength));
        assert_eq!(map.index_of(Channel::Depth), Some(1));
        assert_eq!(map.index_of(Channel::ConeResistance), None);
    }

    #[test]
    fn test_void_matching() {
        let voids = VoidMap::uniform(2, -999_999.0);
        assert!(voids.is_void(0, -999_999.0));
        assert!(voids.is_void(1, -999_999.000_000_1));
        assert!(!voids.is_void(1, -999_998.0));
        assert!(!voids.is_void(2, -999_999.0));
    }

    #[test]
    fn test_raw_table_len() {
        let table = RawTable::new(vec![vec![Some(1.0), None], vec![Some(2.0)]]);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert!(RawTable::default().is_empty());
    }
}
