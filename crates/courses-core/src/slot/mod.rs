mod validator;

pub use validator::DeliverySlotValidator;

use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref SLOT_HEADERS: Regex = Regex::new(r"^\s*h(\d+)\s+j(\d+)\s*$").unwrap();
}

/// Class the site puts on bookable slot cells
const AVAILABLE_CLASS: &str = "libre";

/// A cell of the delivery slot grid.
///
/// The page identifies cells through their `headers` attribute, e.g.
/// `"h6 j3"` for the sixth hour column three days from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotCell {
    pub day_offset: u32,
    pub hour_column: u32,
}

impl SlotCell {
    pub fn new(hour_column: u32, day_offset: u32) -> Self {
        Self {
            day_offset,
            hour_column,
        }
    }

    /// Value of the cell's `headers` attribute
    pub fn headers(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SlotCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{} j{}", self.hour_column, self.day_offset)
    }
}

impl FromStr for SlotCell {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let caps = SLOT_HEADERS
            .captures(s)
            .ok_or_else(|| Error::InvalidSlotCell(s.to_string()))?;

        let parse = |i: usize| {
            caps[i]
                .parse::<u32>()
                .map_err(|_| Error::InvalidSlotCell(s.to_string()))
        };

        Ok(SlotCell::new(parse(1)?, parse(2)?))
    }
}

/// Availability of a slot cell, as rendered by the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    /// Any other class, e.g. `nondispo`
    Unavailable(String),
    /// The page did not render this cell
    Missing,
}

impl SlotStatus {
    /// Interpret a cell's `class` attribute
    pub fn from_class(class: &str) -> Self {
        if class.split_whitespace().any(|c| c == AVAILABLE_CLASS) {
            SlotStatus::Available
        } else {
            SlotStatus::Unavailable(class.trim().to_string())
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, SlotStatus::Available)
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotStatus::Available => f.write_str(AVAILABLE_CLASS),
            SlotStatus::Unavailable(class) if class.is_empty() => f.write_str("unavailable"),
            SlotStatus::Unavailable(class) => f.write_str(class),
            SlotStatus::Missing => f.write_str("not on the page"),
        }
    }
}

/// Snapshot of the delivery slot grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliverySlotTable {
    cells: BTreeMap<SlotCell, SlotStatus>,
}

impl DeliverySlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cell: SlotCell, status: SlotStatus) {
        self.cells.insert(cell, status);
    }

    /// Status of a cell; cells the page did not render are `Missing`
    pub fn status(&self, cell: SlotCell) -> SlotStatus {
        self.cells.get(&cell).cloned().unwrap_or(SlotStatus::Missing)
    }

    pub fn is_available(&self, cell: SlotCell) -> bool {
        self.cells.get(&cell).is_some_and(SlotStatus::is_available)
    }

    /// Cells ordered by day, then hour column
    pub fn iter(&self) -> impl Iterator<Item = (SlotCell, &SlotStatus)> {
        self.cells.iter().map(|(cell, status)| (*cell, status))
    }

    pub fn available(&self) -> impl Iterator<Item = SlotCell> + '_ {
        self.iter()
            .filter(|(_, status)| status.is_available())
            .map(|(cell, _)| cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(SlotCell, SlotStatus)> for DeliverySlotTable {
    fn from_iter<T: IntoIterator<Item = (SlotCell, SlotStatus)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_cell_parses_headers() {
        let cell: SlotCell = "h6 j3".parse().unwrap();
        assert_eq!(cell, SlotCell::new(6, 3));
        assert_eq!(cell.headers(), "h6 j3");

        let padded: SlotCell = "  h12   j0 ".parse().unwrap();
        assert_eq!(padded, SlotCell::new(12, 0));
    }

    #[test]
    fn test_slot_cell_rejects_garbage() {
        assert!("j3 h6".parse::<SlotCell>().is_err());
        assert!("h6".parse::<SlotCell>().is_err());
        assert!("hx jy".parse::<SlotCell>().is_err());
    }

    #[test]
    fn test_status_from_class() {
        assert_eq!(SlotStatus::from_class("libre"), SlotStatus::Available);
        assert_eq!(SlotStatus::from_class("creneau libre"), SlotStatus::Available);
        assert_eq!(
            SlotStatus::from_class("nondispo"),
            SlotStatus::Unavailable("nondispo".to_string())
        );
        assert!(!SlotStatus::from_class("librement").is_available());
    }

    #[test]
    fn test_table_missing_cells_are_unavailable() {
        let mut table = DeliverySlotTable::new();
        table.insert(SlotCell::new(3, 2), SlotStatus::Available);

        assert!(table.is_available(SlotCell::new(3, 2)));
        assert!(!table.is_available(SlotCell::new(4, 2)));
        assert_eq!(table.status(SlotCell::new(4, 2)), SlotStatus::Missing);
    }

    #[test]
    fn test_table_iterates_by_day_then_hour() {
        let table: DeliverySlotTable = vec![
            (SlotCell::new(1, 3), SlotStatus::Available),
            (SlotCell::new(8, 2), SlotStatus::Unavailable("nondispo".into())),
            (SlotCell::new(2, 2), SlotStatus::Available),
        ]
        .into_iter()
        .collect();

        let cells: Vec<String> = table.iter().map(|(c, _)| c.to_string()).collect();
        assert_eq!(cells, vec!["h2 j2", "h8 j2", "h1 j3"]);
        assert_eq!(table.available().count(), 2);
    }
}
