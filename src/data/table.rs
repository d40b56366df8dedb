use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Key naming the source of a row. Every other key in a row is a period.
pub const SOURCE_KEY: &str = "Source";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Revenue,
    Cost,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Revenue, DatasetKind::Cost];

    pub fn key(&self) -> &'static str {
        match self {
            DatasetKind::Revenue => "revenue",
            DatasetKind::Cost => "cost",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DatasetKind::Revenue => "Revenue",
            DatasetKind::Cost => "Cost",
        }
    }

    /// Guess the dataset kind from an uploaded file name, e.g. `Q1_Revenue.xlsx`.
    /// Revenue wins when both words appear.
    pub fn detect(file_name: &str) -> Option<Self> {
        let lower = file_name.to_lowercase();
        Self::ALL.into_iter().find(|kind| lower.contains(kind.key()))
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single spreadsheet cell as delivered by the file readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

/// One source's values across periods, in column order.
///
/// `cells` never contains the `Source` key itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub source: String,
    pub cells: Vec<(String, Cell)>,
}

impl Row {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            cells: Vec::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a cell, overwriting in place if the key already exists.
    /// Setting `Source` renames the row instead.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Cell>) {
        let key = key.into();
        let value = value.into();
        if key == SOURCE_KEY {
            self.source = value.to_string();
            return;
        }
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.cells.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len() + 1))?;
        map.serialize_entry(SOURCE_KEY, &self.source)?;
        for (key, value) in &self.cells {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a row object with a `Source` key")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Row, A::Error> {
                let mut source = None;
                let mut row = Row::default();
                while let Some(key) = map.next_key::<String>()? {
                    let value: Cell = map.next_value()?;
                    if key == SOURCE_KEY {
                        source = Some(value.to_string());
                    } else {
                        row.set(key, value);
                    }
                }
                row.source = source.ok_or_else(|| de::Error::missing_field(SOURCE_KEY))?;
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// Ordered rows of one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub kind: DatasetKind,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(kind: DatasetKind, rows: Vec<Row>) -> Self {
        Self { kind, rows }
    }

    pub fn empty(kind: DatasetKind) -> Self {
        Self::new(kind, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Column labels offered for selection, taken from the first row's headers.
    /// Blank headers (spreadsheet filler columns) are skipped.
    pub fn period_keys(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| {
                row.iter()
                    .map(|(key, _)| key)
                    .filter(|key| !key.trim().is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total number of period cells across all rows.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).sum()
    }
}
