//! Dataset row types
//!
//! A [`Record`] is one row of the locality dataset. Numeric cells are held as
//! [`Amount`] so that whole numbers read from the sheet are written back as
//! integers (`4500`, not `4500.0`) in JSON, CSV and summary text.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Largest magnitude for which an f64 still represents every integer exactly
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Numeric dataset cell (price, demand)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Amount(pub f64);

impl Amount {
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether the value has no fractional part and fits an i64 exactly
    pub fn is_integral(self) -> bool {
        self.0.is_finite() && self.0.fract() == 0.0 && self.0.abs() < MAX_EXACT_INTEGER
    }

    /// Smallest and largest values of a sequence, `None` when empty
    pub fn bounds(values: &[Amount]) -> Option<(Amount, Amount)> {
        let first = *values.first()?;
        Some(values.iter().skip(1).fold((first, first), |(lo, hi), v| {
            (
                if *v < lo { *v } else { lo },
                if *v > hi { *v } else { hi },
            )
        }))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount(value as f64)
    }
}

impl FromStr for Amount {
    type Err = std::num::ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<f64>().map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integral() {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_integral() {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Amount)
    }
}

/// Value of a column that is not one of the four known columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Interpret a raw CSV cell: empty → null, then integer, float, text
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Float(f);
        }
        CellValue::Text(raw.to_string())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", Amount(*v)),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// One dataset row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Locality name; identity is case-insensitive
    pub area: String,
    pub year: i32,
    pub price: Amount,
    pub demand: Amount,
    /// Any further columns of the sheet, keyed by header name
    #[serde(flatten)]
    pub extra: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new(area: impl Into<String>, year: i32, price: impl Into<Amount>, demand: impl Into<Amount>) -> Self {
        Self {
            area: area.into(),
            year,
            price: price.into(),
            demand: demand.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Attach an extra column value
    pub fn with_extra(mut self, column: impl Into<String>, value: CellValue) -> Self {
        self.extra.insert(column.into(), value);
        self
    }

    /// Case-insensitive locality match
    pub fn is_in(&self, locality: &str) -> bool {
        self.area.to_lowercase() == locality.to_lowercase()
    }
}
