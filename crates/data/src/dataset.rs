//! In-memory locality table

use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use realty_chat_core::{Amount, CellValue, LocalitySlice, Record};

use crate::DataError;

/// Column of the sheet, in header order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    Area,
    Year,
    Price,
    Demand,
    /// Any other column, by header name
    Extra(String),
}

impl Column {
    fn from_header(header: &str) -> Self {
        let name = header.trim();
        match name.to_lowercase().as_str() {
            "area" => Column::Area,
            "year" => Column::Year,
            "price" => Column::Price,
            "demand" => Column::Demand,
            _ => Column::Extra(name.to_string()),
        }
    }

    /// Header text written on export
    pub fn name(&self) -> &str {
        match self {
            Column::Area => "area",
            Column::Year => "year",
            Column::Price => "price",
            Column::Demand => "demand",
            Column::Extra(name) => name,
        }
    }
}

/// Read-only locality dataset
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    records: Vec<Record>,
}

impl Dataset {
    /// Load a headered sheet: xlsx/xlsm/xlsb/xls/ods by extension, CSV otherwise
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let dataset = if is_workbook(path) {
            Self::from_workbook(path)?
        } else {
            Self::from_reader(std::fs::File::open(path)?)?
        };

        if dataset.is_empty() {
            return Err(DataError::Empty(path.display().to_string()));
        }

        tracing::info!(
            path = %path.display(),
            rows = dataset.len(),
            localities = dataset.areas().len(),
            "Loaded locality dataset"
        );

        Ok(dataset)
    }

    /// Parse CSV from any reader; an empty body yields an empty dataset
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        let rows = csv_reader
            .records()
            .map(|row| -> Result<Vec<String>, DataError> {
                Ok(row?.iter().map(str::to_string).collect())
            });

        Self::from_rows(&headers, rows)
    }

    /// Read the first worksheet of a workbook; row 1 holds the headers
    pub fn from_workbook(path: &Path) -> Result<Self, DataError> {
        let mut workbook = open_workbook_auto(path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| DataError::Workbook(format!("{} has no sheets", path.display())))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut sheet_rows = range.rows();
        let Some(header_row) = sheet_rows.next() else {
            return Ok(Self::from_records(Vec::new()));
        };
        let headers: Vec<String> = header_row.iter().map(cell_text).collect();

        // Trailing blank rows come back as all-empty cells
        let rows = sheet_rows
            .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
            .map(|row| -> Result<Vec<String>, DataError> {
                Ok(row.iter().map(cell_text).collect())
            });

        Self::from_rows(&headers, rows)
    }

    fn from_rows<I>(headers: &[String], rows: I) -> Result<Self, DataError>
    where
        I: Iterator<Item = Result<Vec<String>, DataError>>,
    {
        let columns: Vec<Column> = headers.iter().map(|h| Column::from_header(h)).collect();

        let index_of = |wanted: Column, name: &'static str| {
            columns
                .iter()
                .position(|c| *c == wanted)
                .ok_or(DataError::MissingColumn(name))
        };
        let area_idx = index_of(Column::Area, "area")?;
        let year_idx = index_of(Column::Year, "year")?;
        let price_idx = index_of(Column::Price, "price")?;
        let demand_idx = index_of(Column::Demand, "demand")?;

        let mut records = Vec::new();
        for (i, row) in rows.enumerate() {
            let row = row?;
            // 1-based, counting the header line
            let line = i + 2;
            let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");

            let mut record = Record::new(
                cell(area_idx).trim(),
                parse_year(cell(year_idx), line)?,
                parse_amount(cell(price_idx), line, "price")?,
                parse_amount(cell(demand_idx), line, "demand")?,
            );

            for (idx, column) in columns.iter().enumerate() {
                if let Column::Extra(name) = column {
                    record.extra.insert(name.clone(), CellValue::parse(cell(idx)));
                }
            }

            records.push(record);
        }

        Ok(Self { columns, records })
    }

    /// Build a dataset from records already in memory
    pub fn from_records(records: Vec<Record>) -> Self {
        let extras: BTreeSet<String> = records
            .iter()
            .flat_map(|r| r.extra.keys().cloned())
            .collect();

        let mut columns = vec![Column::Area, Column::Year, Column::Price, Column::Demand];
        columns.extend(extras.into_iter().map(Column::Extra));

        Self { columns, records }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique area names in first-appearance order (exact spelling)
    pub fn areas(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.area.as_str()))
            .map(|r| r.area.clone())
            .collect()
    }

    /// All rows of one locality, dataset order, case-insensitive exact match.
    ///
    /// Returns `None` when the locality has no rows.
    pub fn slice(&self, locality: &str) -> Option<LocalitySlice> {
        let rows: Vec<Record> = self
            .records
            .iter()
            .filter(|r| r.is_in(locality))
            .cloned()
            .collect();

        if rows.is_empty() {
            None
        } else {
            Some(LocalitySlice::new(locality, rows))
        }
    }

    /// Rows whose area matches any of `areas` case-insensitively; every row when `areas` is empty
    pub fn filter_areas(&self, areas: &[String]) -> Vec<&Record> {
        if areas.is_empty() {
            return self.records.iter().collect();
        }

        let wanted: HashSet<String> = areas.iter().map(|a| a.to_lowercase()).collect();
        self.records
            .iter()
            .filter(|r| wanted.contains(&r.area.to_lowercase()))
            .collect()
    }
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "xlsx" | "xlsm" | "xlsb" | "xls" | "ods"
            )
        })
        .unwrap_or(false)
}

/// Cell as the text a CSV export of the sheet would hold
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::String(s) => s.clone(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{:?}", e),
        Data::Empty => String::new(),
    }
}

fn parse_year(raw: &str, line: usize) -> Result<i32, DataError> {
    let trimmed = raw.trim();
    let invalid = || DataError::InvalidCell {
        row: line,
        column: "year",
        value: raw.to_string(),
    };

    if let Ok(year) = trimmed.parse::<i32>() {
        return Ok(year);
    }

    // Spreadsheet exports sometimes write whole years as "2021.0"
    let amount: Amount = trimmed.parse().map_err(|_| invalid())?;
    if amount.is_integral() && amount.value().abs() <= i32::MAX as f64 {
        Ok(amount.value() as i32)
    } else {
        Err(invalid())
    }
}

fn parse_amount(raw: &str, line: usize, column: &'static str) -> Result<Amount, DataError> {
    raw.parse().map_err(|_| DataError::InvalidCell {
        row: line,
        column,
        value: raw.to_string(),
    })
}
