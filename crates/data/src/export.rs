//! CSV export of dataset rows

use std::io::Write;

use realty_chat_core::Record;

use crate::dataset::{Column, Dataset};
use crate::DataError;

impl Dataset {
    /// Write `rows` as CSV, header first, columns in dataset order
    pub fn write_csv<W: Write>(&self, rows: &[&Record], writer: W) -> Result<(), DataError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(self.columns().iter().map(Column::name))?;
        for record in rows {
            csv_writer.write_record(self.columns().iter().map(|c| cell_text(record, c)))?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Export rows matching `areas` (all rows when empty) as a CSV string
    pub fn export_csv(&self, areas: &[String]) -> Result<String, DataError> {
        let rows = self.filter_areas(areas);
        let mut buffer = Vec::new();
        self.write_csv(&rows, &mut buffer)?;

        tracing::debug!(rows = rows.len(), filters = areas.len(), "Exported dataset rows");

        String::from_utf8(buffer).map_err(|e| DataError::Csv(e.to_string()))
    }
}

fn cell_text(record: &Record, column: &Column) -> String {
    match column {
        Column::Area => record.area.clone(),
        Column::Year => record.year.to_string(),
        Column::Price => record.price.to_string(),
        Column::Demand => record.demand.to_string(),
        Column::Extra(name) => record
            .extra
            .get(name)
            .map(|v| v.to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
area,year,price,demand,city
Wakad,2021,4500,80,Pune
Aundh,2021,6000.5,70,\"Pune, MH\"
Wakad,2022,4700,85,
";

    #[test]
    fn test_full_export_round_trips_header_and_values() {
        let dataset = Dataset::from_reader(SHEET.as_bytes()).unwrap();
        let csv = dataset.export_csv(&[]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "area,year,price,demand,city");
        assert_eq!(lines[1], "Wakad,2021,4500,80,Pune");
        assert_eq!(lines[2], "Aundh,2021,6000.5,70,\"Pune, MH\"");
        assert_eq!(lines[3], "Wakad,2022,4700,85,");
    }

    #[test]
    fn test_filtered_export() {
        let dataset = Dataset::from_reader(SHEET.as_bytes()).unwrap();
        let csv = dataset.export_csv(&["WAKAD".to_string()]).unwrap();

        assert_eq!(csv.lines().count(), 3);
        assert!(!csv.contains("Aundh"));
    }

    #[test]
    fn test_unknown_area_exports_header_only() {
        let dataset = Dataset::from_reader(SHEET.as_bytes()).unwrap();
        let csv = dataset.export_csv(&["Baner".to_string()]).unwrap();
        assert_eq!(csv, "area,year,price,demand,city\n");
    }
}
