//! Inventory File Parser
//!
//! Reads the stock report from CSV or Excel into a [`RecordSet`]. Rows whose
//! purchase date cannot be parsed are dropped and counted; every other
//! structural problem is a [`InventoryError::MalformedInput`].

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_from_rs, DataType, Reader, Xls, Xlsx};
use estoque_models::{InventoryRecord, RecordSet};
use tracing::{debug, info, warn};

use super::dates::{excel_serial_to_date, parse_purchase_date};
use crate::error::{InventoryError, InventoryResult};

pub const COL_PRODUCT: &str = "produto";
pub const COL_MANUFACTURER: &str = "fabricante";
pub const COL_PHYSICAL: &str = "quantidade fisica";
pub const COL_REQUESTED: &str = "quantidade solicitada";
pub const COL_RESERVED: &str = "quantidade reservada";
pub const COL_AVAILABLE: &str = "quantidade disponivel";
pub const COL_DAMAGED: &str = "quantidade avariada";
pub const COL_UNIT_COST: &str = "custo liquido entrada";
pub const COL_LAST_PURCHASE: &str = "data ultima compra";

pub const REQUIRED_COLUMNS: [&str; 9] = [
    COL_PRODUCT,
    COL_MANUFACTURER,
    COL_PHYSICAL,
    COL_REQUESTED,
    COL_RESERVED,
    COL_AVAILABLE,
    COL_DAMAGED,
    COL_UNIT_COST,
    COL_LAST_PURCHASE,
];

/// Cell values read as missing, matching the default NA set of pandas readers.
/// Compared case-sensitively after trimming.
pub const NA_TOKENS: [&str; 19] = [
    "",
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "-NaN",
    "-nan",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "N/A",
    "NA",
    "NULL",
    "NaN",
    "None",
    "n/a",
    "nan",
    "null",
];

fn is_missing(value: &str) -> bool {
    NA_TOKENS.contains(&value.trim())
}

/// Text cell with missing-value tokens mapped to an empty string.
fn text_value(value: &str) -> String {
    if is_missing(value) {
        String::new()
    } else {
        value.trim().to_string()
    }
}

/// Supported inventory file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryFormat {
    Csv,
    Xlsx,
    Xls,
}

impl InventoryFormat {
    /// Detect format from file extension. Unknown extensions are read as CSV.
    pub fn from_extension(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());
        match ext.as_deref() {
            Some("xlsx") => Self::Xlsx,
            Some("xls") => Self::Xls,
            _ => Self::Csv,
        }
    }
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadedInventory {
    pub source: String,
    pub format: InventoryFormat,
    pub records: RecordSet,
    /// Data rows read from the source, before dropping bad dates.
    pub total_rows: usize,
    /// Rows excluded because their purchase date did not parse.
    pub dropped_rows: usize,
}

/// Position of each required column in the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    product: usize,
    manufacturer: usize,
    physical: usize,
    requested: usize,
    reserved: usize,
    available: usize,
    damaged: usize,
    unit_cost: usize,
    last_purchase: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> InventoryResult<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|name| position(*name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(InventoryError::malformed(format!(
                "Missing required columns: {}",
                missing.join(", ")
            )));
        }

        let find = |name: &str| {
            position(name).ok_or_else(|| {
                InventoryError::malformed(format!("Missing required column: {}", name))
            })
        };

        Ok(Self {
            product: find(COL_PRODUCT)?,
            manufacturer: find(COL_MANUFACTURER)?,
            physical: find(COL_PHYSICAL)?,
            requested: find(COL_REQUESTED)?,
            reserved: find(COL_RESERVED)?,
            available: find(COL_AVAILABLE)?,
            damaged: find(COL_DAMAGED)?,
            unit_cost: find(COL_UNIT_COST)?,
            last_purchase: find(COL_LAST_PURCHASE)?,
        })
    }
}

/// Accumulates rows while a source is being read.
struct RowCollector {
    columns: ColumnIndex,
    header_len: usize,
    records: Vec<InventoryRecord>,
    total_rows: usize,
    dropped_rows: usize,
}

impl RowCollector {
    fn new(headers: &[String]) -> InventoryResult<Self> {
        Ok(Self {
            columns: ColumnIndex::resolve(headers)?,
            header_len: headers.len(),
            records: Vec::new(),
            total_rows: 0,
            dropped_rows: 0,
        })
    }

    /// `row_number` is the 1-based line in the source, header included.
    fn push(&mut self, row_number: usize, cells: &[String]) -> InventoryResult<()> {
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            return Ok(());
        }
        if cells.len() > self.header_len {
            return Err(InventoryError::malformed(format!(
                "Row {}: expected {} fields, found {}",
                row_number,
                self.header_len,
                cells.len()
            )));
        }

        self.total_rows += 1;
        let c = self.columns;
        let cell = |index: usize| cells.get(index).map(String::as_str).unwrap_or("");

        let Some(last_purchase_date) = parse_purchase_date(cell(c.last_purchase)) else {
            debug!(row = row_number, value = cell(c.last_purchase), "Dropping row with unparseable purchase date");
            self.dropped_rows += 1;
            return Ok(());
        };

        let number = |index: usize, column: &str| parse_number(cell(index), column, row_number);

        self.records.push(InventoryRecord {
            product: text_value(cell(c.product)),
            manufacturer: text_value(cell(c.manufacturer)),
            physical_quantity: number(c.physical, COL_PHYSICAL)?,
            requested_quantity: number(c.requested, COL_REQUESTED)?,
            reserved_quantity: number(c.reserved, COL_RESERVED)?,
            available_quantity: number(c.available, COL_AVAILABLE)?,
            damaged_quantity: number(c.damaged, COL_DAMAGED)?,
            unit_net_cost: number(c.unit_cost, COL_UNIT_COST)?,
            last_purchase_date,
        });
        Ok(())
    }

    fn finish(self, source: &str, format: InventoryFormat) -> InventoryResult<LoadedInventory> {
        if self.dropped_rows > 0 {
            warn!(
                source,
                dropped = self.dropped_rows,
                "Dropped rows with an unparseable purchase date"
            );
        }
        if self.records.is_empty() {
            return Err(InventoryError::empty_dataset(source));
        }

        info!(
            source,
            records = self.records.len(),
            total_rows = self.total_rows,
            "Inventory loaded"
        );

        Ok(LoadedInventory {
            source: source.to_string(),
            format,
            records: RecordSet::new(self.records),
            total_rows: self.total_rows,
            dropped_rows: self.dropped_rows,
        })
    }
}

/// Missing values become `NaN`.
fn parse_number(value: &str, column: &str, row_number: usize) -> InventoryResult<f64> {
    if is_missing(value) {
        return Ok(f64::NAN);
    }
    let trimmed = value.trim();
    trimmed.parse::<f64>().map_err(|_| {
        InventoryError::malformed(format!(
            "Row {}: column '{}' has non-numeric value '{}'",
            row_number, column, trimmed
        ))
    })
}

fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_string()
}

/// Main inventory loader
#[derive(Debug, Default, Clone, Copy)]
pub struct InventoryLoader;

impl InventoryLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load the inventory file at `path`, picking the format from its extension.
    pub fn load(&self, path: impl AsRef<Path>) -> InventoryResult<LoadedInventory> {
        let path = path.as_ref();
        let source = path.display().to_string();

        let data = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => InventoryError::file_not_found(&source),
            _ => InventoryError::malformed(format!("Failed to read {}: {}", source, e)),
        })?;

        self.parse_bytes(&source, &data, InventoryFormat::from_extension(path))
    }

    /// Load CSV content from any reader.
    pub fn load_from_reader<R: Read>(&self, source: &str, reader: R) -> InventoryResult<LoadedInventory> {
        self.parse_csv(source, reader)
    }

    /// Parse inventory content already held in memory.
    pub fn parse_bytes(
        &self,
        source: &str,
        data: &[u8],
        format: InventoryFormat,
    ) -> InventoryResult<LoadedInventory> {
        match format {
            InventoryFormat::Csv => self.parse_csv(source, data),
            InventoryFormat::Xlsx => {
                let workbook: Xlsx<_> =
                    open_workbook_from_rs(Cursor::new(data)).map_err(calamine::Error::from)?;
                self.parse_workbook(source, workbook, format)
            }
            InventoryFormat::Xls => {
                let workbook: Xls<_> =
                    open_workbook_from_rs(Cursor::new(data)).map_err(calamine::Error::from)?;
                self.parse_workbook(source, workbook, format)
            }
        }
    }

    fn parse_csv<R: Read>(&self, source: &str, reader: R) -> InventoryResult<LoadedInventory> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(InventoryError::empty_dataset(source));
        }

        let mut collector = RowCollector::new(&headers)?;

        for (idx, result) in reader.records().enumerate() {
            let record = result
                .map_err(|e| InventoryError::malformed(format!("Row {}: {}", idx + 2, e)))?;
            let cells: Vec<String> = record.iter().map(str::to_string).collect();
            collector.push(idx + 2, &cells)?;
        }

        collector.finish(source, InventoryFormat::Csv)
    }

    fn parse_workbook<RS, W>(&self, source: &str, mut workbook: W, format: InventoryFormat) -> InventoryResult<LoadedInventory>
    where
        RS: Read + Seek,
        W: Reader<RS>,
        calamine::Error: From<W::Error>,
    {
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| InventoryError::malformed("No sheets found in workbook"))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .ok_or_else(|| InventoryError::malformed(format!("Worksheet '{}' not found", sheet_name)))?
            .map_err(calamine::Error::from)?;

        let mut rows_iter = range.rows();

        // First row is headers
        let Some(header_row) = rows_iter.next() else {
            return Err(InventoryError::empty_dataset(source));
        };
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| normalize_header(&cell.to_string()))
            .collect();

        let mut collector = RowCollector::new(&headers)?;

        for (idx, row) in rows_iter.enumerate() {
            let cells: Vec<String> = row.iter().map(cell_text).collect();
            collector.push(idx + 2, &cells)?;
        }

        collector.finish(source, format)
    }
}

/// Text of a worksheet cell. Date cells are rendered as ISO dates so the
/// shared date parser handles them like any other source.
fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::DateTime(serial) => excel_serial_to_date(*serial)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Load the inventory file at `path` with the default loader.
pub fn load_inventory(path: impl AsRef<Path>) -> InventoryResult<LoadedInventory> {
    InventoryLoader::new().load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    const HEADER: &str = "produto,fabricante,quantidade fisica,quantidade solicitada,quantidade reservada,quantidade disponivel,quantidade avariada,custo liquido entrada,data ultima compra";

    fn csv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    fn load(content: &str) -> InventoryResult<LoadedInventory> {
        InventoryLoader::new().load_from_reader("test.csv", content.as_bytes())
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(InventoryFormat::from_extension(Path::new("df_estoque.csv")), InventoryFormat::Csv);
        assert_eq!(InventoryFormat::from_extension(Path::new("estoque.XLSX")), InventoryFormat::Xlsx);
        assert_eq!(InventoryFormat::from_extension(Path::new("estoque.xls")), InventoryFormat::Xls);
        assert_eq!(InventoryFormat::from_extension(Path::new("estoque")), InventoryFormat::Csv);
    }

    #[test]
    fn test_csv_parsing() {
        let content = csv(&[
            "Dipirona 500mg,EMS,100,20,5,5,10,2.5,2024-01-10",
            "Soro Fisiologico,Baxter,50,0,0,60,0,4.75,2024-06-01",
        ]);
        let loaded = load(&content).unwrap();

        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.total_rows, 2);
        assert_eq!(loaded.dropped_rows, 0);

        let first = &loaded.records.records()[0];
        assert_eq!(first.product, "Dipirona 500mg");
        assert_eq!(first.manufacturer, "EMS");
        assert_eq!(first.physical_quantity, 100.0);
        assert_eq!(first.available_quantity, 5.0);
        assert_eq!(first.unit_net_cost, 2.5);
        assert_eq!(first.last_purchase_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn test_unparseable_dates_are_dropped() {
        let content = csv(&[
            "A,X,1,0,0,1,0,1,2024-01-10",
            "B,X,1,0,0,1,0,1,not a date",
            "C,X,1,0,0,1,0,1,",
        ]);
        let loaded = load(&content).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.total_rows, 3);
        assert_eq!(loaded.dropped_rows, 2);
    }

    #[test]
    fn test_empty_after_dropping_dates() {
        let content = csv(&["A,X,1,0,0,1,0,1,??"]);
        assert!(matches!(load(&content), Err(InventoryError::EmptyDataset { .. })));
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(matches!(load(HEADER), Err(InventoryError::EmptyDataset { .. })));
        assert!(matches!(load(""), Err(InventoryError::EmptyDataset { .. })));
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let content = "produto,fabricante\nA,X";
        match load(content) {
            Err(InventoryError::MalformedInput { message }) => {
                assert!(message.contains("quantidade fisica"));
                assert!(message.contains("data ultima compra"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_quantity_is_malformed() {
        let content = csv(&["A,X,many,0,0,1,0,1,2024-01-10"]);
        assert!(matches!(load(&content), Err(InventoryError::MalformedInput { .. })));
    }

    #[test]
    fn test_too_many_fields_is_malformed() {
        let content = csv(&["A,X,1,0,0,1,0,1,2024-01-10,extra"]);
        assert!(matches!(load(&content), Err(InventoryError::MalformedInput { .. })));
    }

    #[test]
    fn test_blank_quantities_are_missing() {
        let content = csv(&["A,X,,0,0,,0,1,2024-01-10"]);
        let loaded = load(&content).unwrap();
        let record = &loaded.records.records()[0];
        assert!(record.physical_quantity.is_nan());
        assert!(record.available_quantity.is_nan());
    }

    #[test]
    fn test_na_tokens_are_missing() {
        let content = csv(&[
            "A,X,10,0,0,4,0,1,2024-01-10",
            "B,NULL,N/A,0,0,NA,#N/A,None,2024-01-11",
            "n/a,Y,1,null,<NA>,1,-nan,1,2024-01-12",
        ]);
        let loaded = load(&content).unwrap();
        assert_eq!(loaded.records.len(), 3);

        let second = &loaded.records.records()[1];
        assert!(second.physical_quantity.is_nan());
        assert!(second.available_quantity.is_nan());
        assert!(second.damaged_quantity.is_nan());
        assert!(second.unit_net_cost.is_nan());
        assert!(!second.has_manufacturer());

        let third = &loaded.records.records()[2];
        assert!(!third.has_product());
        assert!(third.requested_quantity.is_nan());
        assert!(third.reserved_quantity.is_nan());
    }

    #[test]
    fn test_na_tokens_are_case_sensitive() {
        let content = csv(&["A,X,Na,0,0,1,0,1,2024-01-10"]);
        assert!(matches!(load(&content), Err(InventoryError::MalformedInput { .. })));
    }

    #[test]
    fn test_extra_columns_and_order_are_ignored() {
        let content = "codigo,data ultima compra,produto,fabricante,quantidade fisica,quantidade solicitada,quantidade reservada,quantidade disponivel,quantidade avariada,custo liquido entrada\n\
                       77,2023-03-01,C,Y,10,5,0,2,0,1.5";
        let loaded = load(content).unwrap();
        let record = &loaded.records.records()[0];
        assert_eq!(record.product, "C");
        assert_eq!(record.requested_quantity, 5.0);
    }

    #[test]
    fn test_missing_file() {
        let result = load_inventory("/definitely/not/here/df_estoque.csv");
        assert!(matches!(result, Err(InventoryError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("estoque-loader-{}.csv", std::process::id()));
        std::fs::write(&path, csv(&["A,X,3,1,0,2,0,1,2022-12-31"])).unwrap();
        let loaded = load_inventory(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.format, InventoryFormat::Csv);
        assert_eq!(loaded.records.len(), 1);
    }

    #[test]
    fn test_bad_workbook_is_malformed() {
        let result = InventoryLoader::new().parse_bytes("broken.xlsx", b"not a zip", InventoryFormat::Xlsx);
        assert!(matches!(result, Err(InventoryError::MalformedInput { .. })));
    }

    #[test]
    fn test_undecodable_header_is_malformed() {
        let result = InventoryLoader::new().load_from_reader("latin1.csv", &b"produto\xff,fabricante\nA,X"[..]);
        assert!(matches!(result, Err(InventoryError::MalformedInput { .. })));
    }

    #[test]
    fn test_cell_text_renders_dates() {
        assert_eq!(cell_text(&DataType::DateTime(45301.0)), "2024-01-10");
        assert_eq!(cell_text(&DataType::String("Bayer".to_string())), "Bayer");
        assert_eq!(cell_text(&DataType::Empty), "");
    }

    proptest! {
        /// Every loaded record has a date; rows in = rows kept + rows dropped.
        #[test]
        fn prop_loader_accounts_for_every_row(
            dates in proptest::collection::vec(
                prop_oneof![
                    Just("2024-01-10".to_string()),
                    Just("03/15/2023".to_string()),
                    Just("".to_string()),
                    Just("n/a".to_string()),
                ],
                1..20,
            )
        ) {
            let rows: Vec<String> = dates
                .iter()
                .enumerate()
                .map(|(i, date)| format!("P{},M,1,0,0,1,0,1,{}", i, date))
                .collect();
            let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
            let valid = dates.iter().filter(|d| parse_purchase_date(d).is_some()).count();

            match load(&csv(&row_refs)) {
                Ok(loaded) => {
                    prop_assert_eq!(loaded.records.len(), valid);
                    prop_assert_eq!(loaded.total_rows, dates.len());
                    prop_assert_eq!(loaded.dropped_rows, dates.len() - valid);
                }
                Err(InventoryError::EmptyDataset { .. }) => prop_assert_eq!(valid, 0),
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
    }
}
