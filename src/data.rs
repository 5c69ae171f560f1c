//! Data loading and transaction cleaning
//!
//! Raw invoice line items come in as CSV rows; the cleaner filters them down
//! to the valid transaction set the rest of the pipeline operates on.

use chrono::NaiveDateTime;
use serde::Deserialize;
use std::path::Path;

/// Accepted timestamp formats for the `InvoiceDate` column.
///
/// Spreadsheet exports of the Online Retail dataset show up with all three.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M"];

/// Invoice identifiers starting with this character denote cancellations.
const CANCELLATION_PREFIX: char = 'C';

/// One raw transaction row as it appears in the input file.
///
/// Field types are deliberately loose: quantity may be negative, customer id
/// and description may be missing, and the invoice identifier is always read
/// as text even when the column content is numeric, so the cancellation
/// prefix test below cannot silently miss.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Invoice", alias = "InvoiceNo")]
    pub invoice: String,
    #[serde(rename = "StockCode")]
    pub stock_code: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
    #[serde(rename = "InvoiceDate")]
    pub invoice_date: String,
    #[serde(rename = "Price", alias = "UnitPrice")]
    pub unit_price: Option<f64>,
    #[serde(rename = "Customer ID", alias = "CustomerID")]
    pub customer_id: Option<f64>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
}

/// A transaction that passed cleaning, with its derived line total.
#[derive(Debug, Clone)]
pub struct CleanedTransaction {
    pub invoice: String,
    pub stock_code: String,
    pub description: String,
    pub quantity: i64,
    pub invoice_date: NaiveDateTime,
    pub unit_price: f64,
    pub customer_id: i64,
    pub country: Option<String>,
    /// quantity * unit_price for this line
    pub line_total: f64,
}

/// Load raw transaction rows from a CSV file.
///
/// Rows that fail to deserialize (e.g. a non-numeric quantity) are skipped;
/// an unreadable file or missing header row is an error.
///
/// # Arguments
/// * `path` - Path to the input CSV file
///
/// # Returns
/// * All deserializable rows, in file order
pub fn load_records<P: AsRef<Path>>(path: P) -> crate::Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut records = Vec::new();

    for row in reader.deserialize() {
        match row {
            Ok(record) => records.push(record),
            Err(_) => continue, // malformed rows are dropped, not surfaced
        }
    }

    Ok(records)
}

/// Filter raw rows down to the valid transaction set.
///
/// A row survives iff:
/// - quantity > 0
/// - customer id is present
/// - description is present and non-empty
/// - unit price is present
/// - the invoice identifier does not carry the cancellation prefix
/// - the invoice timestamp parses under one of the accepted formats
///
/// Pure filter: invalid rows are dropped silently, never reported as errors.
pub fn clean_records(records: &[RawRecord]) -> Vec<CleanedTransaction> {
    records
        .iter()
        .filter_map(|record| {
            if record.quantity <= 0 {
                return None;
            }
            if record.invoice.starts_with(CANCELLATION_PREFIX) {
                return None;
            }
            let customer_id = record.customer_id? as i64;
            let description = record.description.as_deref()?.trim();
            if description.is_empty() {
                return None;
            }
            let unit_price = record.unit_price?;
            let invoice_date = parse_invoice_date(&record.invoice_date)?;

            Some(CleanedTransaction {
                invoice: record.invoice.clone(),
                stock_code: record.stock_code.clone(),
                description: description.to_string(),
                quantity: record.quantity,
                invoice_date,
                unit_price,
                customer_id,
                country: record.country.clone(),
                line_total: record.quantity as f64 * unit_price,
            })
        })
        .collect()
}

/// Parse an invoice timestamp, trying each accepted format in order.
pub fn parse_invoice_date(raw: &str) -> Option<NaiveDateTime> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw.trim(), format).ok())
}
