//! Conversions between the ledger and portable documents.

pub mod backup;
pub mod coerce;
pub mod csv_export;

pub use backup::{
    backup_document, decode_batch, decode_document, decode_stored, ImportDecision, RejectReason,
    RestoreBatch, BACKUP_FILE_NAME,
};
pub use csv_export::{export_csv, export_file_name, parse_csv, CsvRow};
