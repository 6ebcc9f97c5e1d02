//! Data interchange services: CSV files and XML documents.

mod csv_file;
mod xml;

pub use csv_file::{CsvExporter, CsvFile};
pub use xml::{XmlDocument, XmlElement};
