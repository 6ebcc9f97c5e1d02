//! Header-keyed CSV reading and writing.

use csv::{ReaderBuilder, WriterBuilder};
use indexmap::IndexMap;
use perseus_core::{Error, MessageQueue, Result, Severity};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// A parsed CSV file. The first row is the header; every record is
/// exposed as a header-keyed map.
pub struct CsvFile {
	path: String,
	headers: Vec<String>,
	records: Vec<IndexMap<String, String>>,
	messages: Arc<MessageQueue>,
}

impl CsvFile {
	/// Read and parse the file at `path`.
	pub fn open(path: impl AsRef<Path>, messages: Arc<MessageQueue>) -> Result<Self> {
		let path = path.as_ref();
		let mut reader = ReaderBuilder::new()
			.has_headers(true)
			.trim(csv::Trim::All)
			.from_path(path)
			.map_err(|e| Error::Io(format!("Unable to open {}: {e}", path.display())))?;

		let headers: Vec<String> = reader
			.headers()
			.map_err(|e| Error::Io(format!("Unable to read CSV headers: {e}")))?
			.iter()
			.map(str::to_string)
			.collect();

		let mut records = Vec::new();
		for row in reader.records() {
			let row = row.map_err(|e| Error::Io(format!("Malformed CSV record: {e}")))?;
			records.push(
				headers
					.iter()
					.cloned()
					.zip(row.iter().map(str::to_string))
					.collect(),
			);
		}

		tracing::debug!(path = %path.display(), rows = records.len(), "read csv");
		Ok(Self {
			path: path.display().to_string(),
			headers,
			records,
			messages,
		})
	}

	pub fn headers(&self) -> &[String] {
		&self.headers
	}

	pub fn records(&self) -> &[IndexMap<String, String>] {
		&self.records
	}

	/// All values of one column, in row order. With `distinct`, later
	/// duplicates are dropped. A missing column queues a warning and
	/// yields nothing.
	pub fn column(&self, name: &str, distinct: bool) -> Vec<String> {
		if !self.headers.iter().any(|h| h == name) {
			self.messages.add(
				Severity::Warning,
				format!("CSV column '{}' not found in {}.", name, self.path),
			);
			return Vec::new();
		}
		let mut values = Vec::new();
		for record in &self.records {
			if let Some(value) = record.get(name)
				&& (!distinct || !values.contains(value))
			{
				values.push(value.clone());
			}
		}
		values
	}
}

/// Writes header-keyed records back out as CSV.
pub struct CsvExporter {
	headers: Vec<String>,
	records: Vec<IndexMap<String, String>>,
}

impl CsvExporter {
	pub fn new(headers: Vec<String>) -> Self {
		Self {
			headers,
			records: Vec::new(),
		}
	}

	/// Append one record. Columns missing from the map export as empty
	/// cells; extra keys are ignored.
	pub fn add_record(&mut self, record: IndexMap<String, String>) {
		self.records.push(record);
	}

	pub fn write_to(&self, out: impl Write) -> Result<()> {
		let mut writer = WriterBuilder::new().from_writer(out);
		writer
			.write_record(&self.headers)
			.map_err(|e| Error::Io(format!("CSV write failed: {e}")))?;
		for record in &self.records {
			let row: Vec<&str> = self
				.headers
				.iter()
				.map(|h| record.get(h).map(String::as_str).unwrap_or(""))
				.collect();
			writer
				.write_record(&row)
				.map_err(|e| Error::Io(format!("CSV write failed: {e}")))?;
		}
		writer
			.flush()
			.map_err(|e| Error::Io(format!("CSV write failed: {e}")))?;
		Ok(())
	}

	pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
		let file = std::fs::File::create(path.as_ref())
			.map_err(|e| Error::Io(format!("Unable to create {}: {e}", path.as_ref().display())))?;
		self.write_to(file)
	}

	/// The CSV text, mainly for handlers that stream the export.
	pub fn to_csv_string(&self) -> Result<String> {
		let mut buf = Vec::new();
		self.write_to(&mut buf)?;
		String::from_utf8(buf).map_err(|e| Error::Io(format!("CSV write failed: {e}")))
	}
}
