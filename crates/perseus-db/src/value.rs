//! Values bound into statements and read back out of rows.

use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row};

/// A single cell: bound as a parameter on the way in, decoded from a
/// row on the way out.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
	Null,
	Int(i64),
	Float(f64),
	Text(String),
}

impl SqlValue {
	/// The textual form used when exporting rows (CSV, mail bodies).
	/// `Null` becomes the empty string.
	pub fn as_text(&self) -> String {
		match self {
			SqlValue::Null => String::new(),
			SqlValue::Int(v) => v.to_string(),
			SqlValue::Float(v) => v.to_string(),
			SqlValue::Text(v) => v.clone(),
		}
	}

	pub fn as_i64(&self) -> Option<i64> {
		match self {
			SqlValue::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Decode one column of a fetched row, trying the numeric types
	/// before falling back to text. MySQL reports unknown or exotic
	/// types as `Null` rather than failing the whole row set.
	pub(crate) fn from_column(row: &MySqlRow, index: usize) -> SqlValue {
		if let Ok(v) = row.try_get::<Option<i64>, _>(index) {
			return v.map(SqlValue::Int).unwrap_or(SqlValue::Null);
		}
		if let Ok(v) = row.try_get::<Option<f64>, _>(index) {
			return v.map(SqlValue::Float).unwrap_or(SqlValue::Null);
		}
		if let Ok(v) = row.try_get::<Option<String>, _>(index) {
			return v.map(SqlValue::Text).unwrap_or(SqlValue::Null);
		}
		SqlValue::Null
	}

	pub(crate) fn column_name(row: &MySqlRow, index: usize) -> String {
		row.column(index).name().to_string()
	}
}

impl From<&str> for SqlValue {
	fn from(v: &str) -> Self {
		SqlValue::Text(v.to_string())
	}
}

impl From<String> for SqlValue {
	fn from(v: String) -> Self {
		SqlValue::Text(v)
	}
}

impl From<i64> for SqlValue {
	fn from(v: i64) -> Self {
		SqlValue::Int(v)
	}
}

impl From<i32> for SqlValue {
	fn from(v: i32) -> Self {
		SqlValue::Int(v as i64)
	}
}

impl From<u64> for SqlValue {
	fn from(v: u64) -> Self {
		SqlValue::Int(v as i64)
	}
}

impl From<f64> for SqlValue {
	fn from(v: f64) -> Self {
		SqlValue::Float(v)
	}
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
	fn from(v: Option<T>) -> Self {
		v.map(Into::into).unwrap_or(SqlValue::Null)
	}
}
