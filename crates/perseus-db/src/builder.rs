//! Pure statement builders.
//!
//! These produce statement text only; binding happens in
//! [`MySqlService`](crate::MySqlService). Keeping them free of any
//! connection makes the SQL shape testable offline.

use crate::value::SqlValue;
use indexmap::IndexMap;
use std::fmt;

/// Comparison operator for a [`Filter`]. Filters combine with `AND`
/// only; there is no OR and no join support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
	Eq,
	Ne,
	Lt,
	Le,
	Gt,
	Ge,
}

impl FilterOp {
	pub fn as_sql(self) -> &'static str {
		match self {
			FilterOp::Eq => "=",
			FilterOp::Ne => "!=",
			FilterOp::Lt => "<",
			FilterOp::Le => "<=",
			FilterOp::Gt => ">",
			FilterOp::Ge => ">=",
		}
	}
}

impl fmt::Display for FilterOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_sql())
	}
}

/// One `column <op> ?` condition with its bound value.
#[derive(Debug, Clone)]
pub struct Filter {
	pub column: String,
	pub op: FilterOp,
	pub value: SqlValue,
}

impl Filter {
	pub fn new(column: impl Into<String>, op: FilterOp, value: impl Into<SqlValue>) -> Self {
		Self {
			column: column.into(),
			op,
			value: value.into(),
		}
	}

	/// Shorthand for the common equality filter.
	pub fn eq(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
		Self::new(column, FilterOp::Eq, value)
	}
}

/// Build an `INSERT` statement with one positional placeholder per
/// column, in the key order of the map.
///
/// # Examples
///
/// ```
/// use indexmap::IndexMap;
/// use perseus_db::{SqlValue, build_insert};
///
/// let mut columns: IndexMap<String, SqlValue> = IndexMap::new();
/// columns.insert("name".into(), "Ada".into());
/// columns.insert("city".into(), "Golden".into());
/// assert_eq!(
///     build_insert("registrants", &columns),
///     "INSERT INTO registrants (name, city) VALUES (?, ?)"
/// );
/// ```
pub fn build_insert(table: &str, columns: &IndexMap<String, SqlValue>) -> String {
	let names: Vec<&str> = columns.keys().map(String::as_str).collect();
	let placeholders = vec!["?"; columns.len()];
	format!(
		"INSERT INTO {} ({}) VALUES ({})",
		table,
		names.join(", "),
		placeholders.join(", ")
	)
}

/// Build a `SELECT` statement. An empty column list selects `*`;
/// filters are conjunctive, each contributing `col <op> ?`.
pub fn build_select(table: &str, columns: &[&str], filters: &[Filter]) -> String {
	let cols = if columns.is_empty() {
		"*".to_string()
	} else {
		columns.join(", ")
	};
	let mut sql = format!("SELECT {} FROM {}", cols, table);
	if !filters.is_empty() {
		let conditions: Vec<String> = filters
			.iter()
			.map(|f| format!("{} {} ?", f.column, f.op.as_sql()))
			.collect();
		sql.push_str(" WHERE ");
		sql.push_str(&conditions.join(" AND "));
	}
	sql
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn columns(pairs: &[(&str, &str)]) -> IndexMap<String, SqlValue> {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), SqlValue::from(*v)))
			.collect()
	}

	#[test]
	fn insert_places_placeholders_in_key_order() {
		let cols = columns(&[("name", "Ada"), ("city", "Golden"), ("mail", "ada@example.com")]);
		assert_eq!(
			build_insert("registrants", &cols),
			"INSERT INTO registrants (name, city, mail) VALUES (?, ?, ?)"
		);
	}

	#[test]
	fn insert_with_one_column() {
		let cols = columns(&[("event", "registration")]);
		assert_eq!(
			build_insert("flood", &cols),
			"INSERT INTO flood (event) VALUES (?)"
		);
	}

	#[test]
	fn select_all_columns_without_filters() {
		assert_eq!(build_select("registrants", &[], &[]), "SELECT * FROM registrants");
	}

	#[test]
	fn select_joins_filters_with_and() {
		let filters = vec![
			Filter::eq("event", "registration"),
			Filter::new("timestamp", FilterOp::Gt, 1_700_000_000_i64),
		];
		assert_eq!(
			build_select("flood", &["fid"], &filters),
			"SELECT fid FROM flood WHERE event = ? AND timestamp > ?"
		);
	}

	#[rstest]
	#[case(FilterOp::Eq, "=")]
	#[case(FilterOp::Ne, "!=")]
	#[case(FilterOp::Lt, "<")]
	#[case(FilterOp::Le, "<=")]
	#[case(FilterOp::Gt, ">")]
	#[case(FilterOp::Ge, ">=")]
	fn operators_render_their_sql(#[case] op: FilterOp, #[case] sql: &str) {
		assert_eq!(op.as_sql(), sql);
	}
}
