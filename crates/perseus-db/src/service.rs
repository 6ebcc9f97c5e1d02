//! The connection-owning service.

use crate::builder::{Filter, build_insert, build_select};
use crate::value::SqlValue;
use indexmap::IndexMap;
use perseus_conf::DatabaseConfig;
use perseus_core::{Error, MessageQueue, Result, Severity};
use sqlx::mysql::{MySqlPoolOptions, MySqlRow};
use sqlx::{MySqlPool, Row};
use std::sync::Arc;

/// One pooled MySQL connection set.
///
/// Runtime failures never propagate to callers: they are queued on the
/// shared message queue as `MySQL error[...]` and the call returns an
/// empty result. Only [`MySqlService::connect`] is fallible, since a
/// service without a pool is useless.
pub struct MySqlService {
	pool: MySqlPool,
	messages: Arc<MessageQueue>,
}

impl MySqlService {
	/// Connect to the database described by `config`.
	pub async fn connect(config: &DatabaseConfig, messages: Arc<MessageQueue>) -> Result<Self> {
		let pool = MySqlPoolOptions::new()
			.max_connections(5)
			.connect(&config.url())
			.await
			.map_err(|e| Error::Database(format!("connection failed: {e}")))?;
		tracing::debug!(host = %config.host, database = %config.name, "connected");
		Ok(Self { pool, messages })
	}

	/// Wrap an already-built pool. Used by tests and installers that
	/// manage their own connection.
	pub fn from_pool(pool: MySqlPool, messages: Arc<MessageQueue>) -> Self {
		Self { pool, messages }
	}

	pub fn pool(&self) -> &MySqlPool {
		&self.pool
	}

	/// Insert one row; placeholders follow the key order of `columns`.
	/// Returns the number of affected rows, 0 on failure.
	pub async fn insert(&self, table: &str, columns: &IndexMap<String, SqlValue>) -> u64 {
		let sql = build_insert(table, columns);
		let mut query = sqlx::query(&sql);
		for value in columns.values() {
			query = bind_value(query, value);
		}
		match query.execute(&self.pool).await {
			Ok(done) => done.rows_affected(),
			Err(e) => {
				self.report("insert", &sql, &e);
				0
			}
		}
	}

	/// Select rows matching all `filters`. An empty `columns` slice
	/// selects every column. Returns an empty set on failure.
	pub async fn select(
		&self,
		table: &str,
		columns: &[&str],
		filters: &[Filter],
	) -> Vec<IndexMap<String, SqlValue>> {
		let sql = build_select(table, columns, filters);
		let mut query = sqlx::query(&sql);
		for filter in filters {
			query = bind_value(query, &filter.value);
		}
		match query.fetch_all(&self.pool).await {
			Ok(rows) => rows.iter().map(decode_row).collect(),
			Err(e) => {
				self.report("select", &sql, &e);
				Vec::new()
			}
		}
	}

	/// Run a raw statement, mainly for installers. Returns affected
	/// rows, 0 on failure.
	pub async fn query(&self, sql: &str) -> u64 {
		match sqlx::query(sql).execute(&self.pool).await {
			Ok(done) => done.rows_affected(),
			Err(e) => {
				self.report("query", sql, &e);
				0
			}
		}
	}

	fn report(&self, context: &str, sql: &str, err: &sqlx::Error) {
		tracing::error!(context, sql, error = %err, "statement failed");
		self.messages
			.add(Severity::Error, format!("MySQL error[{context}]: {err}"));
	}
}

type MySqlQuery<'q> = sqlx::query::Query<'q, sqlx::MySql, sqlx::mysql::MySqlArguments>;

fn bind_value<'q>(query: MySqlQuery<'q>, value: &'q SqlValue) -> MySqlQuery<'q> {
	match value {
		SqlValue::Null => query.bind(None::<String>),
		SqlValue::Int(v) => query.bind(*v),
		SqlValue::Float(v) => query.bind(*v),
		SqlValue::Text(v) => query.bind(v.as_str()),
	}
}

fn decode_row(row: &MySqlRow) -> IndexMap<String, SqlValue> {
	(0..row.len())
		.map(|i| (SqlValue::column_name(row, i), SqlValue::from_column(row, i)))
		.collect()
}
