//! Submitted request data.

use std::collections::HashMap;

/// The submitted field data for one request.
///
/// Field names map 1:1 to form item names. Forms read the map matching
/// their configured method.
///
/// # Examples
///
/// ```
/// use perseus_forms::RequestData;
///
/// let request = RequestData::from_post_query("name=Ada&mail=ada%40example.com");
/// assert_eq!(request.post.get("mail").map(String::as_str), Some("ada@example.com"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestData {
	pub get: HashMap<String, String>,
	pub post: HashMap<String, String>,
}

impl RequestData {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse a urlencoded query string into GET data.
	pub fn from_get_query(query: &str) -> Self {
		Self {
			get: parse_query(query),
			post: HashMap::new(),
		}
	}

	/// Parse a urlencoded body into POST data.
	pub fn from_post_query(body: &str) -> Self {
		Self {
			get: HashMap::new(),
			post: parse_query(body),
		}
	}

	/// POST data built from pairs, for tests and handlers that already
	/// decoded the body.
	pub fn with_post(pairs: &[(&str, &str)]) -> Self {
		Self {
			get: HashMap::new(),
			post: pairs
				.iter()
				.map(|(k, v)| (k.to_string(), v.to_string()))
				.collect(),
		}
	}
}

fn parse_query(query: &str) -> HashMap<String, String> {
	// Malformed payloads yield no data rather than an error; the form
	// then simply stays unsubmitted.
	serde_urlencoded::from_str::<Vec<(String, String)>>(query)
		.map(|pairs| pairs.into_iter().collect())
		.unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_urlencoded_values() {
		let request = RequestData::from_post_query("city=Golden+CO&zip=80401");
		assert_eq!(request.post.get("city").unwrap(), "Golden CO");
		assert_eq!(request.post.get("zip").unwrap(), "80401");
		assert!(request.get.is_empty());
	}

	#[test]
	fn empty_query_yields_no_data() {
		let request = RequestData::from_get_query("");
		assert!(request.get.is_empty());
	}
}
