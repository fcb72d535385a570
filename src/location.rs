//! The current location value the router matches against.

use std::fmt;

/// A parsed location: path plus raw query string.
///
/// Immutable value; the store replaces it wholesale on every change, both
/// fields together. The query string never participates in route matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
	path: String,
	query: String,
}

impl Location {
	/// Parses a raw location string from the external source.
	///
	/// Everything before the first `?` is the path (an empty path is
	/// coerced to `/`); everything from the `?` onward, including the
	/// `?` itself, is the query. Never fails.
	pub fn parse(raw: &str) -> Self {
		let (path, query) = match raw.find('?') {
			Some(idx) => raw.split_at(idx),
			None => (raw, ""),
		};
		let path = if path.is_empty() { "/" } else { path };

		Self {
			path: path.to_string(),
			query: query.to_string(),
		}
	}

	/// The `/`-delimited path, always non-empty.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// The raw query string with its leading `?`, or `""`.
	pub fn query(&self) -> &str {
		&self.query
	}
}

impl Default for Location {
	fn default() -> Self {
		Self::parse("")
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.path, self.query)
	}
}
