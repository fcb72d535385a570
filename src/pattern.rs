//! Path pattern compilation and matching.
//!
//! Patterns are `/`-delimited templates mixing literal segments with
//! `:name` parameter segments, e.g. `/service/:id`. A parameter segment
//! matches exactly one non-empty path segment and never spans a `/`.

use crate::error::PatternError;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a pattern.
const MAX_PATTERN_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// A compiled path pattern.
///
/// Matching is case-sensitive, anchored to the full path, and performs
/// no trailing-slash normalization. A pattern without parameter segments
/// matches by plain string equality; the empty pattern never matches
/// anything (declarations carrying it are silently inert).
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The original pattern string.
	pattern: String,
	/// Compiled regex; only present for parameterized patterns.
	regex: Option<Regex>,
	/// Parameter names in pattern order.
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a pattern string.
	///
	/// A segment starting with `:` declares a parameter named by the
	/// remainder of the segment; `:` anywhere else in a segment is
	/// literal text. Parameter names must be `[A-Za-z0-9_]+`.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if the pattern exceeds the length or
	/// segment limits, names a parameter with invalid characters, or
	/// compiles to a regex the size limit rejects.
	pub fn new(pattern: &str) -> Result<Self, PatternError> {
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				len: pattern.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATTERN_SEGMENTS {
			return Err(PatternError::TooManySegments {
				count: segment_count,
				max: MAX_PATTERN_SEGMENTS,
			});
		}

		let (regex_str, param_names) = Self::compile(pattern)?;

		let regex = if param_names.is_empty() {
			// Exact patterns match by string equality; no regex needed.
			None
		} else {
			Some(
				RegexBuilder::new(&regex_str)
					.size_limit(MAX_REGEX_SIZE)
					.build()
					.map_err(|e| PatternError::Compile(e.to_string()))?,
			)
		};

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
			param_names,
		})
	}

	/// Translates the pattern into an anchored regex string and collects
	/// parameter names in order.
	fn compile(pattern: &str) -> Result<(String, Vec<String>), PatternError> {
		let mut param_names = Vec::new();
		let mut pieces = Vec::new();

		for segment in pattern.split('/') {
			match segment.strip_prefix(':') {
				Some(name) if !name.is_empty() => {
					if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
						return Err(PatternError::InvalidParameterName(name.to_string()));
					}
					// One non-empty segment, never across a slash.
					pieces.push(format!("(?P<{}>[^/]+)", name));
					param_names.push(name.to_string());
				}
				_ => pieces.push(regex::escape(segment)),
			}
		}

		Ok((format!("^{}$", pieces.join("/")), param_names))
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Whether this pattern has no parameter segments (and is non-empty).
	pub fn is_exact(&self) -> bool {
		self.param_names.is_empty() && !self.pattern.is_empty()
	}

	/// Attempts to match a path.
	///
	/// Returns the name→value map plus the values in pattern order, or
	/// `None`. The empty pattern matches nothing.
	pub fn matches(&self, path: &str) -> Option<(HashMap<String, String>, Vec<String>)> {
		if self.pattern.is_empty() {
			return None;
		}

		match &self.regex {
			None => (self.pattern == path).then(|| (HashMap::new(), Vec::new())),
			Some(regex) => regex.captures(path).map(|caps| {
				let values: Vec<String> = self
					.param_names
					.iter()
					.filter_map(|name| caps.name(name).map(|m| m.as_str().to_string()))
					.collect();
				let map: HashMap<String, String> = self
					.param_names
					.iter()
					.cloned()
					.zip(values.iter().cloned())
					.collect();
				(map, values)
			}),
		}
	}

	/// Whether this pattern would match the given path.
	pub fn is_match(&self, path: &str) -> bool {
		if self.pattern.is_empty() {
			return false;
		}
		match &self.regex {
			None => self.pattern == path,
			Some(regex) => regex.is_match(path),
		}
	}

	/// Substitutes parameter values back into the template.
	///
	/// Returns `None` if any parameter is missing from the map.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Option<String> {
		let pieces: Option<Vec<String>> = self
			.pattern
			.split('/')
			.map(|segment| match segment.strip_prefix(':') {
				Some(name) if !name.is_empty() => params.get(name).cloned(),
				_ => Some(segment.to_string()),
			})
			.collect();

		pieces.map(|pieces| pieces.join("/"))
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}
