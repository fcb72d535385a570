//! Error types for client-side routing.

use thiserror::Error;

/// Error raised when a path pattern fails to compile.
///
/// These only occur at declaration time; matching itself never fails,
/// it just produces no match.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
	/// Pattern exceeds the maximum allowed length.
	#[error("pattern length {len} exceeds maximum of {max} bytes")]
	TooLong {
		/// Actual pattern length in bytes.
		len: usize,
		/// Maximum allowed length.
		max: usize,
	},
	/// Pattern has too many path segments.
	#[error("pattern has {count} path segments, exceeding maximum of {max}")]
	TooManySegments {
		/// Actual segment count.
		count: usize,
		/// Maximum allowed count.
		max: usize,
	},
	/// A parameter segment has a name that is not a valid identifier.
	#[error("invalid parameter name '{0}' (expected [A-Za-z0-9_]+)")]
	InvalidParameterName(String),
	/// The compiled regex was rejected (size limit or syntax).
	#[error("failed to compile pattern regex: {0}")]
	Compile(String),
}

/// Error raised when typed parameter extraction fails.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParamError {
	/// A captured segment could not be parsed as the requested type.
	#[error("failed to parse parameter[{index}] '{raw}' as {ty}: {message}")]
	Parse {
		/// Position of the parameter in pattern order.
		index: usize,
		/// Name of the requested type.
		ty: &'static str,
		/// Raw captured segment.
		raw: String,
		/// Parse error message.
		message: String,
	},
	/// The number of captured parameters does not fit the handler.
	#[error("parameter count mismatch: expected {expected}, got {actual}")]
	CountMismatch {
		/// Number of parameters the handler expects.
		expected: usize,
		/// Number of parameters actually captured.
		actual: usize,
	},
}

/// Error type for router operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouterError {
	/// No route is registered under the given name.
	#[error("unknown route name: {0}")]
	UnknownRouteName(String),
	/// A parameter required for reverse URL generation was not supplied.
	#[error("missing parameter '{0}' for reverse lookup")]
	MissingParameter(String),
	/// Typed parameter extraction failed inside a handler.
	#[error("parameter extraction failed: {0}")]
	Params(#[from] ParamError),
}
