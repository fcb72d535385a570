//! Captured route parameters and typed extraction.

use crate::error::ParamError;
use std::collections::HashMap;
use std::ops::Deref;

/// The parameters captured by the most recent successful match.
///
/// Always a mapping, never absent: when no route matched, or the matched
/// pattern had no parameter segments, accessors hand out an empty map.
/// Values are the raw path segments; no coercion happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
	named: HashMap<String, String>,
	/// Values in pattern order, so positional extraction is stable.
	ordered: Vec<String>,
}

impl ParamMap {
	/// Creates a map from named captures and their pattern-order values.
	pub fn new(named: HashMap<String, String>, ordered: Vec<String>) -> Self {
		Self { named, ordered }
	}

	/// The empty map.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Looks up a parameter by name.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.named.get(name).map(|s| s.as_str())
	}

	/// The captured values in pattern order.
	pub fn values(&self) -> &[String] {
		&self.ordered
	}

	/// Number of captured parameters.
	pub fn len(&self) -> usize {
		self.ordered.len()
	}

	/// Whether nothing was captured.
	pub fn is_empty(&self) -> bool {
		self.ordered.is_empty()
	}
}

/// Typed path parameter extractor.
///
/// Handlers take `Path<T>` where `T` implements [`FromParams`]; use a
/// tuple for routes with several parameters.
///
/// # Example
///
/// ```ignore
/// router.route_params("/service/:id", |Path(id): Path<i64>| {
///     service_details(id)
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
	/// Unwraps the inner value.
	pub fn into_inner(self) -> T {
		self.0
	}
}

impl<T> Deref for Path<T> {
	type Target = T;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Extraction of a typed value from the captured parameters.
pub trait FromParams: Sized {
	/// Extracts `Self` from the parameter map.
	///
	/// # Errors
	///
	/// [`ParamError::CountMismatch`] when the capture count is wrong,
	/// [`ParamError::Parse`] when a segment refuses the target type.
	fn from_params(params: &ParamMap) -> Result<Self, ParamError>;
}

fn parse_at<T>(params: &ParamMap, index: usize, ty: &'static str) -> Result<T, ParamError>
where
	T: std::str::FromStr,
	T::Err: std::fmt::Display,
{
	let raw = &params.ordered[index];
	raw.parse::<T>().map_err(|e| ParamError::Parse {
		index,
		ty,
		raw: raw.clone(),
		message: e.to_string(),
	})
}

macro_rules! impl_from_params_for_primitive {
	($($ty:ty => $type_name:expr),* $(,)?) => {
		$(
			impl FromParams for $ty {
				fn from_params(params: &ParamMap) -> Result<Self, ParamError> {
					if params.len() != 1 {
						return Err(ParamError::CountMismatch {
							expected: 1,
							actual: params.len(),
						});
					}
					parse_at::<$ty>(params, 0, $type_name)
				}
			}
		)*
	};
}

impl_from_params_for_primitive! {
	i32 => "i32",
	i64 => "i64",
	u32 => "u32",
	u64 => "u64",
	bool => "bool",
}

// String needs no parsing.
impl FromParams for String {
	fn from_params(params: &ParamMap) -> Result<Self, ParamError> {
		if params.len() != 1 {
			return Err(ParamError::CountMismatch {
				expected: 1,
				actual: params.len(),
			});
		}
		Ok(params.ordered[0].clone())
	}
}

macro_rules! impl_from_params_for_tuple {
	($($idx:tt => $ty:ident),+ $(,)?) => {
		impl<$($ty),+> FromParams for ($($ty,)+)
		where
			$($ty: std::str::FromStr,)+
			$(<$ty as std::str::FromStr>::Err: std::fmt::Display,)+
		{
			fn from_params(params: &ParamMap) -> Result<Self, ParamError> {
				let expected = [$($idx),+].len();
				if params.len() != expected {
					return Err(ParamError::CountMismatch {
						expected,
						actual: params.len(),
					});
				}
				Ok((
					$(parse_at::<$ty>(params, $idx, std::any::type_name::<$ty>())?,)+
				))
			}
		}
	};
}

impl_from_params_for_tuple!(0 => A, 1 => B);
impl_from_params_for_tuple!(0 => A, 1 => B, 2 => C);
impl_from_params_for_tuple!(0 => A, 1 => B, 2 => C, 3 => D);

impl<T: FromParams> FromParams for Path<T> {
	fn from_params(params: &ParamMap) -> Result<Self, ParamError> {
		T::from_params(params).map(Path)
	}
}
