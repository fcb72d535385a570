//! Route handler abstractions.
//!
//! Handlers abstract over the closure shapes pages register with:
//! `Fn() -> View`, `Fn(Path<T>) -> View`, and the fallible
//! `Fn(Path<T>) -> Result<View, E>`.

use crate::error::RouterError;
use crate::params::{FromParams, ParamMap, Path};
use crate::view::View;
use std::marker::PhantomData;
use std::sync::Arc;

/// Object-safe rendering entry point for a matched route.
pub trait RouteHandler: Send + Sync {
	/// Renders the target with the captured parameters.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Params`] if typed extraction fails.
	fn render(&self, params: &ParamMap) -> Result<View, RouterError>;
}

/// Handler for routes whose component takes no parameters.
struct ComponentHandler<F> {
	component: F,
}

impl<F> RouteHandler for ComponentHandler<F>
where
	F: Fn() -> View + Send + Sync,
{
	fn render(&self, _params: &ParamMap) -> Result<View, RouterError> {
		Ok((self.component)())
	}
}

/// Handler for routes with typed path parameters.
struct ParamsHandler<F, T> {
	handler: F,
	_marker: PhantomData<fn() -> T>,
}

impl<F, T> RouteHandler for ParamsHandler<F, T>
where
	F: Fn(Path<T>) -> View + Send + Sync,
	T: FromParams,
{
	fn render(&self, params: &ParamMap) -> Result<View, RouterError> {
		let extracted = Path::<T>::from_params(params)?;
		Ok((self.handler)(extracted))
	}
}

/// Handler for fallible routes returning `Result<View, E>`.
struct FallibleHandler<F, T, E> {
	handler: F,
	_marker: PhantomData<fn() -> (T, E)>,
}

impl<F, T, E> RouteHandler for FallibleHandler<F, T, E>
where
	F: Fn(Path<T>) -> Result<View, E> + Send + Sync,
	T: FromParams,
	E: Into<RouterError>,
{
	fn render(&self, params: &ParamMap) -> Result<View, RouterError> {
		let extracted = Path::<T>::from_params(params)?;
		(self.handler)(extracted).map_err(Into::into)
	}
}

pub(crate) fn component_handler<F>(component: F) -> Arc<dyn RouteHandler>
where
	F: Fn() -> View + Send + Sync + 'static,
{
	Arc::new(ComponentHandler { component })
}

pub(crate) fn params_handler<F, T>(handler: F) -> Arc<dyn RouteHandler>
where
	F: Fn(Path<T>) -> View + Send + Sync + 'static,
	T: FromParams + 'static,
{
	Arc::new(ParamsHandler {
		handler,
		_marker: PhantomData,
	})
}

pub(crate) fn fallible_handler<F, T, E>(handler: F) -> Arc<dyn RouteHandler>
where
	F: Fn(Path<T>) -> Result<View, E> + Send + Sync + 'static,
	T: FromParams + 'static,
	E: Into<RouterError> + 'static,
{
	Arc::new(FallibleHandler {
		handler,
		_marker: PhantomData,
	})
}
