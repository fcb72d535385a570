//! The router: ordered route table, matching, and navigation.

use crate::error::{PatternError, RouterError};
use crate::handler::{RouteHandler, component_handler, fallible_handler, params_handler};
use crate::location::Location;
use crate::params::{FromParams, ParamMap, Path};
use crate::pattern::PathPattern;
use crate::source::LocationSource;
use crate::store::{LocationStore, LocationSubscriber, SubscriberId};
use crate::view::View;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// How a navigation should be recorded.
///
/// The underlying primitive is a single mutable location token, not a
/// history stack, so both kinds behave identically; the distinction is
/// kept for call sites that care to express intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
	/// Record as a new entry.
	Push,
	/// Replace the current entry.
	Replace,
}

/// Guard deciding whether a matched route may render.
pub type RouteGuard = Arc<dyn Fn(&RouteMatch) -> bool + Send + Sync>;

/// What a matched declaration resolves to.
enum RouteTarget {
	/// Render a view through the handler.
	Render(Arc<dyn RouteHandler>),
	/// Pseudo-route: navigate to the target instead of rendering.
	Redirect(String),
}

impl Clone for RouteTarget {
	fn clone(&self) -> Self {
		match self {
			Self::Render(handler) => Self::Render(Arc::clone(handler)),
			Self::Redirect(target) => Self::Redirect(target.clone()),
		}
	}
}

/// A single route declaration: pattern → target, in priority order.
pub struct Route {
	pattern: PathPattern,
	name: Option<String>,
	target: RouteTarget,
	guard: Option<RouteGuard>,
}

impl Route {
	fn render(pattern: &str, handler: Arc<dyn RouteHandler>) -> Result<Self, PatternError> {
		Ok(Self {
			pattern: PathPattern::new(pattern)?,
			name: None,
			target: RouteTarget::Render(handler),
			guard: None,
		})
	}

	fn redirect_to(pattern: &str, target: &str) -> Result<Self, PatternError> {
		Ok(Self {
			pattern: PathPattern::new(pattern)?,
			name: None,
			target: RouteTarget::Redirect(target.to_string()),
			guard: None,
		})
	}

	fn named(mut self, name: &str) -> Self {
		self.name = Some(name.to_string());
		self
	}

	fn guarded(mut self, guard: RouteGuard) -> Self {
		self.guard = Some(guard);
		self
	}

	/// The route's name, if any.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// The route's pattern.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Whether the guard (if any) lets the match through.
	pub fn check_guard(&self, route_match: &RouteMatch) -> bool {
		self.guard.as_ref().map(|g| g(route_match)).unwrap_or(true)
	}
}

impl Clone for Route {
	fn clone(&self) -> Self {
		Self {
			pattern: self.pattern.clone(),
			name: self.name.clone(),
			target: self.target.clone(),
			guard: self.guard.clone(),
		}
	}
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern)
			.field("name", &self.name)
			.field("is_redirect", &matches!(self.target, RouteTarget::Redirect(_)))
			.field("has_guard", &self.guard.is_some())
			.finish()
	}
}

/// A successful match: the selected route and its captured parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	/// The matched route.
	pub route: Route,
	/// Captured path parameters (empty for exact patterns).
	pub params: ParamMap,
}

/// Client-side router for the marketplace front end.
///
/// Owns the ordered route table and the location store; the external
/// location source is injected at construction. Matching is a pure
/// function of the current path and the declaration order: the first
/// declaration that matches (and whose guard passes) wins, and later
/// ones are never consulted.
///
/// # Example
///
/// ```ignore
/// let source = MemoryLocationSource::new();
/// let router = Router::new(Arc::new(source.clone()))
///     .route("/", || View::text("Home"))
///     .route("/search", || View::text("Search"))
///     .route_params("/service/:id", |Path(id): Path<String>| {
///         View::text(format!("service {id}"))
///     });
/// router.attach();
/// ```
pub struct Router {
	routes: Vec<Route>,
	named: HashMap<String, usize>,
	source: Arc<dyn LocationSource>,
	store: LocationStore,
	not_found: Option<Arc<dyn Fn() -> View + Send + Sync>>,
}

impl Router {
	/// Creates a router over the injected location source. The initial
	/// location comes from parsing the source's current value.
	pub fn new(source: Arc<dyn LocationSource>) -> Self {
		let store = LocationStore::new(Arc::clone(&source));

		Self {
			routes: Vec::new(),
			named: HashMap::new(),
			source,
			store,
			not_found: None,
		}
	}

	fn push_route(
		&mut self,
		pattern: &str,
		route: Result<Route, PatternError>,
		name: Option<&str>,
	) {
		match route {
			Ok(route) => {
				if let Some(name) = name {
					self.named.insert(name.to_string(), self.routes.len());
				}
				self.routes.push(route);
			}
			// Malformed declarations are inert, never fatal.
			Err(err) => warn!(pattern, error = %err, "ignoring route with invalid pattern"),
		}
	}

	/// Adds a route rendering a parameterless component.
	pub fn route<F>(mut self, pattern: &str, component: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		let route = Route::render(pattern, component_handler(component));
		self.push_route(pattern, route, None);
		self
	}

	/// Adds a named route (usable with [`reverse`](Self::reverse)).
	pub fn named_route<F>(mut self, name: &str, pattern: &str, component: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		let route = Route::render(pattern, component_handler(component)).map(|r| r.named(name));
		self.push_route(pattern, route, Some(name));
		self
	}

	/// Adds a route with typed path parameters.
	pub fn route_params<F, T>(mut self, pattern: &str, handler: F) -> Self
	where
		F: Fn(Path<T>) -> View + Send + Sync + 'static,
		T: FromParams + 'static,
	{
		let route = Route::render(pattern, params_handler(handler));
		self.push_route(pattern, route, None);
		self
	}

	/// Adds a named route with typed path parameters.
	pub fn named_route_params<F, T>(mut self, name: &str, pattern: &str, handler: F) -> Self
	where
		F: Fn(Path<T>) -> View + Send + Sync + 'static,
		T: FromParams + 'static,
	{
		let route = Route::render(pattern, params_handler(handler)).map(|r| r.named(name));
		self.push_route(pattern, route, Some(name));
		self
	}

	/// Adds a route whose handler may fail; errors fall back to the
	/// not-found view (or nothing).
	pub fn route_result<F, T, E>(mut self, pattern: &str, handler: F) -> Self
	where
		F: Fn(Path<T>) -> Result<View, E> + Send + Sync + 'static,
		T: FromParams + 'static,
		E: Into<RouterError> + 'static,
	{
		let route = Route::render(pattern, fallible_handler(handler));
		self.push_route(pattern, route, None);
		self
	}

	/// Adds a guarded route. A failing guard lets matching continue
	/// with later declarations, so a fallback (say, a redirect to the
	/// login page) can be declared after it under the same pattern.
	pub fn guarded_route<F, G>(mut self, pattern: &str, component: F, guard: G) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
		G: Fn(&RouteMatch) -> bool + Send + Sync + 'static,
	{
		let route = Route::render(pattern, component_handler(component))
			.map(|r| r.guarded(Arc::new(guard)));
		self.push_route(pattern, route, None);
		self
	}

	/// Adds a redirect pseudo-route: matching it navigates to `target`
	/// instead of rendering, unless the source is already there.
	pub fn redirect(mut self, pattern: &str, target: &str) -> Self {
		let route = Route::redirect_to(pattern, target);
		self.push_route(pattern, route, None);
		self
	}

	/// Sets the view rendered when nothing matches. Without it, an
	/// unmatched location renders nothing.
	pub fn not_found<F>(mut self, component: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		self.not_found = Some(Arc::new(component));
		self
	}

	/// Starts listening for external location changes. Idempotent.
	pub fn attach(&self) {
		self.store.bind();
	}

	/// Stops listening. Idempotent; also happens on drop.
	pub fn detach(&self) {
		self.store.teardown();
	}

	/// The current location.
	pub fn current_location(&self) -> Location {
		self.store.current()
	}

	/// Parameters captured for the current location.
	///
	/// Empty when nothing matches or the matched pattern has no
	/// parameter segments; never absent.
	pub fn params(&self) -> ParamMap {
		let location = self.store.current();
		self.match_path(location.path())
			.map(|m| m.params)
			.unwrap_or_default()
	}

	/// Name of the currently matched route, if any.
	pub fn current_route_name(&self) -> Option<String> {
		let location = self.store.current();
		self.match_path(location.path())
			.and_then(|m| m.route.name().map(str::to_string))
	}

	/// Registers a callback fired after every location change.
	pub fn on_location_change(&self, subscriber: LocationSubscriber) -> SubscriberId {
		self.store.subscribe(subscriber)
	}

	/// Removes a location-change callback.
	pub fn unsubscribe(&self, id: SubscriberId) -> bool {
		self.store.unsubscribe(id)
	}

	/// Matches a path against the declarations in order.
	///
	/// First success short-circuits; guards are consulted after the
	/// pattern matches and a failing guard falls through.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
		for route in &self.routes {
			if let Some((map, values)) = route.pattern.matches(path) {
				let route_match = RouteMatch {
					route: route.clone(),
					params: ParamMap::new(map, values),
				};

				if route.check_guard(&route_match) {
					debug!(path, pattern = %route.pattern, "route matched");
					return Some(route_match);
				}
			}
		}
		None
	}

	/// Navigates to a path: a fire-and-forget write to the location
	/// source. Local state is not touched here; the update arrives
	/// through the store's change listener.
	pub fn navigate(&self, path: &str, kind: NavigationKind) {
		debug!(path, ?kind, "navigate");
		self.source.set(path);
	}

	/// Navigates, recording a new entry.
	pub fn push(&self, path: &str) {
		self.navigate(path, NavigationKind::Push);
	}

	/// Navigates, replacing the current entry.
	pub fn replace(&self, path: &str) {
		self.navigate(path, NavigationKind::Replace);
	}

	/// Renders the view for the current location.
	///
	/// `None` means the slot renders nothing: no declaration matched
	/// (and no not-found view is set), or the match was a redirect
	/// pseudo-route, whose navigation will re-render on the next
	/// change notification.
	pub fn render_current(&self) -> Option<View> {
		let location = self.store.current();

		let Some(route_match) = self.match_path(location.path()) else {
			return self.not_found.as_ref().map(|f| f());
		};

		match &route_match.route.target {
			RouteTarget::Render(handler) => match handler.render(&route_match.params) {
				Ok(view) => Some(view),
				Err(err) => {
					warn!(path = location.path(), error = %err, "handler failed");
					self.not_found.as_ref().map(|f| f())
				}
			},
			RouteTarget::Redirect(redirect_target) => {
				// Guard against redirecting to where we already are;
				// otherwise render → navigate → notify → render loops.
				if self.source.current() == *redirect_target {
					warn!(to = %redirect_target, "redirect suppressed, already at target");
				} else {
					self.navigate(redirect_target, NavigationKind::Replace);
				}
				None
			}
		}
	}

	/// Generates a URL from a named route and parameter pairs.
	///
	/// # Errors
	///
	/// [`RouterError::UnknownRouteName`] if no route carries the name,
	/// [`RouterError::MissingParameter`] if the pattern needs a
	/// parameter the pairs do not supply.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		let index = self
			.named
			.get(name)
			.ok_or_else(|| RouterError::UnknownRouteName(name.to_string()))?;
		let route = &self.routes[*index];

		let map: HashMap<String, String> = params
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();

		route.pattern.reverse(&map).ok_or_else(|| {
			let missing = route
				.pattern
				.param_names()
				.iter()
				.find(|n| !map.contains_key(*n))
				.cloned()
				.unwrap_or_default();
			RouterError::MissingParameter(missing)
		})
	}

	/// Number of live declarations (invalid ones were dropped).
	pub fn route_count(&self) -> usize {
		self.routes.len()
	}

	/// Whether a named route exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.named.contains_key(name)
	}
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.routes.len())
			.field("named", &self.named.keys().collect::<Vec<_>>())
			.field("store", &self.store)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::source::MemoryLocationSource;

	fn home() -> View {
		View::text("Home")
	}

	fn search() -> View {
		View::text("Search")
	}

	fn router_at(path: &str) -> (MemoryLocationSource, Router) {
		let source = MemoryLocationSource::with_initial(path);
		let router = Router::new(Arc::new(source.clone()));
		(source, router)
	}

	#[test]
	fn test_empty_router_matches_nothing() {
		let (_source, router) = router_at("/");
		assert_eq!(router.route_count(), 0);
		assert!(router.match_path("/").is_none());
		assert!(router.render_current().is_none());
	}

	#[test]
	fn test_exact_match() {
		let (_source, router) = router_at("/");
		let router = router.route("/", home).route("/search", search);

		assert!(router.match_path("/").is_some());
		assert!(router.match_path("/search").is_some());
		assert!(router.match_path("/missing").is_none());
	}

	#[test]
	fn test_first_match_wins_over_later_literal() {
		let (_source, router) = router_at("/");
		let router = router
			.route_params("/service/:id", |Path(id): Path<String>| {
				View::text(format!("detail {id}"))
			})
			.route("/service/new", || View::text("create"));

		// Declaration order decides: the parameterized declaration
		// shadows the literal one that follows it.
		let m = router.match_path("/service/new").unwrap();
		assert_eq!(m.params.get("id"), Some("new"));
	}

	#[test]
	fn test_literal_before_param_takes_precedence() {
		let (_source, router) = router_at("/");
		let router = router
			.route("/service/new", || View::text("create"))
			.route_params("/service/:id", |Path(id): Path<String>| {
				View::text(format!("detail {id}"))
			});

		let m = router.match_path("/service/new").unwrap();
		assert!(m.params.is_empty());
	}

	#[test]
	fn test_invalid_pattern_is_ignored() {
		let (_source, router) = router_at("/");
		let router = router.route("/bad/:id.json", home).route("/search", search);
		assert_eq!(router.route_count(), 1);
		assert!(router.match_path("/search").is_some());
	}

	#[test]
	fn test_empty_pattern_is_ignored() {
		let (_source, router) = router_at("/");
		let router = router.route("", home);
		assert_eq!(router.route_count(), 1);
		assert!(router.match_path("/").is_none());
		assert!(router.match_path("").is_none());
	}

	#[test]
	fn test_guard_failure_falls_through() {
		let (_source, router) = router_at("/dashboard");
		let router = router
			.guarded_route("/dashboard", || View::text("Dashboard"), |_| false)
			.redirect("/dashboard", "/login");

		let m = router.match_path("/dashboard").unwrap();
		assert!(matches!(m.route.target, RouteTarget::Redirect(_)));
	}

	#[test]
	fn test_params_accessor_empty_when_unmatched() {
		let (_source, router) = router_at("/nowhere");
		let router = router.route("/", home);
		assert!(router.params().is_empty());
	}

	#[test]
	fn test_params_accessor_empty_for_exact_match() {
		let (_source, router) = router_at("/search");
		let router = router.route("/search", search);
		assert!(router.params().is_empty());
	}

	#[test]
	fn test_current_route_name() {
		let (_source, router) = router_at("/search");
		let router = router
			.named_route("home", "/", home)
			.named_route("search", "/search", search);

		assert_eq!(router.current_route_name(), Some("search".to_string()));
		assert!(router.has_route("home"));
		assert!(!router.has_route("dashboard"));
	}

	#[test]
	fn test_reverse() {
		let (_source, router) = router_at("/");
		let router = router
			.named_route("home", "/", home)
			.named_route_params("service_detail", "/service/:id", |Path(id): Path<i64>| {
				View::text(format!("{id}"))
			});

		assert_eq!(router.reverse("home", &[]).unwrap(), "/");
		assert_eq!(
			router.reverse("service_detail", &[("id", "42")]).unwrap(),
			"/service/42"
		);
	}

	#[test]
	fn test_reverse_unknown_name() {
		let (_source, router) = router_at("/");
		assert!(matches!(
			router.reverse("nope", &[]),
			Err(RouterError::UnknownRouteName(_))
		));
	}

	#[test]
	fn test_reverse_missing_parameter() {
		let (_source, router) = router_at("/");
		let router = router.named_route_params(
			"service_detail",
			"/service/:id",
			|Path(_id): Path<i64>| View::Empty,
		);

		assert_eq!(
			router.reverse("service_detail", &[]),
			Err(RouterError::MissingParameter("id".to_string()))
		);
	}

	#[test]
	fn test_render_current_not_found_fallback() {
		let (_source, router) = router_at("/missing");
		let router = router.route("/", home).not_found(|| View::text("404"));
		assert_eq!(router.render_current().unwrap().render_to_string(), "404");
	}

	#[test]
	fn test_render_current_without_not_found_renders_nothing() {
		let (_source, router) = router_at("/missing");
		let router = router.route("/", home);
		assert!(router.render_current().is_none());
	}

	#[test]
	fn test_root_without_root_pattern_is_no_match() {
		let (_source, router) = router_at("/");
		let router = router.route("/search", search);
		assert!(router.match_path("/").is_none());
		assert!(router.render_current().is_none());
	}

	#[test]
	fn test_route_result_error_falls_back_to_not_found() {
		let (_source, router) = router_at("/service/0");
		let router = router
			.route_result("/service/:id", |Path(id): Path<u32>| {
				if id == 0 {
					Err(RouterError::MissingParameter("id".to_string()))
				} else {
					Ok(View::text(format!("{id}")))
				}
			})
			.not_found(|| View::text("404"));

		assert_eq!(router.render_current().unwrap().render_to_string(), "404");
	}

	#[test]
	fn test_handler_error_falls_back_to_not_found() {
		let (_source, router) = router_at("/service/soon");
		let router = router
			.route_params("/service/:id", |Path(id): Path<i64>| {
				View::text(format!("{id}"))
			})
			.not_found(|| View::text("404"));

		// "soon" refuses i64; the typed handler fails, not panics.
		assert_eq!(router.render_current().unwrap().render_to_string(), "404");
	}
}
