// Route table matching over the marketplace page set.

use hearth_router::{MemoryLocationSource, ParamMap, Path, Router, View};
use std::sync::Arc;

fn page(label: &'static str) -> impl Fn() -> View + Send + Sync + 'static {
	move || View::text(label)
}

/// The front end's real route table: browse, search, service details,
/// auth pages, and a provider dashboard behind a guard with a login
/// redirect declared after it.
fn marketplace_router(source: &MemoryLocationSource, authenticated: bool) -> Router {
	Router::new(Arc::new(source.clone()))
		.route("/", page("Home"))
		.route("/search", page("Search"))
		.route_params("/service/:id", |Path(id): Path<String>| {
			View::text(format!("Service {id}"))
		})
		.route("/login", page("Login"))
		.route("/register", page("Register"))
		.guarded_route("/dashboard", page("Dashboard"), move |_| authenticated)
		.redirect("/dashboard", "/login")
}

#[test]
fn test_every_page_is_reachable() {
	let source = MemoryLocationSource::new();
	let router = marketplace_router(&source, true);
	router.attach();

	for (path, expected) in [
		("/", "Home"),
		("/search", "Search"),
		("/service/42", "Service 42"),
		("/login", "Login"),
		("/register", "Register"),
		("/dashboard", "Dashboard"),
	] {
		router.push(path);
		let view = router.render_current().expect(path);
		assert_eq!(view.render_to_string(), expected);
	}
}

#[test]
fn test_exact_match_is_strict() {
	let source = MemoryLocationSource::new();
	let router = marketplace_router(&source, true);
	router.attach();

	// No trailing-slash normalization, no case folding, no prefixes.
	for path in ["/search/", "/Search", "/search/extra", "/searc"] {
		assert!(router.match_path(path).is_none(), "{path} should not match");
	}
}

#[test]
fn test_param_capture_is_raw_and_single_segment() {
	let source = MemoryLocationSource::new();
	let router = marketplace_router(&source, true);

	let m = router.match_path("/service/deep-clean").unwrap();
	assert_eq!(m.params.get("id"), Some("deep-clean"));
	assert_eq!(m.params.len(), 1);

	// One segment only; nested paths and empty segments stay unmatched.
	assert!(router.match_path("/service/1/reviews").is_none());
	assert!(router.match_path("/service/").is_none());
	assert!(router.match_path("/service//").is_none());
}

#[test]
fn test_declaration_order_decides_precedence() {
	// "/service/new" is declared after "/service/:id", so the
	// parameterized route shadows it and captures id = "new".
	let source = MemoryLocationSource::new();
	let router = Router::new(Arc::new(source.clone()))
		.route_params("/service/:id", |Path(id): Path<String>| {
			View::text(format!("detail {id}"))
		})
		.route("/service/new", page("create"));

	let m = router.match_path("/service/new").unwrap();
	assert_eq!(m.params.get("id"), Some("new"));
}

#[test]
fn test_query_never_participates_in_matching() {
	let source = MemoryLocationSource::with_initial("/search?q=plumbing&area=north");
	let router = marketplace_router(&source, true);
	router.attach();

	assert_eq!(router.current_location().path(), "/search");
	assert_eq!(router.current_location().query(), "?q=plumbing&area=north");
	assert_eq!(
		router.render_current().unwrap().render_to_string(),
		"Search"
	);
}

#[test]
fn test_unmatched_renders_nothing_by_default() {
	let source = MemoryLocationSource::with_initial("/no/such/page");
	let router = marketplace_router(&source, true);
	assert!(router.render_current().is_none());
	assert_eq!(router.params(), ParamMap::empty());
}

#[test]
fn test_root_without_root_declaration_is_no_match() {
	let source = MemoryLocationSource::new();
	let router = Router::new(Arc::new(source.clone())).route("/search", page("Search"));
	assert!(router.match_path("/").is_none());
}

#[test]
fn test_guarded_dashboard_requires_auth() {
	let source = MemoryLocationSource::with_initial("/dashboard");

	let router = marketplace_router(&source, true);
	router.attach();
	assert_eq!(
		router.render_current().unwrap().render_to_string(),
		"Dashboard"
	);
	drop(router);

	let source = MemoryLocationSource::with_initial("/dashboard");
	let router = marketplace_router(&source, false);
	router.attach();

	// Guard fails, the redirect declaration under the same pattern
	// kicks in: nothing renders now, the location moves to /login.
	assert!(router.render_current().is_none());
	assert_eq!(router.current_location().path(), "/login");
	assert_eq!(router.render_current().unwrap().render_to_string(), "Login");
}

#[test]
fn test_typed_params_reach_the_handler() {
	let source = MemoryLocationSource::with_initial("/booking/7/review/3");
	let router = Router::new(Arc::new(source.clone())).route_params(
		"/booking/:booking_id/review/:review_id",
		|Path((booking_id, review_id)): Path<(u64, u64)>| {
			View::text(format!("booking {booking_id} review {review_id}"))
		},
	);

	assert_eq!(
		router.render_current().unwrap().render_to_string(),
		"booking 7 review 3"
	);
}

#[test]
fn test_reverse_urls_for_named_routes() {
	let source = MemoryLocationSource::new();
	let router = Router::new(Arc::new(source.clone()))
		.named_route("search", "/search", page("Search"))
		.named_route_params("service_detail", "/service/:id", |Path(id): Path<String>| {
			View::text(id)
		});

	assert_eq!(router.reverse("search", &[]).unwrap(), "/search");
	assert_eq!(
		router.reverse("service_detail", &[("id", "19")]).unwrap(),
		"/service/19"
	);
}
