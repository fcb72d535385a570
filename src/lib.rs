//! Client-side routing for the Hearth marketplace front end.
//!
//! Hearth connects consumers with providers of local home services;
//! this crate is the navigation subsystem its pages sit on: it owns the
//! current location, matches it against an ordered table of path
//! patterns, and exposes imperative navigation. Pages, forms, and the
//! HTTP API client are external collaborators reached only through
//! this surface.
//!
//! - [`Location`]: the current path + query pair, parsed from the host
//!   environment's location string.
//! - [`LocationSource`]: the host's mutable location token and change
//!   signal, abstracted so the core runs off-browser;
//!   [`MemoryLocationSource`] is the in-process implementation.
//! - [`LocationStore`]: single source of truth for the current
//!   location, with subscribe/teardown lifecycle.
//! - [`PathPattern`]: `/service/:id`-style templates; a parameter
//!   matches exactly one non-empty path segment.
//! - [`Router`]: the ordered route table. First declaration to match
//!   wins; guards and redirect pseudo-routes cover protected pages.
//!
//! # Example
//!
//! ```
//! use hearth_router::{MemoryLocationSource, Path, Router, View};
//! use std::sync::Arc;
//!
//! let source = MemoryLocationSource::new();
//! let router = Router::new(Arc::new(source.clone()))
//!     .route("/", || View::text("Home"))
//!     .route("/search", || View::text("Search"))
//!     .route_params("/service/:id", |Path(id): Path<String>| {
//!         View::text(format!("service {id}"))
//!     });
//!
//! router.attach();
//! router.push("/service/42");
//!
//! assert_eq!(router.current_location().path(), "/service/42");
//! assert_eq!(router.params().get("id"), Some("42"));
//! ```

mod error;
mod handler;
mod location;
mod params;
mod pattern;
mod router;
mod source;
mod store;
mod view;

pub use error::{ParamError, PatternError, RouterError};
pub use handler::RouteHandler;
pub use location::Location;
pub use params::{FromParams, ParamMap, Path};
pub use pattern::PathPattern;
pub use router::{NavigationKind, Route, RouteGuard, RouteMatch, Router};
pub use source::{ListenerId, LocationListener, LocationSource, MemoryLocationSource};
pub use store::{LocationStore, LocationSubscriber, SubscriberId};
pub use view::View;
