//! Minimal renderable stand-in for the page layer.
//!
//! The router only needs an opaque target it can hand back to the host;
//! real markup, forms, and styling live outside this crate.

use std::borrow::Cow;

/// Content a matched route renders into the router's slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
	/// Renders nothing.
	#[default]
	Empty,
	/// A text node.
	Text(Cow<'static, str>),
}

impl View {
	/// Creates a text view.
	pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(text.into())
	}

	/// Whether this view renders nothing.
	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	/// Renders the view to a plain string.
	pub fn render_to_string(&self) -> String {
		match self {
			Self::Empty => String::new(),
			Self::Text(text) => text.to_string(),
		}
	}
}

impl From<&'static str> for View {
	fn from(text: &'static str) -> Self {
		Self::text(text)
	}
}

impl From<String> for View {
	fn from(text: String) -> Self {
		Self::text(text)
	}
}
