//! Leptos client-side viewer for canvas documents.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod canvas;
pub mod config;

// Modules
mod components;
mod pages;

pub use components::canvas_view::{
	CanvasView, EdgeGeometry, EdgeKind, GraphAction, GraphData, LabelMetrics, LabelSize,
	NodeKind, NodePayload, Position, Rect, RenderStyle, Side, Size, ViewState, ViewTransform,
	VisualEdge, VisualNode,
};

// Top-Level pages
use crate::config::ViewerConfig;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the canvas viewer and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_context(ViewerConfig::default());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Canvas Viewer" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
