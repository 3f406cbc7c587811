//! Viewer settings, provided to components through Leptos context.

use crate::components::canvas_view::LabelSize;

/// Canvas shown when the URL carries no `?canvas=` parameter.
pub const DEFAULT_CANVAS_PATH: &str = "/content/example.canvas";

/// Viewer settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
	/// Canvas document to load.
	pub canvas_path: String,
	/// URL prefix that node file paths are relative to.
	pub content_root: String,
	/// Smallest zoom factor.
	pub min_zoom: f64,
	/// Largest zoom factor.
	pub max_zoom: f64,
	/// Screen padding kept around the graph by fit-to-view.
	pub fit_padding: f64,
	/// Edge label preset.
	pub label_size: LabelSize,
}

impl Default for ViewerConfig {
	fn default() -> Self {
		Self {
			canvas_path: DEFAULT_CANVAS_PATH.to_string(),
			content_root: "/".to_string(),
			min_zoom: 0.1,
			max_zoom: 4.0,
			fit_padding: 40.0,
			label_size: LabelSize::default(),
		}
	}
}

impl ViewerConfig {
	/// Override the canvas path with a non-blank query value.
	pub fn with_canvas_path(mut self, path: Option<String>) -> Self {
		if let Some(path) = path.filter(|p| !p.trim().is_empty()) {
			self.canvas_path = path;
		}
		self
	}
}
