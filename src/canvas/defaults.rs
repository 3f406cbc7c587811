//! Fallback rules applied when a canvas record leaves a field out.
//!
//! Every default the converter applies lives here so the policy can be read
//! and tested in one place.

use crate::components::canvas_view::{RenderStyle, Size};

/// Size of a markdown node on any axis the file leaves out.
pub const MARKDOWN_SIZE: (f64, f64) = (400.0, 300.0);

/// Label of markdown nodes whose path has no file name.
pub const MARKDOWN_LABEL: &str = "Markdown";
/// Label of image nodes whose path has no file name.
pub const IMAGE_LABEL: &str = "Image";

/// Prefix of ids synthesized for edges without one.
pub const EDGE_ID_PREFIX: &str = "edge-";

const GROUP_BACKGROUND: &str = "rgba(200, 200, 200, 0.2)";
const GROUP_BORDER_COLOR: &str = "#ccc";
const TINT_ALPHA: &str = "20";

/// Canvas palette behind the preset colour tokens `"1"` through `"6"`.
const PALETTE: [&str; 6] = ["#fb464c", "#e9973f", "#e0de71", "#44cf6e", "#53dfdd", "#a882ff"];

/// Placeholder label embedding the node type, e.g. `Node text`.
pub fn placeholder_label(node_type: &str) -> String {
	format!("Node {node_type}")
}

/// Markdown size, filling missing or non-positive axes.
pub fn markdown_size(width: Option<f64>, height: Option<f64>) -> Size {
	Size::fixed(
		width.filter(|w| *w > 0.0).unwrap_or(MARKDOWN_SIZE.0),
		height.filter(|h| *h > 0.0).unwrap_or(MARKDOWN_SIZE.1),
	)
}

/// Resolve a palette token to hex; other colours pass through.
pub fn resolve_color(color: &str) -> String {
	let preset = color
		.parse::<usize>()
		.ok()
		.and_then(|n| n.checked_sub(1))
		.and_then(|n| PALETTE.get(n));
	match preset {
		Some(hex) => (*hex).to_string(),
		None => color.to_string(),
	}
}

/// Translucent variant of `color` for group backgrounds.
///
/// Only `#RGB` and `#RRGGBB` take an alpha suffix; anything else is returned
/// resolved but opaque.
pub fn tint(color: &str) -> String {
	let color = resolve_color(color);
	let Some(hex) = color.strip_prefix('#') else {
		return color;
	};
	if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
		return color;
	}
	match hex.len() {
		3 => {
			let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
			format!("#{expanded}{TINT_ALPHA}")
		}
		6 => format!("#{hex}{TINT_ALPHA}"),
		_ => color,
	}
}

/// Card style shared by markdown, text and file nodes.
pub fn card_style(color: Option<&str>) -> RenderStyle {
	RenderStyle {
		background: "rgba(255, 255, 255, 0.95)".into(),
		border: "1px solid #e2e8f0".into(),
		border_radius: 8.0,
		padding: 15.0,
		shadow: Some("0 1px 3px rgba(0,0,0,0.1)".into()),
		accent: color.map(resolve_color),
	}
}

/// Bare style for images.
pub fn image_style() -> RenderStyle {
	RenderStyle {
		background: "transparent".into(),
		border: "none".into(),
		border_radius: 8.0,
		padding: 0.0,
		shadow: None,
		accent: None,
	}
}

/// Group container style, tinted by the node colour when present.
pub fn group_style(color: Option<&str>) -> RenderStyle {
	let (background, border) = match color {
		Some(color) => (tint(color), resolve_color(color)),
		None => (GROUP_BACKGROUND.to_string(), GROUP_BORDER_COLOR.to_string()),
	};
	RenderStyle {
		background,
		border: format!("2px solid {border}"),
		border_radius: 8.0,
		padding: 20.0,
		shadow: None,
		accent: None,
	}
}
