/// A point in graph coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Position {
	/// Shorthand constructor.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Node dimensions. `None` leaves that axis to the node's natural size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
	/// Width in graph units.
	pub width: Option<f64>,
	/// Height in graph units.
	pub height: Option<f64>,
}

impl Size {
	/// A fully specified size.
	pub const fn fixed(width: f64, height: f64) -> Self {
		Self {
			width: Some(width),
			height: Some(height),
		}
	}
}

/// Renderer tag of a visual node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	/// Fetched and rendered markdown document.
	Markdown,
	/// Image loaded from the content root.
	Image,
	/// Translucent container.
	Group,
	/// Plain styled box.
	Default,
}

impl NodeKind {
	/// Key used for CSS classes and logging.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Markdown => "markdown",
			Self::Image => "image",
			Self::Group => "group",
			Self::Default => "default",
		}
	}
}

/// Kind-specific content of a visual node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodePayload {
	/// Markdown file relative to the content root.
	Markdown {
		/// Normalized path to fetch.
		file: String,
		/// Title shown above the content.
		label: String,
	},
	/// Image relative to the content root.
	Image {
		/// Normalized image path.
		src: String,
		/// Alt text and caption.
		label: String,
	},
	/// Group container.
	Group {
		/// Title of the group.
		label: String,
	},
	/// Text blocks, generic files and unknown node types.
	Default {
		/// Title of the box.
		label: String,
		/// Inline markdown of text nodes.
		text: Option<String>,
		/// Raw path when this is a generic file reference.
		file: Option<String>,
	},
}

impl NodePayload {
	/// The renderer tag this payload belongs to.
	pub fn kind(&self) -> NodeKind {
		match self {
			Self::Markdown { .. } => NodeKind::Markdown,
			Self::Image { .. } => NodeKind::Image,
			Self::Group { .. } => NodeKind::Group,
			Self::Default { .. } => NodeKind::Default,
		}
	}

	/// Display label, present for every kind.
	pub fn label(&self) -> &str {
		match self {
			Self::Markdown { label, .. }
			| Self::Image { label, .. }
			| Self::Group { label }
			| Self::Default { label, .. } => label,
		}
	}
}

/// Presentational attributes of a node box.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderStyle {
	/// CSS background.
	pub background: String,
	/// CSS border shorthand.
	pub border: String,
	/// Corner radius in pixels.
	pub border_radius: f64,
	/// Inner padding in pixels.
	pub padding: f64,
	/// CSS box-shadow, if any.
	pub shadow: Option<String>,
	/// Node colour carried over from the file, drawn as a top stripe.
	pub accent: Option<String>,
}

impl RenderStyle {
	/// Inline CSS declarations for the node box.
	pub fn to_css(&self) -> String {
		let mut css = format!(
			"background: {}; border: {}; border-radius: {}px; padding: {}px;",
			self.background, self.border, self.border_radius, self.padding
		);
		if let Some(shadow) = &self.shadow {
			css.push_str(&format!(" box-shadow: {shadow};"));
		}
		if let Some(accent) = &self.accent {
			css.push_str(&format!(" border-top: 4px solid {accent};"));
		}
		css
	}
}

/// A node as the rendering surface sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualNode {
	/// Copied from the canvas node.
	pub id: String,
	/// Top-left corner, copied from the canvas node.
	pub position: Position,
	/// Box size.
	pub size: Size,
	/// Kind-specific content.
	pub payload: NodePayload,
	/// Box styling.
	pub style: RenderStyle,
}

impl VisualNode {
	/// Renderer tag.
	pub fn kind(&self) -> NodeKind {
		self.payload.kind()
	}
}

/// Edge renderer tag. There is a single custom renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeKind {
	/// Bezier path with a floating label.
	#[default]
	Custom,
}

impl EdgeKind {
	/// Renderer key.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Custom => "custom",
		}
	}
}

/// An edge as the rendering surface sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualEdge {
	/// Copied or synthesized identifier.
	pub id: String,
	/// Source node id, unchecked.
	pub source: String,
	/// Target node id, unchecked.
	pub target: String,
	/// Lower-cased side of the source node.
	pub source_handle: Option<String>,
	/// Lower-cased side of the target node.
	pub target_handle: Option<String>,
	/// Label text, empty when the file has none.
	pub label: String,
	/// Renderer tag.
	pub kind: EdgeKind,
}

/// Converter output and rendering surface input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Visual nodes in document order.
	pub nodes: Vec<VisualNode>,
	/// Visual edges in document order.
	pub edges: Vec<VisualEdge>,
}

impl GraphData {
	/// First node with the given id.
	pub fn node(&self, id: &str) -> Option<&VisualNode> {
		self.nodes.iter().find(|node| node.id == id)
	}

	/// First edge with the given id.
	pub fn edge(&self, id: &str) -> Option<&VisualEdge> {
		self.edges.iter().find(|edge| edge.id == id)
	}
}
