//! Layout math for node boxes, handles and edge curves.

use super::types::{Position, Size, VisualNode};

/// Box size used for nodes whose file gives no size.
pub const NATURAL_SIZE: (f64, f64) = (250.0, 60.0);

/// Auto-resize never shrinks a node below this.
pub const AUTO_MIN: (f64, f64) = (150.0, 80.0);
/// Auto-resize never grows a node above this.
pub const AUTO_MAX: (f64, f64) = (500.0, 400.0);

/// Manual resizing never shrinks a node below this.
pub const RESIZE_MIN: (f64, f64) = (100.0, 50.0);

const CURVATURE: f64 = 0.25;

/// Side of a node box where an edge attaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
	/// Top edge.
	Top,
	/// Right edge.
	Right,
	/// Bottom edge.
	Bottom,
	/// Left edge.
	Left,
}

impl Side {
	/// Every side, in drawing order.
	pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

	/// Parse a side name in any case.
	pub fn parse(name: &str) -> Option<Self> {
		match name.to_ascii_lowercase().as_str() {
			"top" => Some(Self::Top),
			"right" => Some(Self::Right),
			"bottom" => Some(Self::Bottom),
			"left" => Some(Self::Left),
			_ => None,
		}
	}

	/// Lower-case handle name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Top => "top",
			Self::Right => "right",
			Self::Bottom => "bottom",
			Self::Left => "left",
		}
	}
}

/// Axis-aligned rectangle in graph coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Width.
	pub width: f64,
	/// Height.
	pub height: f64,
}

impl Rect {
	/// Right edge.
	pub fn right(&self) -> f64 {
		self.x + self.width
	}

	/// Bottom edge.
	pub fn bottom(&self) -> f64 {
		self.y + self.height
	}

	/// Centre point.
	pub fn center(&self) -> Position {
		Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	/// Whether `p` lies inside, borders included.
	pub fn contains(&self, p: Position) -> bool {
		p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
	}

	/// Smallest rectangle covering both.
	pub fn union(&self, other: &Rect) -> Rect {
		let x = self.x.min(other.x);
		let y = self.y.min(other.y);
		Rect {
			x,
			y,
			width: self.right().max(other.right()) - x,
			height: self.bottom().max(other.bottom()) - y,
		}
	}
}

/// Box of a node, with natural size standing in for missing axes.
pub fn footprint(node: &VisualNode) -> Rect {
	let Size { width, height } = node.size;
	Rect {
		x: node.position.x,
		y: node.position.y,
		width: width.unwrap_or(NATURAL_SIZE.0),
		height: height.unwrap_or(NATURAL_SIZE.1),
	}
}

/// Bounding box of all nodes.
pub fn bounds<'a>(nodes: impl IntoIterator<Item = &'a VisualNode>) -> Option<Rect> {
	nodes
		.into_iter()
		.map(footprint)
		.reduce(|acc, rect| acc.union(&rect))
}

/// Midpoint of `side` on `rect`.
pub fn anchor(rect: Rect, side: Side) -> Position {
	let c = rect.center();
	match side {
		Side::Top => Position::new(c.x, rect.y),
		Side::Right => Position::new(rect.right(), c.y),
		Side::Bottom => Position::new(c.x, rect.bottom()),
		Side::Left => Position::new(rect.x, c.y),
	}
}

/// Resolved drawing data for one edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeGeometry {
	/// SVG path data.
	pub path: String,
	/// Point where the label is centred.
	pub label: Position,
	/// Start of the curve.
	pub source: Position,
	/// End of the curve.
	pub target: Position,
}

fn control_offset(distance: f64) -> f64 {
	if distance >= 0.0 {
		0.5 * distance
	} else {
		CURVATURE * 25.0 * (-distance).sqrt()
	}
}

fn control_point(side: Side, from: Position, to: Position) -> Position {
	match side {
		Side::Left => Position::new(from.x - control_offset(from.x - to.x), from.y),
		Side::Right => Position::new(from.x + control_offset(to.x - from.x), from.y),
		Side::Top => Position::new(from.x, from.y - control_offset(from.y - to.y)),
		Side::Bottom => Position::new(from.x, from.y + control_offset(to.y - from.y)),
	}
}

/// Cubic bezier from `source` leaving through `source_side` to `target`
/// entering through `target_side`.
pub fn bezier(source: Position, source_side: Side, target: Position, target_side: Side) -> EdgeGeometry {
	let c1 = control_point(source_side, source, target);
	let c2 = control_point(target_side, target, source);
	// point at t = 0.5
	let label = Position::new(
		0.125 * source.x + 0.375 * c1.x + 0.375 * c2.x + 0.125 * target.x,
		0.125 * source.y + 0.375 * c1.y + 0.375 * c2.y + 0.125 * target.y,
	);
	EdgeGeometry {
		path: format!(
			"M{},{} C{},{} {},{} {},{}",
			source.x, source.y, c1.x, c1.y, c2.x, c2.y, target.x, target.y
		),
		label,
		source,
		target,
	}
}

/// Edge label presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelSize {
	/// 10px text.
	Tiny,
	/// 14px text.
	Compact,
	/// 18px text.
	#[default]
	Normal,
	/// 24px text.
	Prominent,
	/// 32px text.
	Emphasis,
	/// 40px text.
	Highlight,
}

/// Font size and minimum background box of a label preset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelMetrics {
	/// Font size in pixels.
	pub font_size: f64,
	/// Minimum background width.
	pub width: f64,
	/// Background height.
	pub height: f64,
}

impl LabelSize {
	/// Metrics of this preset.
	pub fn metrics(self) -> LabelMetrics {
		let (font_size, width, height) = match self {
			Self::Tiny => (10.0, 120.0, 24.0),
			Self::Compact => (14.0, 160.0, 32.0),
			Self::Normal => (18.0, 200.0, 40.0),
			Self::Prominent => (24.0, 240.0, 48.0),
			Self::Emphasis => (32.0, 320.0, 64.0),
			Self::Highlight => (40.0, 400.0, 80.0),
		};
		LabelMetrics {
			font_size,
			width,
			height,
		}
	}
}

/// Background box of `label` centred on `at`, widened for long text.
pub fn label_box(label: &str, at: Position, size: LabelSize) -> Rect {
	let m = size.metrics();
	// rough average glyph width for bold sans-serif
	let text_width = label.chars().count() as f64 * m.font_size * 0.6 + m.font_size;
	let width = m.width.max(text_width);
	Rect {
		x: at.x - width / 2.0,
		y: at.y - m.height / 2.0,
		width,
		height: m.height,
	}
}

/// New size for a node whose content measured `measured`, or `None` when
/// the change is within a pixel.
pub fn auto_size(current: Size, measured_width: f64, measured_height: f64) -> Option<Size> {
	let width = measured_width.clamp(AUTO_MIN.0, AUTO_MAX.0);
	let height = measured_height.clamp(AUTO_MIN.1, AUTO_MAX.1);
	let current_width = current.width.unwrap_or(NATURAL_SIZE.0);
	let current_height = current.height.unwrap_or(NATURAL_SIZE.1);
	if (width - current_width).abs() <= 1.0 && (height - current_height).abs() <= 1.0 {
		return None;
	}
	Some(Size::fixed(width, height))
}

/// Size of a node dragged by its corner grip by `(dx, dy)` graph units.
pub fn drag_resize(origin: Size, dx: f64, dy: f64) -> Size {
	let width = origin.width.unwrap_or(NATURAL_SIZE.0) + dx;
	let height = origin.height.unwrap_or(NATURAL_SIZE.1) + dy;
	Size::fixed(width.max(RESIZE_MIN.0), height.max(RESIZE_MIN.1))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::canvas_view::types::{NodePayload, RenderStyle};

	fn node(x: f64, y: f64, size: Size) -> VisualNode {
		VisualNode {
			id: "n".into(),
			position: Position::new(x, y),
			size,
			payload: NodePayload::Group { label: "g".into() },
			style: RenderStyle {
				background: String::new(),
				border: String::new(),
				border_radius: 0.0,
				padding: 0.0,
				shadow: None,
				accent: None,
			},
		}
	}

	#[test]
	fn footprint_uses_natural_size() {
		let rect = footprint(&node(10.0, 20.0, Size::default()));
		assert_eq!(rect, Rect { x: 10.0, y: 20.0, width: 250.0, height: 60.0 });
	}

	#[test]
	fn anchors_sit_on_side_midpoints() {
		let rect = Rect { x: 0.0, y: 0.0, width: 100.0, height: 50.0 };
		assert_eq!(anchor(rect, Side::Top), Position::new(50.0, 0.0));
		assert_eq!(anchor(rect, Side::Right), Position::new(100.0, 25.0));
		assert_eq!(anchor(rect, Side::Bottom), Position::new(50.0, 50.0));
		assert_eq!(anchor(rect, Side::Left), Position::new(0.0, 25.0));
	}

	#[test]
	fn side_parse_ignores_case() {
		assert_eq!(Side::parse("Top"), Some(Side::Top));
		assert_eq!(Side::parse("LEFT"), Some(Side::Left));
		assert_eq!(Side::parse("middle"), None);
	}

	#[test]
	fn straight_horizontal_curve_has_midpoint_label() {
		let geo = bezier(Position::new(0.0, 0.0), Side::Right, Position::new(100.0, 0.0), Side::Left);
		assert_eq!(geo.label, Position::new(50.0, 0.0));
		assert_eq!(geo.path, "M0,0 C50,0 50,0 100,0");
	}

	#[test]
	fn backwards_curve_bulges_outward() {
		let geo = bezier(Position::new(100.0, 0.0), Side::Right, Position::new(0.0, 0.0), Side::Left);
		// control points pushed past both ends
		assert!(geo.path.contains("C162.5,0 -62.5,0"));
	}

	#[test]
	fn bounds_cover_all_nodes() {
		let nodes = [
			node(0.0, 0.0, Size::fixed(10.0, 10.0)),
			node(-5.0, 20.0, Size::fixed(10.0, 10.0)),
		];
		assert_eq!(
			bounds(&nodes),
			Some(Rect { x: -5.0, y: 0.0, width: 15.0, height: 30.0 })
		);
		assert_eq!(bounds(&[] as &[VisualNode]), None);
	}

	#[test]
	fn label_box_grows_for_long_text() {
		let short = label_box("hi", Position::default(), LabelSize::Normal);
		assert_eq!(short.width, 200.0);
		assert_eq!(short.center(), Position::default());
		let long = label_box(&"x".repeat(40), Position::default(), LabelSize::Normal);
		assert!(long.width > 200.0);
	}

	#[test]
	fn auto_size_clamps_and_ignores_jitter() {
		let current = Size::fixed(400.0, 300.0);
		assert_eq!(auto_size(current, 400.5, 300.9), None);
		assert_eq!(auto_size(current, 400.0, 1200.0), Some(Size::fixed(400.0, 400.0)));
		assert_eq!(auto_size(current, 20.0, 10.0), Some(Size::fixed(150.0, 80.0)));
	}

	#[test]
	fn drag_resize_grows_from_natural_size_and_respects_minimum() {
		assert_eq!(drag_resize(Size::fixed(400.0, 300.0), 25.0, -10.0), Size::fixed(425.0, 290.0));
		assert_eq!(drag_resize(Size::default(), 10.0, 0.0), Size::fixed(260.0, 60.0));
		assert_eq!(drag_resize(Size::fixed(120.0, 60.0), -500.0, -500.0), Size::fixed(100.0, 50.0));
	}
}
