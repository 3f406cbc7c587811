use std::collections::HashSet;

use log::debug;

use super::geometry::{self, EdgeGeometry, Rect, Side, anchor, bezier, footprint};
use super::types::{EdgeKind, GraphData, NodeKind, Position, Size, VisualEdge, VisualNode};
use crate::canvas::{synthesize_edge_id, unique_id};
use crate::config::ViewerConfig;

/// Handle hit radius in screen pixels.
pub const HANDLE_HIT_RADIUS: f64 = 8.0;

/// Pan and zoom applied to the graph layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal screen offset of the graph origin.
	pub x: f64,
	/// Vertical screen offset of the graph origin.
	pub y: f64,
	/// Zoom factor.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

impl ViewTransform {
	/// Screen pixel to graph coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Position {
		Position::new((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// CSS transform for the graph layer.
	pub fn to_css(&self) -> String {
		format!("translate({}px, {}px) scale({})", self.x, self.y, self.k)
	}
}

/// Every change the rendering surface can make to its view state.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphAction {
	/// Put a node's top-left corner at `position`.
	MoveNode {
		/// Node id.
		id: String,
		/// New position in graph coordinates.
		position: Position,
	},
	/// Replace a node's size.
	ResizeNode {
		/// Node id.
		id: String,
		/// New size.
		size: Size,
	},
	/// Add an edge drawn by the user.
	Connect {
		/// Source node id.
		source: String,
		/// Target node id.
		target: String,
		/// Side of the source node.
		source_handle: Option<String>,
		/// Side of the target node.
		target_handle: Option<String>,
	},
	/// Shift the view by a screen-space delta.
	Pan {
		/// Horizontal delta.
		dx: f64,
		/// Vertical delta.
		dy: f64,
	},
	/// Multiply the zoom, keeping the screen point under the anchor fixed.
	Zoom {
		/// Zoom multiplier.
		factor: f64,
		/// Anchor x in screen pixels.
		anchor_x: f64,
		/// Anchor y in screen pixels.
		anchor_y: f64,
	},
	/// Fit every node into a viewport of this size.
	FitView {
		/// Viewport width in pixels.
		width: f64,
		/// Viewport height in pixels.
		height: f64,
	},
}

/// Graph plus viewport, owned by the rendering surface.
///
/// Only [`ViewState::apply`] changes it.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
	/// Current nodes and edges.
	pub graph: GraphData,
	/// Current pan and zoom.
	pub transform: ViewTransform,
	min_zoom: f64,
	max_zoom: f64,
	fit_padding: f64,
}

impl Default for ViewState {
	fn default() -> Self {
		Self::new(GraphData::default(), &ViewerConfig::default())
	}
}

impl ViewState {
	/// Wrap converted graph data with an identity transform.
	pub fn new(graph: GraphData, config: &ViewerConfig) -> Self {
		Self {
			graph,
			transform: ViewTransform::default(),
			min_zoom: config.min_zoom,
			max_zoom: config.max_zoom,
			fit_padding: config.fit_padding,
		}
	}

	/// Apply one action and return the next state.
	pub fn apply(mut self, action: GraphAction) -> Self {
		match action {
			GraphAction::MoveNode { id, position } => {
				if let Some(node) = self.node_mut(&id) {
					node.position = position;
				}
			}
			GraphAction::ResizeNode { id, size } => {
				if let Some(node) = self.node_mut(&id) {
					node.size = size;
				}
			}
			GraphAction::Connect {
				source,
				target,
				source_handle,
				target_handle,
			} => self.connect(source, target, source_handle, target_handle),
			GraphAction::Pan { dx, dy } => {
				self.transform.x += dx;
				self.transform.y += dy;
			}
			GraphAction::Zoom {
				factor,
				anchor_x,
				anchor_y,
			} => {
				let t = &mut self.transform;
				let new_k = (t.k * factor).clamp(self.min_zoom, self.max_zoom);
				let ratio = new_k / t.k;
				t.x = anchor_x - (anchor_x - t.x) * ratio;
				t.y = anchor_y - (anchor_y - t.y) * ratio;
				t.k = new_k;
			}
			GraphAction::FitView { width, height } => self.fit(width, height),
		}
		self
	}

	fn node_mut(&mut self, id: &str) -> Option<&mut VisualNode> {
		self.graph.nodes.iter_mut().find(|node| node.id == id)
	}

	fn connect(
		&mut self,
		source: String,
		target: String,
		source_handle: Option<String>,
		target_handle: Option<String>,
	) {
		if source == target || self.graph.node(&source).is_none() || self.graph.node(&target).is_none() {
			debug!("ignoring connection {source} -> {target}");
			return;
		}
		let mut taken: HashSet<String> = self.graph.edges.iter().map(|e| e.id.clone()).collect();
		let base = synthesize_edge_id(
			&source,
			&target,
			source_handle.as_deref(),
			target_handle.as_deref(),
		);
		let id = unique_id(base, &mut taken);
		debug!("connected {source} -> {target} as {id}");
		self.graph.edges.push(VisualEdge {
			id,
			source,
			target,
			source_handle,
			target_handle,
			label: String::new(),
			kind: EdgeKind::Custom,
		});
	}

	// never zooms in past 1:1
	fn fit(&mut self, width: f64, height: f64) {
		let Some(rect) = geometry::bounds(&self.graph.nodes) else {
			self.transform = ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			};
			return;
		};
		let avail_w = (width - 2.0 * self.fit_padding).max(1.0);
		let avail_h = (height - 2.0 * self.fit_padding).max(1.0);
		let k = (avail_w / rect.width.max(1.0))
			.min(avail_h / rect.height.max(1.0))
			.clamp(self.min_zoom, self.max_zoom.min(1.0).max(self.min_zoom));
		let c = rect.center();
		self.transform = ViewTransform {
			x: width / 2.0 - c.x * k,
			y: height / 2.0 - c.y * k,
			k,
		};
	}

	/// Screen pixel to graph coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Position {
		self.transform.screen_to_graph(sx, sy)
	}

	/// Topmost node under a screen point. Groups only win when no other node
	/// is hit.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<&VisualNode> {
		let p = self.screen_to_graph(sx, sy);
		let mut group = None;
		for node in self.graph.nodes.iter().rev() {
			if !footprint(node).contains(p) {
				continue;
			}
			if node.kind() != NodeKind::Group {
				return Some(node);
			}
			group.get_or_insert(node);
		}
		group
	}

	/// Handle dot under a screen point.
	pub fn handle_at_position(&self, sx: f64, sy: f64) -> Option<(&VisualNode, Side)> {
		let p = self.screen_to_graph(sx, sy);
		let radius = HANDLE_HIT_RADIUS / self.transform.k;
		self.graph.nodes.iter().rev().find_map(|node| {
			let rect = footprint(node);
			Side::ALL.into_iter().find_map(|side| {
				let a = anchor(rect, side);
				let (dx, dy) = (a.x - p.x, a.y - p.y);
				((dx * dx + dy * dy).sqrt() <= radius).then_some((node, side))
			})
		})
	}

	/// Node whose bottom-right resize grip is under a screen point.
	pub fn resize_grip_at_position(&self, sx: f64, sy: f64) -> Option<&VisualNode> {
		let p = self.screen_to_graph(sx, sy);
		let radius = HANDLE_HIT_RADIUS / self.transform.k;
		self.graph.nodes.iter().rev().find(|node| {
			let rect = footprint(node);
			(rect.right() - p.x).abs() <= radius && (rect.bottom() - p.y).abs() <= radius
		})
	}

	/// Curve of an edge, or `None` when an endpoint is missing.
	pub fn edge_geometry(&self, id: &str) -> Option<EdgeGeometry> {
		let edge = self.graph.edge(id)?;
		let source = footprint(self.graph.node(&edge.source)?);
		let target = footprint(self.graph.node(&edge.target)?);
		let source_side = edge
			.source_handle
			.as_deref()
			.and_then(Side::parse)
			.unwrap_or(Side::Bottom);
		let target_side = edge
			.target_handle
			.as_deref()
			.and_then(Side::parse)
			.unwrap_or(Side::Top);
		Some(bezier(
			anchor(source, source_side),
			source_side,
			anchor(target, target_side),
			target_side,
		))
	}

	/// Visible region of the graph for a viewport of this size.
	pub fn viewport_rect(&self, width: f64, height: f64) -> Rect {
		let origin = self.screen_to_graph(0.0, 0.0);
		Rect {
			x: origin.x,
			y: origin.y,
			width: width / self.transform.k,
			height: height / self.transform.k,
		}
	}

	/// Region shown by the minimap: every node plus the visible region.
	pub fn minimap_rect(&self, width: f64, height: f64) -> Rect {
		let visible = self.viewport_rect(width, height);
		let r = geometry::bounds(&self.graph.nodes).map_or(visible, |b| b.union(&visible));
		Rect {
			width: r.width.max(1.0),
			height: r.height.max(1.0),
			..r
		}
	}
}

/// Pointer gesture in progress.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
	/// No button held.
	#[default]
	Idle,
	/// Moving a node.
	Dragging {
		/// Node being moved.
		id: String,
		/// Screen point where the drag began.
		start: Position,
		/// Node position when the drag began.
		origin: Position,
	},
	/// Dragging a node's corner grip.
	Resizing {
		/// Node being resized.
		id: String,
		/// Screen point where the drag began.
		start: Position,
		/// Node size when the drag began.
		origin_size: Size,
	},
	/// Moving the view.
	Panning {
		/// Previous pointer position in screen pixels.
		last: Position,
	},
	/// Drawing a new edge from a handle.
	Connecting {
		/// Source node id.
		source: String,
		/// Handle the edge leaves from.
		side: Side,
	},
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::canvas::{CanvasDocument, convert_document};

	fn state() -> ViewState {
		let doc = CanvasDocument::from_json(
			r#"{
				"nodes": [
					{"id": "g", "type": "group", "x": -50, "y": -50, "width": 600, "height": 400},
					{"id": "a", "type": "text", "x": 0, "y": 0, "width": 100, "height": 50},
					{"id": "b", "type": "text", "x": 300, "y": 0, "width": 100, "height": 50}
				],
				"edges": [
					{"id": "e1", "fromNode": "a", "toNode": "b", "fromSide": "right", "toSide": "left"},
					{"id": "dangling", "fromNode": "a", "toNode": "missing"}
				]
			}"#,
		)
		.unwrap();
		ViewState::new(convert_document(&doc), &ViewerConfig::default())
	}

	#[test]
	fn move_node_updates_position_only_for_target() {
		let next = state().apply(GraphAction::MoveNode {
			id: "a".into(),
			position: Position::new(10.0, 20.0),
		});
		assert_eq!(next.graph.node("a").unwrap().position, Position::new(10.0, 20.0));
		assert_eq!(next.graph.node("b").unwrap().position, Position::new(300.0, 0.0));
	}

	#[test]
	fn resize_node_replaces_size() {
		let next = state().apply(GraphAction::ResizeNode {
			id: "b".into(),
			size: Size::fixed(10.0, 10.0),
		});
		assert_eq!(next.graph.node("b").unwrap().size, Size::fixed(10.0, 10.0));
	}

	#[test]
	fn connect_appends_unique_edge() {
		let connect = || GraphAction::Connect {
			source: "b".into(),
			target: "a".into(),
			source_handle: Some("left".into()),
			target_handle: Some("right".into()),
		};
		let next = state().apply(connect()).apply(connect());
		assert_eq!(next.graph.edges.len(), 4);
		let (first, second) = (&next.graph.edges[2], &next.graph.edges[3]);
		assert!(first.id.starts_with("edge-"));
		assert_eq!(second.id, format!("{}-2", first.id));
		assert_eq!(first.label, "");
	}

	#[test]
	fn connect_rejects_self_and_unknown_nodes() {
		let start = state();
		let next = start
			.clone()
			.apply(GraphAction::Connect {
				source: "a".into(),
				target: "a".into(),
				source_handle: None,
				target_handle: None,
			})
			.apply(GraphAction::Connect {
				source: "a".into(),
				target: "nope".into(),
				source_handle: None,
				target_handle: None,
			});
		assert_eq!(next, start);
	}

	#[test]
	fn zoom_is_clamped_and_anchored() {
		let next = state().apply(GraphAction::Zoom {
			factor: 2.0,
			anchor_x: 100.0,
			anchor_y: 100.0,
		});
		assert_eq!(next.transform, ViewTransform { x: -100.0, y: -100.0, k: 2.0 });
		// the anchor still maps to the same graph point
		assert_eq!(next.screen_to_graph(100.0, 100.0), Position::new(100.0, 100.0));

		let far = state().apply(GraphAction::Zoom {
			factor: 100.0,
			anchor_x: 0.0,
			anchor_y: 0.0,
		});
		assert_eq!(far.transform.k, 4.0);
	}

	#[test]
	fn pan_shifts_transform() {
		let next = state().apply(GraphAction::Pan { dx: 5.0, dy: -3.0 });
		assert_eq!(next.transform, ViewTransform { x: 5.0, y: -3.0, k: 1.0 });
	}

	#[test]
	fn fit_view_centres_graph() {
		let next = state().apply(GraphAction::FitView {
			width: 1000.0,
			height: 800.0,
		});
		// bounds are 600x400 around (250, 150); fits at 1:1
		assert_eq!(next.transform.k, 1.0);
		assert_eq!(next.screen_to_graph(500.0, 400.0), Position::new(250.0, 150.0));
	}

	#[test]
	fn fit_view_zooms_out_for_small_viewports() {
		let next = state().apply(GraphAction::FitView {
			width: 380.0,
			height: 280.0,
		});
		assert_eq!(next.transform.k, 0.5);
	}

	#[test]
	fn fit_view_on_empty_graph_centres_origin() {
		let next = ViewState::default().apply(GraphAction::FitView {
			width: 200.0,
			height: 100.0,
		});
		assert_eq!(next.transform, ViewTransform { x: 100.0, y: 50.0, k: 1.0 });
	}

	#[test]
	fn nodes_win_over_groups_in_hit_tests() {
		let s = state();
		assert_eq!(s.node_at_position(10.0, 10.0).map(|n| n.id.as_str()), Some("a"));
		assert_eq!(s.node_at_position(200.0, 200.0).map(|n| n.id.as_str()), Some("g"));
		assert!(s.node_at_position(-500.0, 0.0).is_none());
	}

	#[test]
	fn handles_are_hit_near_side_midpoints() {
		let s = state();
		let (node, side) = s.handle_at_position(103.0, 25.0).unwrap();
		assert_eq!((node.id.as_str(), side), ("a", Side::Right));
		assert!(s.handle_at_position(50.0, 25.0).is_none());
	}

	#[test]
	fn resize_grip_sits_on_bottom_right_corner() {
		let s = state();
		assert_eq!(s.resize_grip_at_position(98.0, 52.0).map(|n| n.id.as_str()), Some("a"));
		assert!(s.resize_grip_at_position(50.0, 50.0).is_none());
	}

	#[test]
	fn fit_view_tolerates_min_zoom_above_one() {
		let config = ViewerConfig {
			min_zoom: 2.0,
			..ViewerConfig::default()
		};
		let next = ViewState::new(state().graph, &config).apply(GraphAction::FitView {
			width: 100.0,
			height: 100.0,
		});
		assert_eq!(next.transform.k, 2.0);
	}

	#[test]
	fn edge_geometry_follows_handles() {
		let geo = state().edge_geometry("e1").unwrap();
		assert_eq!(geo.source, Position::new(100.0, 25.0));
		assert_eq!(geo.target, Position::new(300.0, 25.0));
		assert_eq!(state().edge_geometry("dangling"), None);
	}

	#[test]
	fn viewport_rect_inverts_transform() {
		let s = state().apply(GraphAction::Zoom {
			factor: 2.0,
			anchor_x: 0.0,
			anchor_y: 0.0,
		});
		assert_eq!(
			s.viewport_rect(200.0, 100.0),
			Rect { x: 0.0, y: 0.0, width: 100.0, height: 50.0 }
		);
	}

	#[test]
	fn minimap_covers_nodes_and_viewport() {
		let s = state();
		assert_eq!(
			s.minimap_rect(100.0, 100.0),
			Rect { x: -50.0, y: -50.0, width: 600.0, height: 400.0 }
		);
		assert_eq!(
			ViewState::default().minimap_rect(0.0, 0.0),
			Rect { x: 0.0, y: 0.0, width: 1.0, height: 1.0 }
		);
	}
}
