//! Canvas document to visual graph conversion.

use std::collections::HashSet;

use log::debug;

use super::content::{ContentKind, classify, file_name, normalize_path};
use super::defaults::{self, EDGE_ID_PREFIX, IMAGE_LABEL, MARKDOWN_LABEL};
use super::document::{CanvasDocument, CanvasEdge, CanvasNode, CanvasNodeType, non_empty};
use crate::components::canvas_view::{
	EdgeKind, GraphData, NodePayload, Position, Size, VisualEdge, VisualNode,
};

const EDGE_TOKEN_LEN: usize = 8;

/// Map one canvas node onto a visual node. Never fails.
pub fn convert_node(node: &CanvasNode) -> VisualNode {
	let label = non_empty(&node.label);
	let color = non_empty(&node.color);
	let position = Position::new(node.x, node.y);
	let natural = Size {
		width: node.width,
		height: node.height,
	};
	let placeholder = || defaults::placeholder_label(node.node_type.as_str());

	let (payload, size, style) = match (&node.node_type, non_empty(&node.file)) {
		(CanvasNodeType::File, Some(raw)) => {
			let path = normalize_path(raw);
			match classify(raw) {
				ContentKind::Markdown => {
					debug!("node {} is markdown at {path}", node.id);
					let payload = NodePayload::Markdown {
						file: path.to_string(),
						label: derived_label(label, path, MARKDOWN_LABEL),
					};
					let size = defaults::markdown_size(node.width, node.height);
					(payload, size, defaults::card_style(color))
				}
				ContentKind::Image => {
					let payload = NodePayload::Image {
						src: path.to_string(),
						label: derived_label(label, path, IMAGE_LABEL),
					};
					(payload, natural, defaults::image_style())
				}
				ContentKind::Other => {
					let payload = NodePayload::Default {
						label: label.map_or_else(placeholder, str::to_string),
						text: None,
						file: Some(raw.to_string()),
					};
					(payload, natural, defaults::card_style(color))
				}
			}
		}
		(CanvasNodeType::Group, _) => {
			let payload = NodePayload::Group {
				label: label.map_or_else(placeholder, str::to_string),
			};
			(payload, natural, defaults::group_style(color))
		}
		_ => {
			let payload = NodePayload::Default {
				label: label.map_or_else(placeholder, str::to_string),
				text: non_empty(&node.text).map(str::to_string),
				file: None,
			};
			(payload, natural, defaults::card_style(color))
		}
	};

	VisualNode {
		id: node.id.clone(),
		position,
		size,
		payload,
		style,
	}
}

fn derived_label(label: Option<&str>, path: &str, fallback: &str) -> String {
	label.or_else(|| file_name(path)).unwrap_or(fallback).to_string()
}

/// Map one canvas edge onto a visual edge. Never fails.
///
/// A missing id is replaced by [`synthesize_edge_id`]; duplicates are only
/// resolved at document level by [`convert_document`].
pub fn convert_edge(edge: &CanvasEdge) -> VisualEdge {
	let source_handle = edge.from_side.as_deref().map(str::to_lowercase);
	let target_handle = edge.to_side.as_deref().map(str::to_lowercase);
	let id = match &edge.id {
		Some(id) => id.clone(),
		None => synthesize_edge_id(
			&edge.from_node,
			&edge.to_node,
			source_handle.as_deref(),
			target_handle.as_deref(),
		),
	};

	VisualEdge {
		id,
		source: edge.from_node.clone(),
		target: edge.to_node.clone(),
		source_handle,
		target_handle,
		label: non_empty(&edge.label).unwrap_or_default().to_string(),
		kind: EdgeKind::Custom,
	}
}

/// Stable id for an edge that has none, derived from its endpoints.
///
/// Same endpoints and handles always give the same id, across reloads too.
pub fn synthesize_edge_id(
	source: &str,
	target: &str,
	source_handle: Option<&str>,
	target_handle: Option<&str>,
) -> String {
	let mut hash = Fnv1a::default();
	for part in [
		source,
		target,
		source_handle.unwrap_or_default(),
		target_handle.unwrap_or_default(),
	] {
		hash.write(part.as_bytes());
		hash.write(&[0x1f]);
	}
	format!("{EDGE_ID_PREFIX}{}", base36(hash.0, EDGE_TOKEN_LEN))
}

/// Return `base`, or `base-2`, `base-3`, ... if already taken, and mark the
/// result as taken.
pub(crate) fn unique_id(base: String, taken: &mut HashSet<String>) -> String {
	if taken.insert(base.clone()) {
		return base;
	}
	let mut n = 2;
	loop {
		let candidate = format!("{base}-{n}");
		if taken.insert(candidate.clone()) {
			return candidate;
		}
		n += 1;
	}
}

struct Fnv1a(u64);

impl Default for Fnv1a {
	fn default() -> Self {
		Self(0xcbf2_9ce4_8422_2325)
	}
}

impl Fnv1a {
	fn write(&mut self, bytes: &[u8]) {
		for &b in bytes {
			self.0 ^= u64::from(b);
			self.0 = self.0.wrapping_mul(0x0100_0000_01b3);
		}
	}
}

fn base36(mut value: u64, len: usize) -> String {
	const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
	let mut out = vec![b'0'; len];
	for slot in out.iter_mut().rev() {
		*slot = DIGITS[(value % 36) as usize];
		value /= 36;
	}
	String::from_utf8_lossy(&out).into_owned()
}

/// Convert a whole document, preserving node and edge order.
///
/// A document without nodes yields an empty graph, even if it has edges.
pub fn convert_document(doc: &CanvasDocument) -> GraphData {
	if doc.nodes.is_empty() {
		return GraphData::default();
	}

	let nodes: Vec<VisualNode> = doc.nodes.iter().map(convert_node).collect();

	let mut taken: HashSet<String> = doc
		.edges
		.iter()
		.filter_map(|edge| edge.id.as_deref())
		.map(str::to_string)
		.collect();
	let edges: Vec<VisualEdge> = doc
		.edges
		.iter()
		.map(|edge| {
			let mut visual = convert_edge(edge);
			if edge.id.is_none() {
				visual.id = unique_id(visual.id, &mut taken);
			}
			visual
		})
		.collect();

	debug!("converted {} nodes and {} edges", nodes.len(), edges.len());
	GraphData { nodes, edges }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::canvas_view::NodeKind;

	fn file_node(id: &str, file: &str) -> CanvasNode {
		CanvasNode {
			id: id.into(),
			node_type: CanvasNodeType::File,
			file: Some(file.into()),
			..Default::default()
		}
	}

	#[test]
	fn markdown_label_falls_back_to_file_name() {
		let node = convert_node(&file_node("a", "/public/notes/plan.MD"));
		assert_eq!(node.kind(), NodeKind::Markdown);
		assert_eq!(
			node.payload,
			NodePayload::Markdown {
				file: "notes/plan.MD".into(),
				label: "plan.MD".into(),
			}
		);
		assert_eq!(node.size, Size::fixed(400.0, 300.0));
	}

	#[test]
	fn markdown_keeps_explicit_size() {
		let mut canvas = file_node("a", "a.md");
		canvas.width = Some(250.0);
		canvas.height = Some(80.0);
		assert_eq!(convert_node(&canvas).size, Size::fixed(250.0, 80.0));
	}

	#[test]
	fn image_keeps_natural_size_and_bare_style() {
		let node = convert_node(&file_node("i", "pics/cat.webp"));
		assert_eq!(node.kind(), NodeKind::Image);
		assert_eq!(node.size, Size::default());
		assert_eq!(node.style.padding, 0.0);
		assert_eq!(node.style.background, "transparent");
	}

	#[test]
	fn other_file_keeps_raw_path() {
		let node = convert_node(&file_node("z", "/public/data/report.pdf"));
		assert_eq!(
			node.payload,
			NodePayload::Default {
				label: "Node file".into(),
				text: None,
				file: Some("/public/data/report.pdf".into()),
			}
		);
	}

	#[test]
	fn file_node_without_path_is_default() {
		let canvas = CanvasNode {
			id: "f".into(),
			node_type: CanvasNodeType::File,
			..Default::default()
		};
		let node = convert_node(&canvas);
		assert_eq!(node.kind(), NodeKind::Default);
		assert_eq!(node.payload.label(), "Node file");
	}

	#[test]
	fn group_uses_color_tint() {
		let canvas = CanvasNode {
			id: "g".into(),
			node_type: CanvasNodeType::Group,
			color: Some("#336699".into()),
			..Default::default()
		};
		let node = convert_node(&canvas);
		assert_eq!(node.kind(), NodeKind::Group);
		assert_eq!(node.payload.label(), "Node group");
		assert_eq!(node.style.background, "#33669920");
		assert_eq!(node.style.border, "2px solid #336699");
	}

	#[test]
	fn text_node_carries_inline_text() {
		let canvas = CanvasNode {
			id: "t".into(),
			node_type: CanvasNodeType::Text,
			text: Some("# Hi".into()),
			..Default::default()
		};
		assert_eq!(
			convert_node(&canvas).payload,
			NodePayload::Default {
				label: "Node text".into(),
				text: Some("# Hi".into()),
				file: None,
			}
		);
	}

	#[test]
	fn unknown_type_becomes_default_with_type_in_label() {
		let canvas = CanvasNode {
			id: "l".into(),
			node_type: CanvasNodeType::Other("link".into()),
			..Default::default()
		};
		let node = convert_node(&canvas);
		assert_eq!(node.kind(), NodeKind::Default);
		assert_eq!(node.payload.label(), "Node link");
	}

	#[test]
	fn position_is_copied_verbatim() {
		let mut canvas = file_node("p", "x.png");
		canvas.x = -1234.5;
		canvas.y = 9e6;
		assert_eq!(convert_node(&canvas).position, Position::new(-1234.5, 9e6));
	}

	#[test]
	fn sides_are_lowercased() {
		for side in ["Top", "TOP", "top"] {
			let edge = CanvasEdge {
				id: Some("e".into()),
				from_side: Some(side.into()),
				..Default::default()
			};
			assert_eq!(convert_edge(&edge).source_handle.as_deref(), Some("top"));
		}
	}

	#[test]
	fn missing_label_is_empty_string() {
		let edge = convert_edge(&CanvasEdge {
			id: Some("e".into()),
			from_node: "a".into(),
			to_node: "b".into(),
			..Default::default()
		});
		assert_eq!(edge.label, "");
		assert_eq!(edge.source_handle, None);
		assert_eq!(edge.kind, EdgeKind::Custom);
	}

	#[test]
	fn explicit_empty_id_is_copied() {
		let edge = CanvasEdge {
			id: Some(String::new()),
			from_node: "a".into(),
			to_node: "b".into(),
			..Default::default()
		};
		assert_eq!(convert_edge(&edge).id, "");
		let doc = CanvasDocument {
			nodes: vec![CanvasNode::default()],
			edges: vec![edge],
		};
		assert_eq!(convert_document(&doc).edges[0].id, "");
	}

	#[test]
	fn synthesized_id_is_stable_and_prefixed() {
		let a = synthesize_edge_id("a", "b", Some("right"), None);
		let b = synthesize_edge_id("a", "b", Some("right"), None);
		assert_eq!(a, b);
		assert!(a.starts_with("edge-"));
		assert_eq!(a.len(), "edge-".len() + EDGE_TOKEN_LEN);
		assert!(a["edge-".len()..].bytes().all(|c| c.is_ascii_alphanumeric()));
		assert_ne!(a, synthesize_edge_id("b", "a", Some("right"), None));
	}

	#[test]
	fn colliding_synthesized_ids_are_suffixed() {
		let edge = CanvasEdge {
			from_node: "a".into(),
			to_node: "b".into(),
			..Default::default()
		};
		let doc = CanvasDocument {
			nodes: vec![file_node("a", "a.md")],
			edges: vec![edge.clone(), edge],
		};
		let graph = convert_document(&doc);
		assert_eq!(graph.edges[1].id, format!("{}-2", graph.edges[0].id));
	}

	#[test]
	fn explicit_ids_are_never_renamed() {
		let doc = CanvasDocument {
			nodes: vec![file_node("a", "a.md")],
			edges: vec![
				CanvasEdge {
					id: Some("dup".into()),
					..Default::default()
				},
				CanvasEdge {
					id: Some("dup".into()),
					..Default::default()
				},
			],
		};
		let graph = convert_document(&doc);
		assert_eq!(graph.edges[0].id, "dup");
		assert_eq!(graph.edges[1].id, "dup");
	}

	#[test]
	fn unique_id_counts_up() {
		let mut taken = HashSet::from(["x".to_string(), "x-2".to_string()]);
		assert_eq!(unique_id("x".into(), &mut taken), "x-3");
		assert_eq!(unique_id("y".into(), &mut taken), "y");
	}
}
