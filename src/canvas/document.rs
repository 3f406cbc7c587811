//! The on-disk canvas format.
//!
//! Parsing is deliberately permissive: unknown fields are ignored, and
//! missing or `null` fields fall back to their defaults.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// A parsed canvas file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CanvasDocument {
	/// Spatial records, in file order.
	#[serde(default, deserialize_with = "nullable_default")]
	pub nodes: Vec<CanvasNode>,
	/// Connections between nodes, in file order.
	#[serde(default, deserialize_with = "nullable_default")]
	pub edges: Vec<CanvasEdge>,
}

impl CanvasDocument {
	/// Parse a document from JSON text.
	pub fn from_json(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}
}

/// Treat an explicit `null` like a missing field.
fn nullable_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de> + Default,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The `type` field of a canvas node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<String>")]
pub enum CanvasNodeType {
	/// Container drawn behind other nodes.
	Group,
	/// Inline text block. Assumed when `type` is missing.
	#[default]
	Text,
	/// Reference to a file under the content root.
	File,
	/// Any other type string, kept verbatim.
	Other(String),
}

impl CanvasNodeType {
	/// The type string as written in the file.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Group => "group",
			Self::Text => "text",
			Self::File => "file",
			Self::Other(other) => other,
		}
	}
}

impl From<String> for CanvasNodeType {
	fn from(value: String) -> Self {
		match value.as_str() {
			"group" => Self::Group,
			"text" => Self::Text,
			"file" => Self::File,
			_ => Self::Other(value),
		}
	}
}

impl From<Option<String>> for CanvasNodeType {
	fn from(value: Option<String>) -> Self {
		value.map(Self::from).unwrap_or_default()
	}
}

impl fmt::Display for CanvasNodeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One node record in file coordinates.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasNode {
	/// Identifier referenced by edges.
	#[serde(deserialize_with = "nullable_default")]
	pub id: String,
	/// Record type.
	#[serde(rename = "type")]
	pub node_type: CanvasNodeType,
	/// Left edge in file coordinates.
	#[serde(deserialize_with = "nullable_default")]
	pub x: f64,
	/// Top edge in file coordinates.
	#[serde(deserialize_with = "nullable_default")]
	pub y: f64,
	/// Width, when the file gives one.
	pub width: Option<f64>,
	/// Height, when the file gives one.
	pub height: Option<f64>,
	/// Hex colour or palette token `"1"`..`"6"`.
	pub color: Option<String>,
	/// Display name.
	pub label: Option<String>,
	/// Inline content of `text` nodes.
	pub text: Option<String>,
	/// Path of `file` nodes.
	pub file: Option<String>,
}

/// One edge record.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasEdge {
	/// Identifier; synthesized during conversion when absent.
	pub id: Option<String>,
	/// Source node id. Not checked against the node list.
	#[serde(deserialize_with = "nullable_default")]
	pub from_node: String,
	/// Target node id. Not checked against the node list.
	#[serde(deserialize_with = "nullable_default")]
	pub to_node: String,
	/// Side of the source node, any case.
	pub from_side: Option<String>,
	/// Side of the target node, any case.
	pub to_side: Option<String>,
	/// Text drawn at the middle of the edge.
	pub label: Option<String>,
}

/// `Some` only for present, non-empty strings.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|s| !s.is_empty())
}
