//! Canvas file format, loading and conversion into a visual graph.

mod content;
mod convert;
mod defaults;
mod document;
mod loader;

pub use content::{ContentKind, classify, extension, file_name, normalize_path};
pub use convert::{convert_document, convert_edge, convert_node, synthesize_edge_id};
pub(crate) use convert::unique_id;
pub use document::{CanvasDocument, CanvasEdge, CanvasNode, CanvasNodeType};
pub use loader::{
	LoadError, check_response, content_url, load_canvas, load_text, parse_canvas_response,
};
