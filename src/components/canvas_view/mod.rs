mod component;
mod controls;
mod geometry;
mod nodes;
mod render;
mod state;
mod types;

pub use component::CanvasView;
pub use geometry::{EdgeGeometry, LabelMetrics, LabelSize, Rect, Side};
pub use state::{GraphAction, ViewState, ViewTransform};
pub use types::{
	EdgeKind, GraphData, NodeKind, NodePayload, Position, RenderStyle, Size, VisualEdge,
	VisualNode,
};
