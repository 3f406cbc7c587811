use leptos::prelude::*;

use super::geometry::{LabelSize, label_box};
use super::state::ViewState;
use super::types::{EdgeKind, Position};

const EDGE_COLOR: &str = "#6366f1";

/// SVG layer holding every edge plus the in-progress connection line.
#[component]
pub fn EdgeLayer(
	state: RwSignal<ViewState>,
	preview: RwSignal<Option<(Position, Position)>>,
	label_size: LabelSize,
) -> impl IntoView {
	let ids = move || {
		state.with(|s| s.graph.edges.iter().map(|e| e.id.clone()).collect::<Vec<_>>())
	};

	view! {
		<svg
			class="edge-layer"
			width="1"
			height="1"
			style="position: absolute; left: 0; top: 0; overflow: visible; z-index: 1; pointer-events: none;"
		>
			<defs>
				<marker
					id="edge-arrow"
					viewBox="0 0 10 10"
					refX="10"
					refY="5"
					markerWidth="6"
					markerHeight="6"
					orient="auto-start-reverse"
				>
					<path d="M0,0 L10,5 L0,10 z" fill=EDGE_COLOR />
				</marker>
			</defs>
			<For
				each=ids
				key=|id| id.clone()
				children=move |id: String| {
					view! { <EdgePath id=id state=state label_size=label_size /> }
				}
			/>
			{move || {
				preview
					.get()
					.map(|(from, to)| {
						view! {
							<line
								x1=from.x
								y1=from.y
								x2=to.x
								y2=to.y
								stroke=EDGE_COLOR
								stroke-width="2"
								stroke-dasharray="6 4"
							/>
						}
					})
			}}
		</svg>
	}
}

/// The custom edge renderer: bezier path with an optional floating label.
#[component]
fn EdgePath(id: String, state: RwSignal<ViewState>, label_size: LabelSize) -> impl IntoView {
	let label = state
		.with_untracked(|s| s.graph.edge(&id).map(|e| e.label.clone()))
		.unwrap_or_default();
	let font_size = label_size.metrics().font_size;
	let geometry = Memo::new(move |_| state.with(|s| s.edge_geometry(&id)));

	move || {
		geometry.get().map(|geo| {
			let label_view = (!label.is_empty()).then(|| {
				let rect = label_box(&label, geo.label, label_size);
				view! {
					<g class="edge-label">
						<rect
							x=rect.x
							y=rect.y
							width=rect.width
							height=rect.height
							rx="6"
							fill="rgba(0, 0, 0, 0.7)"
						/>
						<text
							x=geo.label.x
							y=geo.label.y
							text-anchor="middle"
							dominant-baseline="central"
							font-size=font_size
							font-weight="700"
							fill="white"
						>
							{label.clone()}
						</text>
					</g>
				}
			});
			view! {
				<g class=format!("canvas-edge canvas-edge-{}", EdgeKind::Custom.as_str())>
					<path
						d=geo.path.clone()
						fill="none"
						stroke=EDGE_COLOR
						stroke-width="2"
						marker-end="url(#edge-arrow)"
					/>
					{label_view}
				</g>
			}
		})
	}
}
