use leptos::prelude::*;
use web_sys::MouseEvent;

use super::component::dispatch;
use super::geometry::footprint;
use super::state::{GraphAction, ViewState};
use super::types::NodeKind;

const ZOOM_STEP: f64 = 1.2;
const MINIMAP_SIZE: (f64, f64) = (200.0, 150.0);

/// Zoom in, zoom out and fit buttons.
#[component]
pub fn Controls(state: RwSignal<ViewState>, viewport: RwSignal<(f64, f64)>) -> impl IntoView {
	let zoom = move |factor: f64| {
		let (width, height) = viewport.get_untracked();
		dispatch(
			state,
			GraphAction::Zoom {
				factor,
				anchor_x: width / 2.0,
				anchor_y: height / 2.0,
			},
		);
	};
	let fit = move |_: MouseEvent| {
		let (width, height) = viewport.get_untracked();
		dispatch(state, GraphAction::FitView { width, height });
	};

	view! {
		<div
			class="canvas-controls"
			style="position: absolute; left: 12px; bottom: 12px; z-index: 10; display: flex; flex-direction: column; gap: 4px;"
			on:mousedown=|ev: MouseEvent| ev.stop_propagation()
		>
			<button title="Zoom in" on:click=move |_| zoom(ZOOM_STEP)>"+"</button>
			<button title="Zoom out" on:click=move |_| zoom(1.0 / ZOOM_STEP)>"-"</button>
			<button title="Fit view" on:click=fit>"[ ]"</button>
		</div>
	}
}

/// Overview of every node with the visible region outlined.
#[component]
pub fn MiniMap(state: RwSignal<ViewState>, viewport: RwSignal<(f64, f64)>) -> impl IntoView {
	let view_box = move || {
		let (width, height) = viewport.get();
		let r = state.with(|s| s.minimap_rect(width, height));
		format!("{} {} {} {}", r.x, r.y, r.width, r.height)
	};
	let nodes = move || {
		state.with(|s| {
			s.graph
				.nodes
				.iter()
				.map(|node| {
					let r = footprint(node);
					let fill = if node.kind() == NodeKind::Group {
						"rgba(200, 200, 200, 0.3)"
					} else {
						"#94a3b8"
					};
					view! { <rect x=r.x y=r.y width=r.width height=r.height fill=fill /> }
				})
				.collect_view()
		})
	};
	let frame = move || {
		let (width, height) = viewport.get();
		let r = state.with(|s| s.viewport_rect(width, height));
		view! {
			<rect
				x=r.x
				y=r.y
				width=r.width
				height=r.height
				fill="none"
				stroke="#6366f1"
				stroke-width="2"
				vector-effect="non-scaling-stroke"
			/>
		}
	};

	view! {
		<svg
			class="canvas-minimap"
			width=MINIMAP_SIZE.0
			height=MINIMAP_SIZE.1
			viewBox=view_box
			preserveAspectRatio="xMidYMid meet"
			style="position: absolute; right: 12px; bottom: 12px; z-index: 10; background: rgba(255, 255, 255, 0.9); border: 1px solid #e2e8f0; border-radius: 4px;"
			on:mousedown=|ev: MouseEvent| ev.stop_propagation()
		>
			{nodes}
			{frame}
		</svg>
	}
}
