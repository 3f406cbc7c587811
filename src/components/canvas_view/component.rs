use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;
use web_sys::{MouseEvent, WheelEvent};

use super::controls::{Controls, MiniMap};
use super::geometry::{anchor, drag_resize, footprint};
use super::nodes::NodeView;
use super::render::EdgeLayer;
use super::state::{GraphAction, Interaction, ViewState};
use super::types::{GraphData, Position};
use crate::config::ViewerConfig;

/// Run one action through the reducer.
pub fn dispatch(state: RwSignal<ViewState>, action: GraphAction) {
	state.update(|s| *s = std::mem::take(s).apply(action));
}

/// Interactive diagram of a converted canvas.
#[component]
pub fn CanvasView(graph: GraphData) -> impl IntoView {
	let config = use_context::<ViewerConfig>().unwrap_or_default();
	let container_ref = NodeRef::<Div>::new();
	let state = RwSignal::new(ViewState::new(graph, &config));
	let viewport = RwSignal::new((800.0, 600.0));
	let interaction = StoredValue::new(Interaction::Idle);
	let preview = RwSignal::new(None::<(Position, Position)>);

	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		let (width, height) = (
			container.client_width() as f64,
			container.client_height() as f64,
		);
		viewport.set((width, height));
		dispatch(state, GraphAction::FitView { width, height });
	});

	let resize = window_event_listener(ev::resize, move |_| {
		if let Some(container) = container_ref.get_untracked() {
			viewport.set((
				container.client_width() as f64,
				container.client_height() as f64,
			));
		}
	});
	on_cleanup(move || resize.remove());

	let local = move |ev: &MouseEvent| -> Option<Position> {
		let container = container_ref.get_untracked()?;
		let rect = container.get_bounding_client_rect();
		Some(Position::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some(p) = local(&ev) else {
			return;
		};
		let next = state.with_untracked(|s| {
			if let Some((node, side)) = s.handle_at_position(p.x, p.y) {
				Interaction::Connecting {
					source: node.id.clone(),
					side,
				}
			} else if let Some(node) = s.resize_grip_at_position(p.x, p.y) {
				Interaction::Resizing {
					id: node.id.clone(),
					start: p,
					origin_size: node.size,
				}
			} else if let Some(node) = s.node_at_position(p.x, p.y) {
				Interaction::Dragging {
					id: node.id.clone(),
					start: p,
					origin: node.position,
				}
			} else {
				Interaction::Panning { last: p }
			}
		});
		interaction.set_value(next);
	};

	let on_mousemove = move |ev: MouseEvent| {
		let Some(p) = local(&ev) else {
			return;
		};
		match interaction.get_value() {
			Interaction::Idle => {}
			Interaction::Dragging { id, start, origin } => {
				let k = state.with_untracked(|s| s.transform.k);
				let position = Position::new(
					origin.x + (p.x - start.x) / k,
					origin.y + (p.y - start.y) / k,
				);
				dispatch(state, GraphAction::MoveNode { id, position });
			}
			Interaction::Resizing {
				id,
				start,
				origin_size,
			} => {
				let k = state.with_untracked(|s| s.transform.k);
				let size = drag_resize(origin_size, (p.x - start.x) / k, (p.y - start.y) / k);
				dispatch(state, GraphAction::ResizeNode { id, size });
			}
			Interaction::Panning { last } => {
				dispatch(
					state,
					GraphAction::Pan {
						dx: p.x - last.x,
						dy: p.y - last.y,
					},
				);
				interaction.set_value(Interaction::Panning { last: p });
			}
			Interaction::Connecting { source, side } => {
				let line = state.with_untracked(|s| -> Option<(Position, Position)> {
					let from = anchor(footprint(s.graph.node(&source)?), side);
					Some((from, s.screen_to_graph(p.x, p.y)))
				});
				preview.set(line);
			}
		}
	};

	let on_mouseup = move |ev: MouseEvent| {
		if let Interaction::Connecting { source, side } = interaction.get_value() {
			let target = local(&ev).and_then(|p| {
				state.with_untracked(|s| {
					s.handle_at_position(p.x, p.y)
						.map(|(node, side)| (node.id.clone(), Some(side)))
						.or_else(|| s.node_at_position(p.x, p.y).map(|node| (node.id.clone(), None)))
				})
			});
			if let Some((target, target_side)) = target {
				dispatch(
					state,
					GraphAction::Connect {
						source,
						target,
						source_handle: Some(side.as_str().to_string()),
						target_handle: target_side.map(|s| s.as_str().to_string()),
					},
				);
			}
		}
		interaction.set_value(Interaction::Idle);
		preview.set(None);
	};

	let on_mouseleave = move |_: MouseEvent| {
		interaction.set_value(Interaction::Idle);
		preview.set(None);
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(p) = local(&ev) else {
			return;
		};
		let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
		dispatch(
			state,
			GraphAction::Zoom {
				factor,
				anchor_x: p.x,
				anchor_y: p.y,
			},
		);
	};

	let node_ids = move || {
		state.with(|s| s.graph.nodes.iter().map(|n| n.id.clone()).collect::<Vec<_>>())
	};
	let layer_style = move || {
		format!(
			"position: absolute; left: 0; top: 0; transform-origin: 0 0; transform: {};",
			state.with(|s| s.transform.to_css())
		)
	};

	view! {
		<div
			node_ref=container_ref
			class="canvas-view"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="position: relative; width: 100%; height: 100%; overflow: hidden; cursor: grab; user-select: none;"
		>
			<div class="canvas-layer" style=layer_style>
				<EdgeLayer state=state preview=preview label_size=config.label_size />
				<For
					each=node_ids
					key=|id| id.clone()
					children=move |id: String| view! { <NodeView id=id state=state /> }
				/>
			</div>
			<Controls state=state viewport=viewport />
			<MiniMap state=state viewport=viewport />
		</div>
	}
}
