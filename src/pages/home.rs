use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;
use log::error;

use crate::canvas::{convert_document, load_canvas};
use crate::components::canvas_view::{CanvasView, GraphData};
use crate::config::ViewerConfig;

#[derive(Clone, Debug)]
enum LoadState {
	Loading,
	Failed(String),
	Ready(GraphData),
}

/// Loads the canvas named by `?canvas=` (or the default) and shows it.
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let config = use_context::<ViewerConfig>()
		.unwrap_or_default()
		.with_canvas_path(query.with_untracked(|q| q.get("canvas")));
	let canvas_path = config.canvas_path.clone();
	provide_context(config);

	let load = RwSignal::new(LoadState::Loading);
	spawn_local(async move {
		let next = match load_canvas(&canvas_path).await {
			Ok(doc) => LoadState::Ready(convert_document(&doc)),
			Err(err) => {
				error!("Failed to load canvas data: {err}");
				LoadState::Failed(err.to_string())
			}
		};
		let _ = load.try_set(next);
	});

	view! {
		<div class="fullscreen-graph">
			{move || match load.get() {
				LoadState::Loading => view! { <div class="loading">"Loading..."</div> }.into_any(),
				LoadState::Failed(reason) => {
					view! {
						<div class="error-message">
							<p>"Failed to load canvas file. Please check the file path and content."</p>
							<p class="error-detail">{reason}</p>
						</div>
					}
						.into_any()
				}
				LoadState::Ready(graph) => view! { <CanvasView graph=graph /> }.into_any(),
			}}
		</div>
	}
}
