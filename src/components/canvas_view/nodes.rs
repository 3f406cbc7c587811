//! Node widgets, one per [`NodeKind`].

use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use pulldown_cmark::{Event, Options, Parser, html};

use super::component::dispatch;
use super::geometry::{Side, auto_size, footprint};
use super::state::{GraphAction, ViewState};
use super::types::{NodeKind, NodePayload, Size, VisualNode};
use crate::canvas::{content_url, load_text};
use crate::config::ViewerConfig;

/// Positioned box for one node, with its kind's renderer inside.
#[component]
pub fn NodeView(id: String, state: RwSignal<ViewState>) -> impl IntoView {
	let Some(initial) = state.with_untracked(|s| s.graph.node(&id).cloned()) else {
		return ().into_any();
	};
	let kind = initial.kind();
	let box_style = {
		let id = id.clone();
		move || {
			state.with(|s| s.graph.node(&id).map(box_css).unwrap_or_default())
		}
	};
	let handles = Side::ALL
		.into_iter()
		.map(|side| {
			view! {
				<div
					class=format!("canvas-handle canvas-handle-{}", side.as_str())
					style=handle_css(side)
				/>
			}
		})
		.collect_view();

	view! {
		<div class=format!("canvas-node canvas-node-{}", kind.as_str()) data-id=id style=box_style>
			<div class="canvas-node-body" style="width: 100%; height: 100%; overflow: hidden;">
				{render_content(&initial, state)}
			</div>
			{handles}
			<div class="canvas-resize-grip" />
		</div>
	}
	.into_any()
}

fn box_css(node: &VisualNode) -> String {
	let rect = footprint(node);
	let z_index = if node.kind() == NodeKind::Group { 0 } else { 2 };
	format!(
		"position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; \
		 box-sizing: border-box; z-index: {z_index}; {}",
		rect.x,
		rect.y,
		rect.width,
		rect.height,
		node.style.to_css()
	)
}

fn handle_css(side: Side) -> &'static str {
	match side {
		Side::Top => "left: 50%; top: 0;",
		Side::Right => "left: 100%; top: 50%;",
		Side::Bottom => "left: 50%; top: 100%;",
		Side::Left => "left: 0; top: 50%;",
	}
}

/// Renderer registry: picks the widget for a node's payload.
fn render_content(node: &VisualNode, state: RwSignal<ViewState>) -> AnyView {
	match &node.payload {
		NodePayload::Markdown { file, label } => view! {
			<MarkdownNode id=node.id.clone() file=file.clone() label=label.clone() state=state />
		}
		.into_any(),
		NodePayload::Image { src, label } => {
			view! { <ImageNode src=src.clone() label=label.clone() /> }.into_any()
		}
		NodePayload::Group { label } => {
			view! { <div class="node-title group-title">{label.clone()}</div> }.into_any()
		}
		NodePayload::Default { label, text, file } => view! {
			<BasicNode label=label.clone() text=text.clone() file=file.clone() />
		}
		.into_any(),
	}
}

/// Render markdown to HTML. Raw HTML blocks are shown as text.
pub fn render_markdown(markdown: &str) -> String {
	let mut options = Options::empty();
	options.insert(Options::ENABLE_TABLES);
	options.insert(Options::ENABLE_STRIKETHROUGH);
	options.insert(Options::ENABLE_TASKLISTS);

	let parser = Parser::new_ext(markdown, options).map(|event| match event {
		Event::Html(raw) => Event::Text(raw),
		other => other,
	});
	let mut out = String::new();
	html::push_html(&mut out, parser);
	out.replace("<a ", r#"<a target="_blank" rel="noopener noreferrer" "#)
}

#[derive(Clone, Debug, PartialEq)]
enum Content {
	Loading,
	Ready(String),
	Failed(String),
}

/// Fetches a markdown file and renders it, growing or shrinking the node to
/// fit once the content is in.
#[component]
fn MarkdownNode(
	id: String,
	file: String,
	label: String,
	state: RwSignal<ViewState>,
) -> impl IntoView {
	let config = use_context::<ViewerConfig>().unwrap_or_default();
	let content = RwSignal::new(Content::Loading);
	let body_ref = NodeRef::<Div>::new();
	let url = content_url(&config.content_root, &file);

	spawn_local(async move {
		let next = match load_text(&url).await {
			Ok(markdown) => Content::Ready(render_markdown(&markdown)),
			Err(err) => {
				warn!("Failed to load markdown {url}: {err}");
				Content::Failed(err.to_string())
			}
		};
		let _ = content.try_set(next);
	});

	Effect::new(move |_| {
		if !content.with(|c| matches!(c, Content::Ready(_))) {
			return;
		}
		let id = id.clone();
		request_animation_frame(move || {
			let Some(body) = body_ref.get_untracked() else {
				return;
			};
			let resized = state.with_untracked(|s| -> Option<Size> {
				let node = s.graph.node(&id)?;
				let pad = 2.0 * node.style.padding;
				auto_size(
					node.size,
					body.scroll_width() as f64 + pad,
					body.scroll_height() as f64 + pad,
				)
			});
			if let Some(size) = resized {
				dispatch(state, GraphAction::ResizeNode { id, size });
			}
		});
	});

	view! {
		<div node_ref=body_ref class="markdown-node">
			<div class="node-title">{label}</div>
			{move || match content.get() {
				Content::Loading => view! { <p class="node-status">"Loading..."</p> }.into_any(),
				Content::Ready(html) => view! { <div class="markdown-body" inner_html=html /> }.into_any(),
				Content::Failed(err) => {
					view! { <p class="node-error">{format!("Failed to load {file}: {err}")}</p> }
						.into_any()
				}
			}}
		</div>
	}
}

/// Image from the content root; hides itself if the image fails to load.
#[component]
fn ImageNode(src: String, label: String) -> impl IntoView {
	let config = use_context::<ViewerConfig>().unwrap_or_default();
	let broken = RwSignal::new(false);
	let url = content_url(&config.content_root, &src);
	let style = move || {
		format!(
			"display: {}; max-width: 100%; max-height: 100%; object-fit: contain;",
			if broken.get() { "none" } else { "block" }
		)
	};

	view! {
		<img
			class="image-node"
			src=url
			alt=label
			draggable="false"
			style=style
			on:error=move |_| {
				warn!("Failed to load image {src}");
				broken.set(true);
			}
		/>
	}
}

#[component]
fn BasicNode(label: String, text: Option<String>, file: Option<String>) -> impl IntoView {
	let body = text.map(|text| {
		view! { <div class="markdown-body" inner_html=render_markdown(&text) /> }
	});
	let file = file.map(|file| view! { <p class="file-ref">{file}</p> });

	view! {
		<div class="basic-node">
			<div class="node-title">{label}</div>
			{body}
			{file}
		</div>
	}
}
