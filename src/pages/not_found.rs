use leptos::prelude::*;

/// Fallback for unknown routes.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="error-message">
			<h1>"Page not found"</h1>
			<a href="/">"Back to the canvas"</a>
		</div>
	}
}
