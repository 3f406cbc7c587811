//! Fetching canvas documents and node content over HTTP.

use gloo_net::http::Request;
use log::{info, warn};
use thiserror::Error;

use super::document::CanvasDocument;

/// Why a document or a piece of node content could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The request never produced a response.
	#[error("request failed: {0}")]
	Network(#[from] gloo_net::Error),
	/// The server answered with a non-success status.
	#[error("server responded with {status} {status_text}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Reason phrase.
		status_text: String,
	},
	/// An HTML page came back, usually the app shell served for a missing file.
	#[error("expected {expected} but received an HTML page")]
	Html {
		/// What the caller asked for.
		expected: &'static str,
	},
	/// The body is not a valid canvas document.
	#[error("invalid canvas JSON: {0}")]
	Json(#[from] serde_json::Error),
}

/// Join a content-relative path onto `root`.
pub fn content_url(root: &str, path: &str) -> String {
	format!(
		"{}/{}",
		root.trim_end_matches('/'),
		path.trim_start_matches('/')
	)
}

/// Reject non-success statuses and HTML bodies.
pub fn check_response(
	status: u16,
	status_text: &str,
	body: &str,
	expected: &'static str,
) -> Result<(), LoadError> {
	if !(200..300).contains(&status) {
		return Err(LoadError::Status {
			status,
			status_text: status_text.to_string(),
		});
	}
	if looks_like_html(body) {
		return Err(LoadError::Html { expected });
	}
	Ok(())
}

fn looks_like_html(body: &str) -> bool {
	let head: String = body.trim_start().chars().take(14).collect();
	let head = head.to_ascii_lowercase();
	head.starts_with("<!doctype html") || head.starts_with("<html")
}

/// Turn a raw HTTP response into a canvas document.
pub fn parse_canvas_response(
	status: u16,
	status_text: &str,
	body: &str,
) -> Result<CanvasDocument, LoadError> {
	check_response(status, status_text, body, "a canvas document")?;
	Ok(CanvasDocument::from_json(body)?)
}

async fn fetch(url: &str) -> Result<(u16, String, String), LoadError> {
	let encoded = String::from(js_sys::encode_uri(url));
	let response = Request::get(&encoded).send().await?;
	let status = response.status();
	let status_text = response.status_text();
	let body = response.text().await?;
	Ok((status, status_text, body))
}

/// Fetch and parse the canvas document at `url`.
pub async fn load_canvas(url: &str) -> Result<CanvasDocument, LoadError> {
	info!("Loading canvas from {url}");
	let (status, status_text, body) = fetch(url).await?;
	let doc = parse_canvas_response(status, &status_text, &body).inspect_err(|err| {
		warn!("Failed to load canvas {url}: {err}");
	})?;
	info!(
		"Loaded canvas with {} nodes and {} edges",
		doc.nodes.len(),
		doc.edges.len()
	);
	Ok(doc)
}

/// Fetch a text resource, such as the markdown behind a node.
pub async fn load_text(url: &str) -> Result<String, LoadError> {
	let (status, status_text, body) = fetch(url).await?;
	check_response(status, &status_text, &body, "a text file")?;
	Ok(body)
}
