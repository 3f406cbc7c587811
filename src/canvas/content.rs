//! File-extension sniffing for `file` nodes.

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// What a file reference points at, judged by its extension alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
	/// Raster or vector image the browser can decode.
	Image,
	/// Markdown document, fetched and rendered in place.
	Markdown,
	/// Anything else, shown as a plain file reference.
	Other,
}

/// Lower-cased text after the final `.` of `path`.
///
/// The whole path is scanned, so `notes.v2/readme` yields `v2/readme`, which
/// then matches no known set.
pub fn extension(path: &str) -> Option<String> {
	match path.rsplit_once('.') {
		Some((_, ext)) if !ext.is_empty() => Some(ext.to_ascii_lowercase()),
		_ => None,
	}
}

/// Classify `path` against the image and markdown extension sets.
pub fn classify(path: &str) -> ContentKind {
	match extension(path).as_deref() {
		Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => ContentKind::Image,
		Some(ext) if MARKDOWN_EXTENSIONS.contains(&ext) => ContentKind::Markdown,
		_ => ContentKind::Other,
	}
}

/// Make `path` relative to the served content root.
///
/// Strips a leading `public/` or `/public/`, then one leading slash.
pub fn normalize_path(path: &str) -> &str {
	let path = path
		.strip_prefix("/public/")
		.or_else(|| path.strip_prefix("public/"))
		.unwrap_or(path);
	path.strip_prefix('/').unwrap_or(path)
}

/// Final `/`-separated segment, if non-empty.
pub fn file_name(path: &str) -> Option<&str> {
	path.rsplit('/').next().filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn image_extensions_are_case_insensitive() {
		for path in ["a.png", "b.JPG", "c/d.Jpeg", "e.gif", "f.WEBP", "g.svg"] {
			assert_eq!(classify(path), ContentKind::Image, "{path}");
		}
	}

	#[test]
	fn markdown_extensions() {
		assert_eq!(classify("notes/todo.md"), ContentKind::Markdown);
		assert_eq!(classify("README.MARKDOWN"), ContentKind::Markdown);
	}

	#[test]
	fn unknown_or_missing_extension_is_other() {
		assert_eq!(classify("archive.zip"), ContentKind::Other);
		assert_eq!(classify("Makefile"), ContentKind::Other);
		assert_eq!(classify("trailing."), ContentKind::Other);
		assert_eq!(classify("dir.md/file"), ContentKind::Other);
	}

	#[test]
	fn normalize_strips_public_prefix_and_slash() {
		assert_eq!(normalize_path("public/docs/a.md"), "docs/a.md");
		assert_eq!(normalize_path("/public/docs/a.md"), "docs/a.md");
		assert_eq!(normalize_path("/img/logo.png"), "img/logo.png");
		assert_eq!(normalize_path("publicity/a.md"), "publicity/a.md");
	}

	#[test]
	fn normalize_is_idempotent() {
		for path in ["public/docs/a.md", "/x/y.png", "plain.md", "/public/z"] {
			let once = normalize_path(path);
			assert_eq!(normalize_path(once), once);
		}
	}

	#[test]
	fn file_name_takes_last_segment() {
		assert_eq!(file_name("docs/readme.md"), Some("readme.md"));
		assert_eq!(file_name("readme.md"), Some("readme.md"));
		assert_eq!(file_name("docs/"), None);
	}
}
