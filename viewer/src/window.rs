//! The viewer's one window: a webview and nothing else. Grounded in the
//! teacher's `polo/src/components/viewer/{mod,rendering,empty_state}.rs` —
//! `load_and_render_markdown` (read file, translate, load into the
//! webview with a base URI so relative image/link paths resolve) and
//! `show_empty_state_with_theme` (a placeholder page before any file is
//! opened).

use std::path::Path;

use gtk4::prelude::*;
use gtk4::{ApplicationWindow, Application};

use core::TranslatorConfig;
use shared::DocumentBuffer;

const EMPTY_STATE_HTML: &str = "\
<html><body style=\"font-family: sans-serif; color: #888; text-align: center; margin-top: 3em;\">\
<p>No document open.</p></body></html>";

pub struct ViewerWindow {
    window: ApplicationWindow,
    webview: webkit6::WebView,
    config: TranslatorConfig,
}

impl ViewerWindow {
    pub fn new(app: &Application, config: TranslatorConfig) -> Self {
        let webview = webkit6::WebView::new();
        webview.set_vexpand(true);
        webview.set_hexpand(true);
        webview.load_html(EMPTY_STATE_HTML, None);

        let window = ApplicationWindow::builder()
            .application(app)
            .title("Markdown Viewer")
            .default_width(800)
            .default_height(900)
            .child(&webview)
            .build();

        Self { window, webview, config }
    }

    pub fn present(&self) {
        self.window.present();
    }

    /// `load_and_render_markdown`: read `path` from disk, translate it,
    /// and load the HTML into the webview with a `file://` base URI
    /// derived from the file's parent directory, so relative image paths
    /// in the document resolve the way they did in the original's
    /// filesystem-rooted preview.
    pub fn open_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        let doc = DocumentBuffer::new_from_file(path)?;
        let html = doc.render_html(self.config);
        let base_uri = base_uri_for(path);

        log::info!("rendered {} ({} bytes HTML)", path.display(), html.len());
        self.webview.load_html(&html, base_uri.as_deref());
        Ok(())
    }

    pub fn show_empty_state(&self) {
        self.webview.load_html(EMPTY_STATE_HTML, None);
    }
}

/// `file:///parent/dir/` for a given document path, or `None` if the path
/// has no parent (e.g. it is already root).
fn base_uri_for(path: &Path) -> Option<String> {
    let parent = path.parent()?;
    let absolute = parent.canonicalize().ok()?;
    Some(format!("file://{}/", absolute.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn smoke_test_base_uri_for_file_with_parent() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("readme.md");
        std::fs::write(&file, "# hi").unwrap();

        let uri = base_uri_for(&file);
        assert!(uri.is_some());
        assert!(uri.unwrap().starts_with("file://"));
    }
}
