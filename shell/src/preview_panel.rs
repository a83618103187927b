//! The docking panel itself: an editor-facing text view, a "live preview"
//! checkbox and a manual "Preview" button above an embedded webview.
//!
//! Grounded in `CPreviewDlg` (`original_source/PreViewDlg.h`):
//! - `OnInitDialog` → [`PreviewPanel::new`] (build the widgets, size the
//!   browser to the parent).
//! - `ReSize(x, y)` → GTK's own layout (a `gtk4::Box` with the webview set
//!   to expand handles this for free; there is no manual resize math to
//!   port).
//! - `Tans()` → [`PreviewPanel::render_now`]: read the editor's text,
//!   run it through `core::Document::read`/`write`, and hand the HTML to
//!   the browser's `SetBodyText`.
//! - the "live preview" checkbox and "preview" button → the
//!   `live_preview` toggle and `render_now` call wired up in
//!   [`PreviewPanel::connect_editor`].

use gtk4::prelude::*;
use gtk4::{Box as GtkBox, Button, CheckButton, Orientation, TextView};

use core::TranslatorConfig;
use shared::DocumentBuffer;

/// Owns the widgets and the translator configuration for one preview
/// panel. One `PreviewPanel` corresponds to one `CPreviewDlg` instance in
/// the original.
pub struct PreviewPanel {
    container: GtkBox,
    editor: TextView,
    live_preview_toggle: CheckButton,
    preview_button: Button,
    webview: webkit6::WebView,
    config: TranslatorConfig,
}

impl PreviewPanel {
    /// `CPreviewDlg::OnInitDialog`: builds the browser control and lays it
    /// out below the live-preview checkbox and preview button.
    pub fn new(config: TranslatorConfig) -> Self {
        let container = GtkBox::new(Orientation::Vertical, 4);

        let controls = GtkBox::new(Orientation::Horizontal, 8);
        let live_preview_toggle = CheckButton::with_label("Live preview");
        let preview_button = Button::with_label("Preview");
        controls.append(&live_preview_toggle);
        controls.append(&preview_button);

        let editor = TextView::new();
        editor.set_vexpand(true);
        editor.set_hexpand(true);

        let webview = webkit6::WebView::new();
        webview.set_vexpand(true);
        webview.set_hexpand(true);
        if let Some(settings) = webkit6::prelude::WebViewExt::settings(&webview) {
            settings.set_enable_developer_extras(false);
            settings.set_javascript_can_access_clipboard(false);
        }

        container.append(&controls);
        container.append(&editor);
        container.append(&webview);

        let panel = Self { container, editor, live_preview_toggle, preview_button, webview, config };
        panel.connect_editor();
        panel
    }

    pub fn widget(&self) -> &GtkBox {
        &self.container
    }

    /// `CPreviewDlg::Tans()`: read the editor text, translate it, push the
    /// HTML into the browser. Matches the original's `SCI_GETTEXT` →
    /// `markdown::Document::read`/`write` → `SetBodyText` sequence, with
    /// the codepage conversion step dropped — GTK `TextBuffer` text is
    /// already UTF-8, so there is nothing to transcode.
    pub fn render_now(&self) {
        let buffer = self.editor.buffer();
        let text = buffer.text(&buffer.start_iter(), &buffer.end_iter(), false);

        let mut doc = DocumentBuffer::new_untitled();
        doc.set_content(text.as_str());
        let html = doc.render_html(self.config);

        log::debug!("rendered preview ({} bytes in, {} bytes out)", text.len(), html.len());
        self.webview.load_html(&html, None);
    }

    /// Wires the editor's `changed` signal to `render_now`, but only fires
    /// when the live-preview checkbox is active — mirroring the original's
    /// `OnPreviewCmd` being reachable either from the checkbox's live
    /// updates or an explicit button press.
    fn connect_editor(&self) {
        let live_preview_toggle = self.live_preview_toggle.clone();
        let panel_for_edit = self.clone_render_handles();
        self.editor.buffer().connect_changed(move |_| {
            if live_preview_toggle.is_active() {
                panel_for_edit();
            }
        });

        let panel_for_button = self.clone_render_handles();
        self.preview_button.connect_clicked(move |_| {
            panel_for_button();
        });
    }

    /// Returns a cheap closure capturing just the webview/editor/config
    /// this panel needs to re-render, so the `connect_changed`/
    /// `connect_clicked` closures don't need to hold a reference to
    /// `self` (GTK signal closures must be `'static`).
    fn clone_render_handles(&self) -> impl Fn() + 'static {
        let editor = self.editor.clone();
        let webview = self.webview.clone();
        let config = self.config;
        move || {
            let buffer = editor.buffer();
            let text = buffer.text(&buffer.start_iter(), &buffer.end_iter(), false);

            let mut doc = DocumentBuffer::new_untitled();
            doc.set_content(text.as_str());
            let html = doc.render_html(config);
            webview.load_html(&html, None);
        }
    }

    pub fn set_live_preview(&self, enabled: bool) {
        self.live_preview_toggle.set_active(enabled);
    }
}
