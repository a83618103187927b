//! Dockable live-preview panel, standing in for the Notepad++ plugin shell
//! `spec.md` places out of scope. Modeled on the teacher project's `marco`
//! crate (GTK4 + WebKit6) and grounded directly in `original_source/PreViewDlg.h`'s
//! `CPreviewDlg`: an embedded browser control next to the editor, a "live
//! preview" toggle, and a `Tans()` method that reads the editor buffer,
//! pushes it through the Markdown translator, and sets the result as the
//! browser's body HTML.
//!
//! Every rule in `spec.md` lives in `core`; this crate holds no
//! Markdown-semantics code, only the glue that wires an editor-like text
//! buffer to `core::Document` and a webview.

pub mod preview_panel;

pub use preview_panel::PreviewPanel;
