//! Read-only Markdown viewer, standing in for the teacher project's `polo`
//! crate: open a file, render it to HTML, show it in a webview. No editing
//! surface, no live-preview toggle — `spec.md`'s boundary contract (b),
//! "an HTML byte stream goes out to a render surface", with nothing else
//! attached.

pub mod window;

pub use window::ViewerWindow;
