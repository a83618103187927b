//! Document buffer abstraction, adapted from the teacher project's
//! `logic::buffer::DocumentBuffer`. Tracks a file path (or lack of one, for
//! an untitled buffer), a modified flag, and the text content, and offers
//! the one operation that crosses into `core`: rendering the buffer to
//! HTML.
//!
//! Deliberately drops the teacher's async file-cache/callback plumbing
//! (`load_from_cached`) — that exists there to keep a GTK main loop
//! responsive while loading from disk, which is a UI-toolkit concern that
//! has no counterpart in this thin shared crate.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use core::{Document, TranslatorConfig};

#[derive(Debug, Clone)]
pub struct DocumentBuffer {
    file_path: Option<PathBuf>,
    content: String,
    baseline_content: String,
    display_name: String,
}

impl DocumentBuffer {
    pub fn new_untitled() -> Self {
        Self {
            file_path: None,
            content: String::new(),
            baseline_content: String::new(),
            display_name: "Untitled".to_string(),
        }
    }

    /// Loads `path` from disk eagerly. Matches the validation the teacher's
    /// `new_from_file` performs: the path must already exist.
    pub fn new_from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(io::Error::new(io::ErrorKind::NotFound, format!("{} does not exist", path.display())));
        }
        let content = fs::read_to_string(path)?;
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());
        Ok(Self { file_path: Some(path.to_path_buf()), baseline_content: content.clone(), content, display_name })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_modified(&self) -> bool {
        self.content != self.baseline_content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Writes the current content to `file_path` (or `path`, for "save
    /// as"), auto-appending a `.md` extension if none was given, matching
    /// the teacher's `save_content`/`save_as_content` behavior.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut path = path.as_ref().to_path_buf();
        if path.extension().is_none() {
            path.set_extension("md");
        }
        fs::write(&path, &self.content)?;
        self.baseline_content = self.content.clone();
        self.display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());
        self.file_path = Some(path);
        Ok(())
    }

    pub fn save(&mut self) -> io::Result<()> {
        let path = self
            .file_path
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "buffer has no associated path"))?;
        self.save_as(path)
    }

    /// The render boundary this crate exists to host: runs the current
    /// content through `core`'s translator and returns the HTML, without
    /// the host needing to touch `core::Document` directly.
    pub fn render_html(&self, config: TranslatorConfig) -> String {
        let mut doc = Document::new(config);
        doc.read_str(&self.content);
        doc.to_html()
    }
}
