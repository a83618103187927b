//! Render cache: memoizes a full read-then-write pass over a content
//! string, keyed by its hash plus the [`TranslatorConfig`] it was rendered
//! under. Grounded in `logic::cache::ParserCache`, trimmed to a single
//! moka cache since this translator has no separate AST to memoize apart
//! from the HTML it produces — unlike the host's fuller Marco engine, a
//! `Document` isn't `Clone`/`Send` across renders, so there's nothing to
//! gain from caching the tree itself.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use moka::sync::Cache;

use crate::config::TranslatorConfig;
use crate::document::Document;

const HTML_CACHE_MAX_CAPACITY: u64 = 2000;

/// High-performance render cache using moka, safe to share across threads.
#[derive(Clone)]
pub struct RenderCache {
    html: Cache<(u64, u64), String>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self { html: Cache::new(HTML_CACHE_MAX_CAPACITY) }
    }

    /// Renders `content` to HTML, reusing a previous render for the same
    /// content and config if one is still cached.
    pub fn render(&self, content: &str, config: TranslatorConfig) -> String {
        let key = (hash_content(content), hash_config(&config));

        if let Some(html) = self.html.get(&key) {
            return html;
        }

        let mut doc = Document::new(config);
        doc.read_str(content);
        let html = doc.to_html();
        self.html.insert(key, html.clone());
        html
    }

    pub fn clear(&self) {
        self.html.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.html.entry_count()
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new()
    }
}

fn hash_content(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

fn hash_config(config: &TranslatorConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.spaces_per_tab.hash(&mut hasher);
    hasher.finish()
}

static GLOBAL_RENDER_CACHE: OnceLock<RenderCache> = OnceLock::new();

/// Global singleton, for hosts (the Notepad++ plugin shell, the preview
/// viewer) that want a shared cache without threading one through every
/// call site.
pub fn global_render_cache() -> &'static RenderCache {
    GLOBAL_RENDER_CACHE.get_or_init(RenderCache::new)
}
