//! Reference-style link/image ID table, grounded in `LinkIds` in
//! `markdown-tokens.h`/`markdown.cpp`.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct LinkTarget {
    pub url: String,
    pub title: String,
}

/// Case-insensitive reference table. Insertion keys are lowercased only,
/// matching the definition text verbatim (`[id]: url` ids are not
/// whitespace-collapsed on the way in). Lookup additionally collapses runs
/// of spaces to one, so a usage like `[text][id  with  extra  spaces]`
/// still resolves against a definition written with normal single spacing.
/// `add` mirrors `boost::unordered_map::insert`, which is a no-op when the
/// key is already present — so the first definition of a given reference id
/// wins, and later ones with the same id are silently dropped.
#[derive(Debug, Clone, Default)]
pub struct LinkIds {
    table: HashMap<String, LinkTarget>,
}

impl LinkIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, id: &str) -> Option<&LinkTarget> {
        self.table.get(&scrub_lookup_key(id))
    }

    pub fn add(&mut self, id: &str, url: impl Into<String>, title: impl Into<String>) {
        self.table
            .entry(scrub_insert_key(id))
            .or_insert_with(|| LinkTarget { url: url.into(), title: title.into() });
    }
}

fn scrub_insert_key(id: &str) -> String {
    id.to_lowercase()
}

fn scrub_lookup_key(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for c in id.chars() {
        if c == ' ' {
            if !out.ends_with(' ') {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out.to_lowercase()
}
