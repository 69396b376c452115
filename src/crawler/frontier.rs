//! Depth-tagged frontier and visited-set bookkeeping
//!
//! The frontier is processed one depth level at a time: every entry of
//! depth `d` is handed out before any entry of depth `d + 1`. Duplicates are
//! allowed to enter the queue and are discarded when a level is taken, by
//! consulting the crawl's [`VisitedSet`].
//!
//! Redirect targets join the level of the page that redirected, so they are
//! fetched before any deeper page and pass through the same visited check.

use crate::url::normalize_url;
use std::collections::HashSet;
use std::mem;
use url::Url;

/// A URL waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Absolute URL to fetch
    pub url: Url,

    /// Normalized form used as the visited-set key
    pub key: String,

    /// Link hops from the seed
    pub depth: u32,
}

impl FrontierEntry {
    /// Builds an entry, rejecting URLs that cannot be crawled
    pub fn new(url: Url, depth: u32) -> Option<Self> {
        let key = normalize_url(url.as_str()).ok()?.to_string();
        Some(Self { url, key, depth })
    }
}

/// URLs already handed out for fetching within one crawl
#[derive(Debug, Default)]
pub struct VisitedSet {
    keys: HashSet<String>,
}

impl VisitedSet {
    /// Marks `key` visited; returns false if it already was
    pub fn insert(&mut self, key: &str) -> bool {
        if self.keys.contains(key) {
            return false;
        }
        self.keys.insert(key.to_string())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

/// Level-ordered frontier bounded by a maximum depth
#[derive(Debug)]
pub struct Frontier {
    max_depth: u32,
    current: Vec<FrontierEntry>,
    next: Vec<FrontierEntry>,
    visited: VisitedSet,
}

impl Frontier {
    /// Creates a frontier holding only the seed at depth 0
    pub fn new(seed: FrontierEntry, max_depth: u32) -> Self {
        Self {
            max_depth,
            current: vec![seed],
            next: Vec::new(),
            visited: VisitedSet::default(),
        }
    }

    /// Queues a link discovered on a page of depth `parent_depth`
    ///
    /// Returns false when the child would exceed the maximum depth or the
    /// URL cannot be crawled (non-http scheme, missing host).
    pub fn push_child(&mut self, url: Url, parent_depth: u32) -> bool {
        let depth = parent_depth + 1;
        if depth > self.max_depth {
            return false;
        }

        match FrontierEntry::new(url, depth) {
            Some(entry) => {
                self.next.push(entry);
                true
            }
            None => false,
        }
    }

    /// Queues the target of a redirect served at `depth`
    ///
    /// The target keeps the depth of the page that redirected. Returns false
    /// when the URL cannot be crawled.
    pub fn push_redirect(&mut self, url: Url, depth: u32) -> bool {
        match FrontierEntry::new(url, depth) {
            Some(entry) => {
                self.current.push(entry);
                true
            }
            None => false,
        }
    }

    /// Takes the shallowest pending level, marking its entries visited
    ///
    /// Entries whose key was already visited (in this or an earlier level)
    /// are dropped. Returns `None` once nothing is left to fetch.
    pub fn take_level(&mut self) -> Option<Vec<FrontierEntry>> {
        loop {
            if self.current.is_empty() {
                if self.next.is_empty() {
                    return None;
                }
                self.current = mem::take(&mut self.next);
            }

            let pending = mem::take(&mut self.current);
            let level: Vec<FrontierEntry> = pending
                .into_iter()
                .filter(|entry| self.visited.insert(&entry.key))
                .collect();

            if !level.is_empty() {
                return Some(level);
            }
        }
    }

    /// Number of entries waiting for the next level
    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.current.len() + self.next.len()
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}
