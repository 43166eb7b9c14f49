//! Read-only page source keyed by file name.
//!
//! A store is filled either programmatically or from a directory containing
//! `*.json` documents (`{"text": ..., "token_indices_per_page": [[s, e], ...]}`)
//! and `*.txt` files whose pages are separated by form feeds. Files found in
//! subdirectories are keyed by their `/`-separated path relative to the root,
//! so `a/notes.txt` and `b/notes.txt` stay distinct.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::types::{Document, PageRange};

const PAGE_BREAK: char = '\x0c';

#[derive(Debug, Default, Clone)]
pub struct DocumentStore {
    documents: BTreeMap<String, Document>,
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::NotFound(format!("document directory {}", dir.display())));
        }
        let mut store = Self::new();
        for path in list_document_files(dir) {
            let Some(key) = document_key(dir, &path) else {
                warn!(path = %path.display(), "skipping document with a non UTF-8 path");
                continue;
            };
            let document = match path.extension().and_then(|s| s.to_str()) {
                Some("json") => read_json_document(&path)?,
                _ => read_text_document(&path)?,
            };
            debug!(file = %key, pages = document.page_count(), "loaded document");
            store.insert(key, document);
        }
        info!(dir = %dir.display(), documents = store.len(), "document store loaded");
        Ok(store)
    }

    pub fn insert(&mut self, filename: impl Into<String>, document: Document) {
        self.documents.insert(filename.into(), document);
    }

    pub fn get(&self, filename: &str) -> Result<&Document> {
        self.documents
            .get(filename)
            .ok_or_else(|| Error::NotFound(format!("document '{}'", filename)))
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> + '_ { self.documents.keys().map(String::as_str) }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }
}

/// Compute inclusive per-page character ranges for text paginated with form feeds.
///
/// The form feed itself belongs to no page. A trailing form feed does not open
/// an extra empty page.
pub fn form_feed_pages(text: &str) -> Vec<PageRange> {
    let mut pages = Vec::new();
    let mut page_start = 0usize;
    let mut total = 0usize;
    for (i, c) in text.chars().enumerate() {
        if c == PAGE_BREAK {
            pages.push(page_range(page_start, i));
            page_start = i + 1;
        }
        total = i + 1;
    }
    if page_start < total || pages.is_empty() {
        pages.push(page_range(page_start, total));
    }
    pages
}

// `end_exclusive == start` is an empty page; it still occupies a slot so page numbers stay aligned.
fn page_range(start: usize, end_exclusive: usize) -> PageRange {
    PageRange::new(start, end_exclusive.saturating_sub(1).max(start))
}

fn read_json_document(path: &Path) -> Result<Document> {
    let raw = fs::read_to_string(path).map_err(|source| Error::Io { path: path.display().to_string(), source })?;
    serde_json::from_str(&raw).map_err(|e| Error::Parse { path: path.display().to_string(), message: e.to_string() })
}

fn read_text_document(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).map_err(|source| Error::Io { path: path.display().to_string(), source })?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let pages = form_feed_pages(&text);
    Ok(Document::new(text, pages))
}

fn document_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
    parts.map(|p| p.join("/"))
}

fn list_document_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
        let path = entry.path();
        if matches!(path.extension().and_then(|s| s.to_str()), Some("json" | "txt")) { files.push(path.to_path_buf()); }
    }
    files.sort();
    files
}
