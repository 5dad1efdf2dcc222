//! Collaborator traits for the content repository.
//!
//! The import pipeline never talks to a concrete repository. It is handed
//! implementations of the traits below, so the control logic (validation,
//! defaulting, per-row error policy) can be exercised against a mock while
//! the binary wires in [`FsStore`](crate::fs_store::FsStore).
//!
//! The traits are split by concern rather than bundled into one "platform"
//! object: page creation, tagging, publication, raw node reads, and
//! full-text query are independent capabilities, and most callers need only
//! one or two of them.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no such node: {0}")]
    NoSuchNode(String),
    #[error("parent does not exist: {0}")]
    NoSuchParent(String),
    #[error("node already exists: {0}")]
    AlreadyExists(String),
    #[error("no such tag: {0}")]
    NoSuchTag(String),
}

/// Generic key-value view of a node's properties.
pub type Values = BTreeMap<String, Value>;

/// A page freshly created in the content store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHandle {
    /// Full repository path of the page.
    pub path: String,
    pub title: String,
    /// Template the page was actually created from.
    pub template: String,
    /// Tags currently attached to the page, in attachment order.
    pub tags: Vec<TagHandle>,
}

/// A tag resolved from the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagHandle {
    /// Registry identifier, e.g. `marketing/interest`.
    pub id: String,
    /// Display title shown in reports.
    pub title: String,
}

/// Page creation.
pub trait ContentStore {
    /// Create a page named `name` under `parent_path` from `template`.
    ///
    /// The parent must exist and the target must not.
    fn create_page(
        &self,
        parent_path: &str,
        name: &str,
        template: &str,
        title: &str,
    ) -> Result<PageHandle, StoreError>;
}

/// Tag resolution and assignment.
pub trait TagRegistry {
    /// Look up a tag by registry id.
    fn resolve(&self, tag_id: &str) -> Result<TagHandle, StoreError>;

    /// Attach `tags` to the node at `content_path`. With `replace` set,
    /// existing tags are dropped first; otherwise the new tags are appended.
    fn set_tags(
        &self,
        content_path: &str,
        tags: &[TagHandle],
        replace: bool,
    ) -> Result<(), StoreError>;
}

/// Publication to the delivery tier.
pub trait Replicator {
    /// Activate (publish) the page at `page_path`.
    fn activate(&self, page_path: &str) -> Result<(), StoreError>;
}

/// Raw property reads, for introspection and typed model adaptation.
pub trait NodeReader {
    fn read(&self, path: &str) -> Result<Values, StoreError>;
}

/// Full-text query below a subtree.
pub trait QueryIndex {
    /// Paths of all nodes under `root` with any string property containing
    /// `term` (case-insensitive), in stable traversal order.
    fn full_text(&self, root: &str, term: &str) -> Result<Vec<String>, StoreError>;
}
