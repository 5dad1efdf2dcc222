//! Filesystem-backed content repository.
//!
//! The production implementation of every collaborator trait in
//! [`store`](crate::store). A repository is a directory tree under a single
//! root; a node is a directory holding a `node.json` file with its
//! properties as a flat JSON object.
//!
//! ```text
//! repo/
//! ├── content/
//! │   └── site/
//! │       ├── node.json              # {"title": "Site", ...}
//! │       └── a/
//! │           └── node.json          # {"title": "A", "template": "...", "tags": [...]}
//! ├── tags/
//! │   └── marketing/
//! │       └── interest/
//! │           └── node.json          # {"title": "Interest"}
//! └── publish/
//!     └── content/site/a/node.json   # activated copy
//! ```
//!
//! Repository paths (`/content/site/a`) map to directories relative to the
//! root. Activation mirrors a page's node file under `publish/`, which
//! stands in for the delivery tier. This is a deliberately small store —
//! enough for the importer and its integration tests, not a content
//! platform.

use crate::store::{
    ContentStore, NodeReader, PageHandle, QueryIndex, Replicator, StoreError, TagHandle,
    TagRegistry, Values,
};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Properties file name inside every node directory.
const NODE_FILE: &str = "node.json";
/// Subtree holding the tag registry.
const TAGS_ROOT: &str = "tags";
/// Subtree holding activated copies.
const PUBLISH_ROOT: &str = "publish";

pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open a repository rooted at `root`. The directory is created if
    /// missing, so a first import against an empty root works.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn node_dir(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    fn node_file(&self, path: &str) -> PathBuf {
        self.node_dir(path).join(NODE_FILE)
    }

    fn read_values(&self, path: &str) -> Result<Values, StoreError> {
        let file = self.node_file(path);
        if !file.is_file() {
            return Err(StoreError::NoSuchNode(path.to_string()));
        }
        let content = fs::read_to_string(file)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_values(&self, path: &str, values: &Values) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(values)?;
        fs::write(self.node_file(path), json)?;
        Ok(())
    }

    /// Repository path of a node directory, relative to the root.
    fn repo_path(&self, dir: &Path) -> Option<String> {
        let rel = dir.strip_prefix(&self.root).ok()?;
        let mut path = String::new();
        for component in rel.components() {
            path.push('/');
            path.push_str(&component.as_os_str().to_string_lossy());
        }
        Some(path)
    }
}

impl ContentStore for FsStore {
    fn create_page(
        &self,
        parent_path: &str,
        name: &str,
        template: &str,
        title: &str,
    ) -> Result<PageHandle, StoreError> {
        let parent_dir = self.node_dir(parent_path);
        if !parent_dir.is_dir() {
            return Err(StoreError::NoSuchParent(parent_path.to_string()));
        }

        let path = format!("{parent_path}/{name}");
        let page_dir = self.node_dir(&path);
        if page_dir.exists() {
            return Err(StoreError::AlreadyExists(path));
        }

        fs::create_dir(&page_dir)?;
        let mut values = Values::new();
        values.insert("title".to_string(), json!(title));
        values.insert("template".to_string(), json!(template));
        values.insert("tags".to_string(), json!([]));
        self.write_values(&path, &values)?;

        Ok(PageHandle {
            path,
            title: title.to_string(),
            template: template.to_string(),
            tags: Vec::new(),
        })
    }
}

impl TagRegistry for FsStore {
    fn resolve(&self, tag_id: &str) -> Result<TagHandle, StoreError> {
        let path = format!("/{TAGS_ROOT}/{}", tag_id.trim_start_matches('/'));
        let values = self
            .read_values(&path)
            .map_err(|_| StoreError::NoSuchTag(tag_id.to_string()))?;

        // Fall back to the id's leaf segment when the registry entry has
        // no display title.
        let title = values
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_else(|| tag_id.rsplit('/').next().unwrap_or(tag_id))
            .to_string();

        Ok(TagHandle {
            id: tag_id.to_string(),
            title,
        })
    }

    fn set_tags(
        &self,
        content_path: &str,
        tags: &[TagHandle],
        replace: bool,
    ) -> Result<(), StoreError> {
        let mut values = self.read_values(content_path)?;

        let mut ids: Vec<Value> = if replace {
            Vec::new()
        } else {
            values
                .get("tags")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        };
        ids.extend(tags.iter().map(|t| json!(t.id)));

        values.insert("tags".to_string(), Value::Array(ids));
        self.write_values(content_path, &values)
    }
}

impl Replicator for FsStore {
    fn activate(&self, page_path: &str) -> Result<(), StoreError> {
        let source = self.node_file(page_path);
        if !source.is_file() {
            return Err(StoreError::NoSuchNode(page_path.to_string()));
        }

        let target_dir = self
            .root
            .join(PUBLISH_ROOT)
            .join(page_path.trim_start_matches('/'));
        fs::create_dir_all(&target_dir)?;
        fs::copy(source, target_dir.join(NODE_FILE))?;
        Ok(())
    }
}

impl NodeReader for FsStore {
    fn read(&self, path: &str) -> Result<Values, StoreError> {
        self.read_values(path)
    }
}

impl QueryIndex for FsStore {
    fn full_text(&self, root: &str, term: &str) -> Result<Vec<String>, StoreError> {
        let base = self.node_dir(root);
        if !base.is_dir() {
            return Err(StoreError::NoSuchNode(root.to_string()));
        }

        let needle = term.to_lowercase();
        let mut hits = Vec::new();
        for entry in WalkDir::new(&base).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                StoreError::Io(e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::other("walk failed")
                }))
            })?;
            if entry.file_name() != NODE_FILE {
                continue;
            }
            let content = fs::read_to_string(entry.path())?;
            let values: Values = serde_json::from_str(&content)?;
            let matched = values.values().any(|v| match v {
                Value::String(s) => s.to_lowercase().contains(&needle),
                _ => false,
            });
            if matched
                && let Some(dir) = entry.path().parent()
                && let Some(path) = self.repo_path(dir)
            {
                hits.push(path);
            }
        }
        Ok(hits)
    }
}
