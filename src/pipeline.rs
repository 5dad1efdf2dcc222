//! The page creation pipeline: validate → create → tag → publish → report.
//!
//! One [`Pipeline::run`] call processes one text payload: every line is
//! parsed, every valid row is attempted independently, and every line ends
//! up as exactly one entry in the returned [`Report`]. Rows share nothing —
//! no transaction, no ordering dependency — and a row failure never aborts
//! the batch.
//!
//! ## Per-Row Error Policy
//!
//! Creation, tagging, and publication are guarded together per row: the
//! first collaborator error converts the row into a `Failed` result
//! carrying the underlying message, and processing moves to the next row.
//! The three failure modes are deliberately not distinguished in the
//! report — callers depend on the coarse taxonomy. There is no rollback:
//! a page whose tagging or publication fails stays created.
//!
//! ## Collaborators
//!
//! The pipeline owns no global handles. The content store, tag registry,
//! and replicator are passed in at construction, which is also what makes
//! the control logic testable against [`MockStore`](crate::store::tests).

use crate::report::{PageResult, Report};
use crate::row::{self, ParsedLine, RowInput};
use crate::store::{ContentStore, Replicator, StoreError, TagRegistry};
use tracing::{debug, error, info_span};

/// Template used when a row names none.
pub const DEFAULT_TEMPLATE: &str = "/templates/page-content";

/// Split a page path at the last separator into (parent, name).
///
/// `/content/site/a` → `("/content/site", "a")`. Returns `None` for paths
/// with no separator, which the pipeline reports as a row failure.
pub fn split_page_path(path: &str) -> Option<(&str, &str)> {
    path.rfind('/')
        .map(|idx| (&path[..idx], &path[idx + 1..]))
}

/// Permissive publish-flag parse: only a case-insensitive `"true"`
/// publishes; everything else, including absent, is false.
pub fn parse_publish_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

pub struct Pipeline<'a> {
    store: &'a dyn ContentStore,
    tags: &'a dyn TagRegistry,
    replicator: &'a dyn Replicator,
    default_template: String,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        store: &'a dyn ContentStore,
        tags: &'a dyn TagRegistry,
        replicator: &'a dyn Replicator,
    ) -> Self {
        Self::with_default_template(store, tags, replicator, DEFAULT_TEMPLATE)
    }

    /// Use a configured fallback template instead of [`DEFAULT_TEMPLATE`].
    pub fn with_default_template(
        store: &'a dyn ContentStore,
        tags: &'a dyn TagRegistry,
        replicator: &'a dyn Replicator,
        default_template: impl Into<String>,
    ) -> Self {
        Self {
            store,
            tags,
            replicator,
            default_template: default_template.into(),
        }
    }

    /// Process a whole text payload, one report entry per line.
    ///
    /// Malformed lines are keyed by their raw text; everything else is
    /// keyed by the row's target path. Duplicate paths overwrite.
    pub fn run(&self, input: &str) -> Report {
        let span = info_span!("import");
        let _guard = span.enter();

        let mut report = Report::new();
        for parsed in row::parse_lines(input) {
            match parsed {
                ParsedLine::Malformed(line) => {
                    debug!(line = %line, "line failed field validation");
                    report.insert(line, PageResult::Malformed);
                }
                ParsedLine::Row(row) => {
                    let key = row.path.clone();
                    report.insert(key, self.create(&row));
                }
            }
        }
        report
    }

    /// Create one page. Never returns an error: every failure becomes a
    /// `Failed` result so the batch can continue.
    pub fn create(&self, row: &RowInput) -> PageResult {
        match self.try_create(row) {
            Ok(result) => result,
            Err(err) => {
                error!(path = %row.path, error = %err, "page not created");
                PageResult::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn try_create(&self, row: &RowInput) -> Result<PageResult, StoreError> {
        let Some((parent, name)) = split_page_path(&row.path) else {
            return Ok(PageResult::Failed {
                reason: format!("path contains no '/' separator: {}", row.path),
            });
        };

        let template = match row.template.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => self.default_template.as_str(),
        };

        let page = self.store.create_page(parent, name, template, &row.title)?;

        // Tagging replaces any existing tags on the page; the row's tag is
        // the page's whole tag set afterwards.
        let mut tag_title = String::new();
        if let Some(tag_id) = row.tag.as_deref()
            && !tag_id.is_empty()
        {
            let tag = self.tags.resolve(tag_id)?;
            self.tags.set_tags(&page.path, std::slice::from_ref(&tag), true)?;
            tag_title = tag.title;
        }

        let published = parse_publish_flag(row.publish.as_deref());
        if published {
            self.replicator.activate(&page.path)?;
        }

        Ok(PageResult::Created {
            location: page.path,
            title: page.title,
            template_used: page.template,
            tag_title,
            published,
        })
    }
}
