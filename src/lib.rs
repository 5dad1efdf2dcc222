//! # page-loader
//!
//! Bulk page creation and query tooling for tree-structured content
//! repositories. The heart of the crate is a CSV-driven import pipeline:
//! each input line names a page to create, and every line — valid,
//! failing, or unparseable — ends up as exactly one entry in a JSON
//! report, so a batch is auditable row by row and never aborted by a
//! single bad row.
//!
//! # Architecture: Parse → Create → Report
//!
//! ```text
//! 1. Parse    text blob   →  rows            (field-count dispatch)
//! 2. Create   row         →  PageResult      (store / tags / replication)
//! 3. Report   PageResults →  ordered mapping (path → outcome)
//! ```
//!
//! The middle stage talks to the repository only through the collaborator
//! traits in [`store`], injected at construction. The crate ships one
//! production implementation, [`fs_store::FsStore`], which keeps nodes as
//! directories with a `node.json` properties file; tests run the same
//! pipeline against a recording mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`row`] | Line parsing and the optional-field dispatch table |
//! | [`pipeline`] | Per-row create → tag → publish with row-level error policy |
//! | [`report`] | Ordered per-row report, JSON shapes, terminal formatting |
//! | [`store`] | Collaborator traits: content store, tags, replication, reads, query |
//! | [`fs_store`] | Filesystem-backed implementation of all collaborator traits |
//! | [`search`] | Full-text query envelope over [`store::QueryIndex`] |
//! | [`model`] | Typed adaptation of raw node properties (stock quotes) |
//! | [`stock`] | Threshold check over imported stock prices |
//! | [`config`] | Optional `page-loader.toml` (store root, default template) |
//!
//! # Design Decisions
//!
//! ## Coarse failure taxonomy
//!
//! A row that fails during creation, tagging, or publication reports the
//! same way: `{"Status": "Could not create a page: <cause>"}`. Callers
//! parse the report mechanically and depend on there being exactly two
//! non-success shapes (failed and malformed); distinguishing tag failures
//! from store failures would change the observable contract.
//!
//! ## No rollback
//!
//! Page creation is irreversible from the pipeline's point of view. If
//! tagging or publication fails afterwards, the page stays; the report
//! entry records the failure and the operator decides what to do with the
//! partially set up page.
//!
//! ## Traits per capability
//!
//! Creation, tagging, publication, raw reads, and query are five separate
//! traits rather than one repository interface. Each consumer names only
//! what it uses, and the mock implements exactly the calls a test needs
//! to observe.

pub mod config;
pub mod fs_store;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod row;
pub mod search;
pub mod stock;
pub mod store;
