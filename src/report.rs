//! Per-row results and the ordered import report.
//!
//! # Report Contract
//!
//! The report is a mapping from row key to outcome. The key is the row's
//! target path, or the raw line text for rows that never parsed. Every
//! input line produces exactly one entry, so a caller can audit every
//! row's fate — with one deliberate exception: a duplicate path in the
//! input overwrites the earlier entry (last-write-wins, not an error),
//! keeping the earlier entry's position.
//!
//! # JSON Shapes
//!
//! ```json
//! {
//!   "/content/a": {
//!     "Status": "Created",
//!     "Location": "/content/a",
//!     "Title": "Title A",
//!     "Template Used": "/templates/page-content",
//!     "Tagged with": "",
//!     "Was Published": true
//!   },
//!   "badrow": { "Status": "Could not properly parse the line" }
//! }
//! ```
//!
//! Failed and malformed rows carry a single diagnostic string and nothing
//! else — no partial fields. Tagging and publish failures are not reported
//! separately from creation failures; callers rely on the coarse taxonomy.
//!
//! # Architecture
//!
//! As elsewhere, display formatting is a pure `format_report` returning
//! `Vec<String>` with a `print_report` wrapper — no I/O in the formatter.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Diagnostic for lines that failed field validation.
pub const MALFORMED_DIAGNOSTIC: &str = "Could not properly parse the line";

/// Outcome of processing one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResult {
    Created {
        /// Repository path of the created page.
        location: String,
        title: String,
        /// Template actually used, after default substitution.
        template_used: String,
        /// Display title of the applied tag, empty when the row had none.
        tag_title: String,
        published: bool,
    },
    /// Creation, tagging, or publication failed after validation passed.
    Failed { reason: String },
    /// The line never passed field validation.
    Malformed,
}

impl PageResult {
    /// The `Status` string written to the report.
    pub fn status(&self) -> String {
        match self {
            PageResult::Created { .. } => "Created".to_string(),
            PageResult::Failed { reason } => format!("Could not create a page: {reason}"),
            PageResult::Malformed => MALFORMED_DIAGNOSTIC.to_string(),
        }
    }
}

impl Serialize for PageResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageResult::Created {
                location,
                title,
                template_used,
                tag_title,
                published,
            } => {
                let mut map = serializer.serialize_map(Some(6))?;
                map.serialize_entry("Status", "Created")?;
                map.serialize_entry("Location", location)?;
                map.serialize_entry("Title", title)?;
                map.serialize_entry("Template Used", template_used)?;
                map.serialize_entry("Tagged with", tag_title)?;
                map.serialize_entry("Was Published", published)?;
                map.end()
            }
            _ => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Status", &self.status())?;
                map.end()
            }
        }
    }
}

/// Ordered collection of per-row outcomes, keyed by path or raw line.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    #[serde(flatten)]
    entries: IndexMap<String, PageResult>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one row's outcome. A repeated key overwrites the earlier
    /// value but stays at the earlier key's position.
    pub fn insert(&mut self, key: String, result: PageResult) {
        self.entries.insert(key, result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&PageResult> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PageResult)> {
        self.entries.iter()
    }

    /// Count of rows that were created (vs failed or malformed).
    pub fn created(&self) -> usize {
        self.entries
            .values()
            .filter(|r| matches!(r, PageResult::Created { .. }))
            .count()
    }
}

/// Format the report for terminal display, one block per row in report
/// order, details indented under the key line.
pub fn format_report(report: &Report) -> Vec<String> {
    let mut lines = Vec::new();
    for (key, result) in report.iter() {
        match result {
            PageResult::Created {
                location,
                title,
                template_used,
                tag_title,
                published,
            } => {
                lines.push(format!("{key}: Created"));
                lines.push(format!("    Location: {location}"));
                lines.push(format!("    Title: {title}"));
                lines.push(format!("    Template: {template_used}"));
                if !tag_title.is_empty() {
                    lines.push(format!("    Tagged with: {tag_title}"));
                }
                lines.push(format!(
                    "    Published: {}",
                    if *published { "yes" } else { "no" }
                ));
            }
            _ => lines.push(format!("{key}: {}", result.status())),
        }
    }
    lines.push(format!(
        "{} created, {} failed, {} total",
        report.created(),
        report.len() - report.created(),
        report.len()
    ));
    lines
}

pub fn print_report(report: &Report) {
    for line in format_report(report) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(location: &str, title: &str) -> PageResult {
        PageResult::Created {
            location: location.to_string(),
            title: title.to_string(),
            template_used: "/templates/page-content".to_string(),
            tag_title: String::new(),
            published: false,
        }
    }

    #[test]
    fn created_serializes_all_six_fields() {
        let result = PageResult::Created {
            location: "/content/a".into(),
            title: "Title A".into(),
            template_used: "/templates/page-content".into(),
            tag_title: "Interest".into(),
            published: true,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["Status"], "Created");
        assert_eq!(json["Location"], "/content/a");
        assert_eq!(json["Title"], "Title A");
        assert_eq!(json["Template Used"], "/templates/page-content");
        assert_eq!(json["Tagged with"], "Interest");
        assert_eq!(json["Was Published"], true);
    }

    #[test]
    fn failed_serializes_diagnostic_only() {
        let result = PageResult::Failed {
            reason: "node already exists: /content/a".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(
            obj["Status"],
            "Could not create a page: node already exists: /content/a"
        );
    }

    #[test]
    fn malformed_serializes_diagnostic_only() {
        let json = serde_json::to_value(&PageResult::Malformed).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["Status"], MALFORMED_DIAGNOSTIC);
    }

    #[test]
    fn report_preserves_first_insertion_order() {
        let mut report = Report::new();
        report.insert("/z".into(), created("/z", "Z"));
        report.insert("/a".into(), created("/a", "A"));
        report.insert("bad".into(), PageResult::Malformed);
        let keys: Vec<&String> = report.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["/z", "/a", "bad"]);
    }

    #[test]
    fn duplicate_key_overwrites_value_in_place() {
        let mut report = Report::new();
        report.insert("/a".into(), created("/a", "First"));
        report.insert("/b".into(), created("/b", "B"));
        report.insert("/a".into(), created("/a", "Second"));

        assert_eq!(report.len(), 2);
        let keys: Vec<&String> = report.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["/a", "/b"]);
        assert!(matches!(
            report.get("/a"),
            Some(PageResult::Created { title, .. }) if title == "Second"
        ));
    }

    #[test]
    fn report_serializes_as_flat_mapping() {
        let mut report = Report::new();
        report.insert("/a".into(), created("/a", "A"));
        report.insert("bad".into(), PageResult::Malformed);
        let json = serde_json::to_value(&report).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(json["/a"]["Status"], "Created");
        assert_eq!(json["bad"]["Status"], MALFORMED_DIAGNOSTIC);
    }

    #[test]
    fn format_report_summarizes_counts() {
        let mut report = Report::new();
        report.insert("/a".into(), created("/a", "A"));
        report.insert("bad".into(), PageResult::Malformed);
        let lines = format_report(&report);
        assert_eq!(lines.last().unwrap(), "1 created, 1 failed, 2 total");
        assert!(lines[0].starts_with("/a: Created"));
    }
}
