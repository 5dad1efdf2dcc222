//! Full-text search below a repository subtree.
//!
//! Thin shaping layer over [`QueryIndex`]: runs the query and wraps the
//! matching paths in the `{"results": [...]}` envelope the CLI prints.

use crate::store::{QueryIndex, StoreError};
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SearchResults {
    pub results: Vec<String>,
}

/// Run a full-text query for `term` below `root`.
pub fn full_text(
    index: &dyn QueryIndex,
    root: &str,
    term: &str,
) -> Result<SearchResults, StoreError> {
    Ok(SearchResults {
        results: index.full_text(root, term)?,
    })
}

/// One path per line, or a note when nothing matched.
pub fn format_results(results: &SearchResults) -> Vec<String> {
    if results.results.is_empty() {
        return vec!["No matches".to_string()];
    }
    results.results.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::MockStore;
    use crate::store::Values;
    use serde_json::json;

    fn store_with_nodes() -> MockStore {
        let mock = MockStore::new();
        let mut a = Values::new();
        a.insert("title".into(), json!("Lorem Ipsum"));
        let mut b = Values::new();
        b.insert("title".into(), json!("Other"));
        mock.nodes.borrow_mut().insert("/content/a".into(), a);
        mock.nodes.borrow_mut().insert("/content/b".into(), b);
        mock
    }

    #[test]
    fn results_are_wrapped_in_the_envelope() {
        let mock = store_with_nodes();
        let results = full_text(&mock, "/content", "ipsum").unwrap();
        assert_eq!(results.results, ["/content/a"]);

        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["results"], json!(["/content/a"]));
    }

    #[test]
    fn no_matches_formats_a_note() {
        let mock = store_with_nodes();
        let results = full_text(&mock, "/content", "zilch").unwrap();
        assert_eq!(format_results(&results), ["No matches"]);
    }
}
