//! Line parsing for the comma-delimited page import format.
//!
//! Each input line describes one page to create:
//!
//! ```text
//! path,title[,template,tag[,publish]]
//! ```
//!
//! There is no quoting or escaping — fields are split on every comma.
//! Optional fields are bound by field count, and the binding is positional
//! policy, not inference:
//!
//! - 5 fields → path, title, template, tag, publish
//! - 4 fields → path, title, template, tag
//! - 3 fields → path, title, publish (the third field is the publish flag,
//!   NOT a template — the short form skips straight to publishing)
//! - any other count binds no optional fields
//!
//! A line whose path or title is missing or empty never reaches page
//! creation; it is reported as malformed, keyed by the raw line text.

/// One page to create, parsed from a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowInput {
    /// Full target location; the last segment is the page name.
    pub path: String,
    pub title: String,
    /// Template identifier. `None` or empty means "use the default".
    pub template: Option<String>,
    /// Tag identifier resolved against the tag registry. `None` or empty
    /// means "don't tag".
    pub tag: Option<String>,
    /// Publish flag as written in the input. Parsed permissively later:
    /// only a case-insensitive `"true"` publishes.
    pub publish: Option<String>,
}

/// Outcome of parsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Row(RowInput),
    /// The raw line, kept verbatim so the report can key on it.
    Malformed(String),
}

/// Parse a blob of newline-separated lines, one [`ParsedLine`] per line.
///
/// Single pass, lazy, input order. Blank lines parse as malformed (they
/// have no path or title), which keeps the one-result-per-line contract.
pub fn parse_lines(input: &str) -> impl Iterator<Item = ParsedLine> + '_ {
    input.lines().map(parse_line)
}

/// Parse one line according to the field-count dispatch table.
pub fn parse_line(line: &str) -> ParsedLine {
    let fields: Vec<&str> = line.split(',').collect();

    let (template, tag, publish) = match fields.len() {
        5 => (Some(fields[2]), Some(fields[3]), Some(fields[4])),
        4 => (Some(fields[2]), Some(fields[3]), None),
        // Short form: path,title,publish. The third field binds to the
        // publish flag here, never to a template.
        3 => (None, None, Some(fields[2])),
        _ => (None, None, None),
    };

    if fields.len() < 2 || fields[0].is_empty() || fields[1].is_empty() {
        return ParsedLine::Malformed(line.to_string());
    }

    ParsedLine::Row(RowInput {
        path: fields[0].to_string(),
        title: fields[1].to_string(),
        template: template.map(str::to_string),
        tag: tag.map(str::to_string),
        publish: publish.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: &str) -> RowInput {
        match parse_line(line) {
            ParsedLine::Row(r) => r,
            ParsedLine::Malformed(l) => panic!("expected row, got malformed: {l:?}"),
        }
    }

    #[test]
    fn five_fields_bind_everything() {
        let r = row("/content/a,Title,/templates/t,marketing/interest,true");
        assert_eq!(r.path, "/content/a");
        assert_eq!(r.title, "Title");
        assert_eq!(r.template.as_deref(), Some("/templates/t"));
        assert_eq!(r.tag.as_deref(), Some("marketing/interest"));
        assert_eq!(r.publish.as_deref(), Some("true"));
    }

    #[test]
    fn four_fields_bind_template_and_tag_only() {
        let r = row("/content/a,Title,/templates/t,marketing/interest");
        assert_eq!(r.template.as_deref(), Some("/templates/t"));
        assert_eq!(r.tag.as_deref(), Some("marketing/interest"));
        assert_eq!(r.publish, None);
    }

    #[test]
    fn three_fields_bind_publish_not_template() {
        // The asymmetry under test: stripping trailing template/tag from a
        // 5-field line re-routes the third field to publish.
        let r = row("/content/a,Title,true");
        assert_eq!(r.template, None);
        assert_eq!(r.tag, None);
        assert_eq!(r.publish.as_deref(), Some("true"));

        let long = row("/content/a,Title,true,,");
        assert_eq!(long.template.as_deref(), Some("true"));
        assert_eq!(long.publish.as_deref(), Some(""));
    }

    #[test]
    fn two_fields_bind_no_optionals() {
        let r = row("/content/a,Title");
        assert_eq!(r.template, None);
        assert_eq!(r.tag, None);
        assert_eq!(r.publish, None);
    }

    #[test]
    fn six_fields_bind_no_optionals() {
        let r = row("/content/a,Title,x,y,z,w");
        assert_eq!(r.path, "/content/a");
        assert_eq!(r.template, None);
        assert_eq!(r.tag, None);
        assert_eq!(r.publish, None);
    }

    #[test]
    fn single_field_is_malformed() {
        assert_eq!(parse_line("badrow"), ParsedLine::Malformed("badrow".into()));
    }

    #[test]
    fn empty_path_is_malformed() {
        assert_eq!(
            parse_line(",Title,true"),
            ParsedLine::Malformed(",Title,true".into())
        );
    }

    #[test]
    fn empty_title_is_malformed() {
        assert_eq!(
            parse_line("/content/a,,true"),
            ParsedLine::Malformed("/content/a,,true".into())
        );
    }

    #[test]
    fn blank_line_is_malformed() {
        assert_eq!(parse_line(""), ParsedLine::Malformed(String::new()));
    }

    #[test]
    fn empty_optional_fields_survive_as_empty_strings() {
        let r = row("/content/a,Title A,,,true");
        assert_eq!(r.template.as_deref(), Some(""));
        assert_eq!(r.tag.as_deref(), Some(""));
        assert_eq!(r.publish.as_deref(), Some("true"));
    }

    #[test]
    fn parse_lines_preserves_input_order() {
        let parsed: Vec<ParsedLine> = parse_lines("/a/b,B\nbad\n/a/c,C,true").collect();
        assert_eq!(parsed.len(), 3);
        assert!(matches!(&parsed[0], ParsedLine::Row(r) if r.path == "/a/b"));
        assert_eq!(parsed[1], ParsedLine::Malformed("bad".into()));
        assert!(matches!(&parsed[2], ParsedLine::Row(r) if r.publish.as_deref() == Some("true")));
    }

    #[test]
    fn crlf_input_does_not_leak_carriage_returns_into_paths() {
        let parsed: Vec<ParsedLine> = parse_lines("/a/b,B\r\n/a/c,C").collect();
        assert!(matches!(&parsed[0], ParsedLine::Row(r) if r.title == "B"));
    }
}
