//! Document title extraction.

use std::sync::LazyLock;

use regex::Regex;

/// First level-one ATX heading on any line: a single `#`, whitespace, text.
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(\S.*)$").unwrap());

/// Extract the text of the first `# ` heading line in `content`.
///
/// The heading does not have to be on the first line. `## Sub` and `#tag`
/// are not headings. The heading text is kept as written, except for the
/// `\r` of CRLF files.
///
/// # Examples
///
/// ```
/// use docnav_sidebar::extract_title;
///
/// assert_eq!(extract_title("intro\n# My Title\n"), Some("My Title"));
/// assert_eq!(extract_title("no heading here"), None);
/// ```
#[must_use]
pub fn extract_title(content: &str) -> Option<&str> {
    let caps = H1_RE.captures(content)?;
    caps.get(1)
        .map(|m| m.as_str().strip_suffix('\r').unwrap_or(m.as_str()))
}

/// Display title for a document: its first heading, or `stem` if it has none.
#[must_use]
pub fn document_title(stem: &str, content: &str) -> String {
    extract_title(content).unwrap_or(stem).to_owned()
}
