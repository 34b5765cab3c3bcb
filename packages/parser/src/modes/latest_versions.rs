//! Documentation versions listed in the docs sidebar.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;
use crate::error::{ParserError, Result};
use crate::html::{attribute, find_tag, find_tags, flat_text, TagQuery};
use crate::http::{get_response, Session};
use crate::types::ExtractionResult;

const HEADER: [&str; 3] = ["Link to documentation", "Version", "Status"];

/// Marker text of the sidebar list that holds the version links.
const VERSIONS_MARKER: &str = "All versions";

/// Link text pattern: `Python 3.13 (stable)`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)").expect("valid regex")
});

/// Version and status read from a link text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionLabel {
    /// The text follows the `Python X.Y (status)` pattern.
    Matched { version: String, status: String },
    /// Anything else; the whole text stands in for the version.
    Raw(String),
}

impl VersionLabel {
    /// # Examples
    /// ```
    /// use pydocs_parser::modes::VersionLabel;
    ///
    /// assert_eq!(
    ///     VersionLabel::parse("Python 3.11 (stable)").into_fields(),
    ///     ("3.11".to_string(), "stable".to_string())
    /// );
    /// assert_eq!(
    ///     VersionLabel::parse("Some Other Link").into_fields(),
    ///     ("Some Other Link".to_string(), String::new())
    /// );
    /// ```
    pub fn parse(text: &str) -> Self {
        match VERSION_PATTERN.captures(text) {
            Some(caps) => Self::Matched {
                version: caps["version"].to_string(),
                status: caps["status"].to_string(),
            },
            None => Self::Raw(text.to_string()),
        }
    }

    /// `(version, status)`; the status is empty for raw labels.
    pub fn into_fields(self) -> (String, String) {
        match self {
            Self::Matched { version, status } => (version, status),
            Self::Raw(text) => (text, String::new()),
        }
    }
}

/// List every documented Python version with its status.
pub fn latest_versions(session: &Session, config: &Config) -> Result<ExtractionResult> {
    let page = get_response(session, config.docs_url.as_str())?;
    let doc = page.document();

    let sidebar = find_tag(
        &doc,
        &TagQuery::tag("div").attr("class", "sphinxsidebarwrapper"),
    )?;
    let lists = find_tags(sidebar, &TagQuery::tag("ul"))?;

    let Some(versions) = lists
        .into_iter()
        .find(|ul| flat_text(*ul).contains(VERSIONS_MARKER))
    else {
        tracing::error!(marker = VERSIONS_MARKER, "No version list in sidebar");
        return Err(ParserError::NothingFound(format!(
            "no sidebar list mentions '{VERSIONS_MARKER}'"
        )));
    };

    let mut results = ExtractionResult::new(&HEADER);
    for anchor in find_tags(versions, &TagQuery::tag("a"))? {
        let link = attribute(anchor, "href")?;
        let (version, status) = VersionLabel::parse(&flat_text(anchor)).into_fields();
        results.push(vec![link.to_string(), version, status])?;
    }

    Ok(results)
}
