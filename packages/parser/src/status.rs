//! PEP status codes and the expected-vs-actual status check.
//!
//! The PEP index abbreviates each proposal's status to a single letter. The
//! detail page of every PEP states the full status. This module maps each
//! letter to the labels considered consistent with it and compares them with
//! what the detail page actually says.

use std::fmt;
use std::str::FromStr;

use crate::error::{ParserError, Result};
use crate::html::{find_next, find_tag, flat_text, PageDocument, TagQuery};
use crate::http::{get_response, Session};

/// Status abbreviation used in the PEP index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// `A`
    Accepted,
    /// `D`
    Deferred,
    /// `F`
    Final,
    /// `P`
    Provisional,
    /// `R`
    Rejected,
    /// `S`
    Superseded,
    /// `W`
    Withdrawn,
    /// Empty code: draft or active proposals.
    Draft,
}

impl StatusCode {
    pub const ALL: [StatusCode; 8] = [
        Self::Accepted,
        Self::Deferred,
        Self::Final,
        Self::Provisional,
        Self::Rejected,
        Self::Superseded,
        Self::Withdrawn,
        Self::Draft,
    ];

    /// The letter as it appears in the index.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "A",
            Self::Deferred => "D",
            Self::Final => "F",
            Self::Provisional => "P",
            Self::Rejected => "R",
            Self::Superseded => "S",
            Self::Withdrawn => "W",
            Self::Draft => "",
        }
    }

    /// Labels a detail page may show for this code.
    #[must_use]
    pub fn expected(&self) -> &'static [&'static str] {
        match self {
            Self::Accepted => &["Active", "Accepted"],
            Self::Deferred => &["Deferred"],
            Self::Final => &["Final"],
            Self::Provisional => &["Provisional"],
            Self::Rejected => &["Rejected"],
            Self::Superseded => &["Superseded"],
            Self::Withdrawn => &["Withdrawn"],
            Self::Draft => &["Draft", "Active"],
        }
    }

    pub fn accepts(&self, actual: &str) -> bool {
        self.expected().iter().any(|label| *label == actual)
    }
}

impl FromStr for StatusCode {
    type Err = ParserError;

    /// # Examples
    /// ```
    /// use pydocs_parser::status::StatusCode;
    ///
    /// assert_eq!("A".parse::<StatusCode>().unwrap(), StatusCode::Accepted);
    /// assert_eq!("".parse::<StatusCode>().unwrap(), StatusCode::Draft);
    /// assert!("X".parse::<StatusCode>().is_err());
    /// ```
    fn from_str(code: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == code)
            .ok_or_else(|| ParserError::UnknownStatusCode(code.to_string()))
    }
}

/// Actual status on a detail page that is not among the expected labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMismatch {
    pub url: String,
    pub actual: String,
    pub expected: &'static [&'static str],
}

impl fmt::Display for StatusMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mismatched PEP status: card {}, status on card '{}', expected {:?}",
            self.url, self.actual, self.expected
        )
    }
}

/// Compare an actual status with the labels expected for `code`.
pub fn check_status(code: StatusCode, url: &str, actual: &str) -> Option<StatusMismatch> {
    if code.accepts(actual) {
        None
    } else {
        Some(StatusMismatch {
            url: url.to_string(),
            actual: actual.to_string(),
            expected: code.expected(),
        })
    }
}

/// Read the status field from a PEP detail page.
pub fn extract_actual_status(doc: &PageDocument) -> Result<String> {
    let content = find_tag(doc, &TagQuery::any().attr("id", "pep-content"))?;
    let fields = find_tag(
        content,
        &TagQuery::tag("dl").attr("class", "rfc2822 field-list simple"),
    )?;
    let term = find_tag(fields, &TagQuery::any().text("Status"))?;
    let value = find_next(term, &TagQuery::tag("dd"))?;
    Ok(flat_text(value))
}

/// Fetch a PEP detail page and return its actual status.
///
/// Unknown codes fail before anything is fetched. A status outside the
/// expected labels is logged and returned anyway.
pub fn reconcile(session: &Session, status_code: &str, url: &str) -> Result<String> {
    let code: StatusCode = status_code.parse()?;

    let page = get_response(session, url)?;
    let actual = extract_actual_status(&page.document())?;

    if let Some(mismatch) = check_status(code, url, &actual) {
        tracing::warn!(
            url = %mismatch.url,
            actual = %mismatch.actual,
            expected = ?mismatch.expected,
            "{mismatch}"
        );
    }

    Ok(actual)
}
