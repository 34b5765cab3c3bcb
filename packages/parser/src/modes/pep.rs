//! PEP status tally, cross-checked against each PEP's own page.

use crate::config::Config;
use crate::error::{ParserError, Result};
use crate::html::{attribute, find_all, find_tag, find_tags, flat_text, TagQuery};
use crate::http::{get_response, Session};
use crate::status::reconcile;
use crate::types::{ExtractionResult, PepTally};

use super::progress_bar;

/// Status code of an index cell: the first character is the PEP type, the
/// rest is the status abbreviation.
///
/// # Examples
/// ```
/// use pydocs_parser::modes::strip_type_glyph;
///
/// assert_eq!(strip_type_glyph("PA"), "A");
/// assert_eq!(strip_type_glyph("S"), "");
/// assert_eq!(strip_type_glyph(""), "");
/// ```
pub fn strip_type_glyph(cell: &str) -> String {
    cell.chars().skip(1).collect()
}

/// Count PEPs per actual status.
pub fn pep_tally(session: &Session, config: &Config) -> Result<PepTally> {
    let page = get_response(session, config.pep_url.as_str())?;
    let doc = page.document();

    let index = find_tag(
        &doc,
        &TagQuery::tag("section").attr("id", "index-by-category"),
    )?;
    let rows = find_tags(index, &TagQuery::tag("tr"))?;

    let mut tally = PepTally::default();
    let pb = progress_bar(rows.len(), "pep");

    for row in rows {
        pb.inc(1);
        let cells = find_all(row, &TagQuery::tag("td"));
        if cells.is_empty() {
            continue;
        }

        let (Some(status_cell), Some(link_cell)) = (cells.first(), cells.get(1)) else {
            tracing::error!(cells = cells.len(), "PEP index row has fewer than two cells");
            return Err(ParserError::TagNotFound {
                query: "<td> (second cell of a PEP index row)".to_string(),
            });
        };

        let status_code = strip_type_glyph(&flat_text(*status_cell));
        let anchor = find_tag(*link_cell, &TagQuery::tag("a"))?;
        let pep_link = config.pep_url.join(attribute(anchor, "href")?)?;

        let actual = reconcile(session, &status_code, pep_link.as_str())?;
        tally.record(&actual);
    }

    pb.finish_and_clear();
    tracing::info!(total = tally.total(), "Counted PEPs");
    Ok(tally)
}

/// Tabular PEP tally: status, count, and a closing total line.
pub fn pep(session: &Session, config: &Config) -> Result<ExtractionResult> {
    pep_tally(session, config).map(|tally| tally.to_result())
}
