//! Release notes ("What's New") for every Python version.

use crate::config::Config;
use crate::error::Result;
use crate::html::{attribute, find_tag, find_tags, flat_text, TagQuery};
use crate::http::{get_response, Session};
use crate::types::ExtractionResult;

use super::progress_bar;

const HEADER: [&str; 3] = ["Link to article", "Title", "Editor, author"];

/// Follow every version link of the what's-new index and collect its title
/// and editor credits.
pub fn whats_new(session: &Session, config: &Config) -> Result<ExtractionResult> {
    let whats_new_url = config.whats_new_url()?;
    let page = get_response(session, whats_new_url.as_str())?;
    let doc = page.document();

    let main_section = find_tag(
        &doc,
        &TagQuery::tag("section").attr("id", "what-s-new-in-python"),
    )?;
    let toc = find_tag(
        main_section,
        &TagQuery::tag("div").attr("class", "toctree-wrapper"),
    )?;
    let sections = find_tags(toc, &TagQuery::tag("li").attr("class", "toctree-l1"))?;

    let mut results = ExtractionResult::new(&HEADER);
    let pb = progress_bar(sections.len(), "whats-new");

    for section in sections {
        let anchor = find_tag(section, &TagQuery::tag("a"))?;
        let version_link = whats_new_url.join(attribute(anchor, "href")?)?;

        let version_page = get_response(session, version_link.as_str())?;
        let version_doc = version_page.document();
        let h1 = find_tag(&version_doc, &TagQuery::tag("h1"))?;
        let dl = find_tag(&version_doc, &TagQuery::tag("dl"))?;
        let credits = flat_text(dl).replace('\n', " ");

        results.push(vec![version_link.to_string(), flat_text(h1), credits])?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    tracing::info!(versions = results.len(), "Collected release notes");
    Ok(results)
}
