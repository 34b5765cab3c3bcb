//! Download of the A4 PDF documentation archive.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::Config;
use crate::error::{ParserError, Result};
use crate::files::write_atomic;
use crate::html::{attribute, find_tag, TagQuery};
use crate::http::{get_response, Session};

/// Link to the zipped A4 PDF build.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ARCHIVE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+pdf-a4\.zip$").expect("valid regex"));

/// Last path segment of an archive URL.
///
/// # Examples
/// ```
/// use pydocs_parser::modes::archive_file_name;
/// use url::Url;
///
/// let url = Url::parse("https://docs.python.org/3/archives/python-3.13-docs-pdf-a4.zip").unwrap();
/// assert_eq!(archive_file_name(&url).unwrap(), "python-3.13-docs-pdf-a4.zip");
/// ```
pub fn archive_file_name(url: &Url) -> Result<String> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ParserError::NothingFound(format!("no file name in archive URL {url}")))
}

/// Find the A4 PDF archive on the downloads page, fetch it and save it in the
/// downloads directory. Returns the path of the saved file.
pub fn download(session: &Session, config: &Config) -> Result<PathBuf> {
    let downloads_url = config.downloads_url()?;
    let page = get_response(session, downloads_url.as_str())?;
    let doc = page.document();

    let main_div = find_tag(&doc, &TagQuery::tag("div").attr("class", "document"))?;
    let table = find_tag(main_div, &TagQuery::tag("table").attr("class", "docutils"))?;
    let anchor = find_tag(
        table,
        &TagQuery::tag("a").attr_matching("href", ARCHIVE_PATTERN.clone()),
    )?;

    let archive_url = downloads_url.join(attribute(anchor, "href")?)?;
    let archive_path = config.downloads_dir().join(archive_file_name(&archive_url)?);

    let archive = get_response(session, archive_url.as_str())?;
    write_atomic(&archive_path, archive.bytes())?;

    tracing::info!(
        url = archive.url(),
        path = %archive_path.display(),
        bytes = archive.bytes().len(),
        "Archive downloaded and saved"
    );
    Ok(archive_path)
}
