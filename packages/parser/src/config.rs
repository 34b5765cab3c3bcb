//! Configuration constants and validation functions for the parser.

use std::path::PathBuf;

use url::Url;

use crate::error::{ParserError, Result};

/// Root of the Python 3 documentation.
pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";

/// Root of the PEP index.
pub const PEP_DOC_URL: &str = "https://peps.python.org/";

/// Timestamp format used in result file names.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Timestamp format used in log lines.
pub const LOG_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Log file size that triggers a rotation.
pub const LOG_MAX_BYTES: u64 = 1_000_000;

/// Number of rotated log files kept next to the active one.
pub const LOG_BACKUP_COUNT: usize = 5;

/// Name of the active log file inside the logs directory.
pub const LOG_FILE_NAME: &str = "parser.log";

/// Environment variable overriding the documentation root.
pub const DOCS_URL_ENV: &str = "PYDOCS_DOCS_URL";

/// Environment variable overriding the PEP index root.
pub const PEP_URL_ENV: &str = "PYDOCS_PEP_URL";

/// Environment variable overriding the directory that holds cache, downloads,
/// results and logs.
pub const HOME_ENV: &str = "PYDOCS_HOME";

/// Runtime configuration: where to scrape from and where to write to.
#[derive(Debug, Clone)]
pub struct Config {
    pub docs_url: Url,
    pub pep_url: Url,
    pub home: PathBuf,
}

impl Config {
    /// Build a configuration from explicit values.
    pub fn new(docs_url: &str, pep_url: &str, home: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            docs_url: parse_base_url(docs_url)?,
            pep_url: parse_base_url(pep_url)?,
            home: home.into(),
        })
    }

    /// Read the configuration from the environment, falling back to the
    /// public sites and the current directory.
    pub fn from_env() -> Result<Self> {
        let docs_url = std::env::var(DOCS_URL_ENV).unwrap_or_else(|_| MAIN_DOC_URL.into());
        let pep_url = std::env::var(PEP_URL_ENV).unwrap_or_else(|_| PEP_DOC_URL.into());

        let home = match std::env::var(HOME_ENV) {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            Ok(_) => return Err(ParserError::Config(format!("{HOME_ENV} is empty"))),
            Err(_) => std::env::current_dir()?,
        };

        Self::new(&docs_url, &pep_url, home)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.home.join(".http_cache")
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.home.join("downloads")
    }

    pub fn results_dir(&self) -> PathBuf {
        self.home.join("results")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.home.join("logs")
    }

    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE_NAME)
    }

    /// The what's-new index, relative to the documentation root.
    pub fn whats_new_url(&self) -> Result<Url> {
        Ok(self.docs_url.join("whatsnew/")?)
    }

    /// The downloads page, relative to the documentation root.
    pub fn downloads_url(&self) -> Result<Url> {
        Ok(self.docs_url.join("download.html")?)
    }
}

/// Parse and normalize a base URL.
///
/// Only `http` and `https` are accepted. A trailing slash is appended when
/// missing so that joining relative links keeps the last path segment.
///
/// # Examples
/// ```
/// use pydocs_parser::config::parse_base_url;
///
/// let url = parse_base_url("https://docs.python.org/3").unwrap();
/// assert_eq!(url.as_str(), "https://docs.python.org/3/");
/// assert!(parse_base_url("ftp://docs.python.org/3/").is_err());
/// assert!(parse_base_url("not a url").is_err());
/// ```
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ParserError::Config(format!(
            "unsupported scheme '{}' in base URL {raw}",
            url.scheme()
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
