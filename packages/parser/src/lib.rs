//! Python documentation parser.
//!
//! This crate scrapes docs.python.org and peps.python.org into small
//! tables: release notes per version, documented versions with their
//! status, PEP counts per status, and the A4 PDF documentation archive.
//!
//! # Example
//!
//! ```
//! use pydocs_parser::html::{find_tag, flat_text, PageDocument, TagQuery};
//!
//! let doc = PageDocument::parse(r#"<div class="sphinxsidebarwrapper"><h3>Navigation</h3></div>"#);
//! let sidebar = find_tag(&doc, &TagQuery::tag("div").attr("class", "sphinxsidebarwrapper")).unwrap();
//! assert_eq!(flat_text(sidebar), "Navigation");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, base URLs and directories
//! - [`error`]: Error types and Result alias
//! - [`cache`]: On-disk response cache
//! - [`http`]: Session and page fetching
//! - [`html`]: Parsed pages and element lookup
//! - [`status`]: PEP status codes and reconciliation
//! - [`types`]: Result tables and the PEP tally
//! - [`modes`]: Extraction routines and the mode dispatcher
//! - [`output`]: Plain, table and CSV output
//! - [`logging`]: Tracing setup with a rotating log file
//! - [`cli`]: Command-line interface

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod files;
pub mod html;
pub mod http;
pub mod logging;
pub mod modes;
pub mod output;
pub mod status;
pub mod types;

// Re-export commonly used items
pub use config::Config;
pub use error::{ParserError, Result};
pub use http::{get_response, Session};
pub use modes::Mode;
pub use status::{reconcile, StatusCode};
pub use types::{ExtractionResult, PepTally};
