//! Extraction routines and the mode dispatcher.
//!
//! Each routine is a single sequential pass over the pages it needs. The
//! first missing element or failed fetch aborts the routine; partial results
//! are never returned.

mod download;
mod latest_versions;
mod pep;
mod whats_new;

use std::fmt;

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};

use crate::config::Config;
use crate::error::Result;
use crate::http::Session;
use crate::types::ExtractionResult;

pub use download::{archive_file_name, download};
pub use latest_versions::{latest_versions, VersionLabel};
pub use pep::{pep, pep_tally, strip_type_glyph};
pub use whats_new::whats_new;

/// Parser mode selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Release notes of every Python version.
    WhatsNew,
    /// Documentation links with version and status.
    LatestVersions,
    /// A4 PDF documentation archive.
    Download,
    /// PEP counts per status, cross-checked against each PEP's page.
    Pep,
}

impl Mode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhatsNew => "whats-new",
            Self::LatestVersions => "latest-versions",
            Self::Download => "download",
            Self::Pep => "pep",
        }
    }

    /// Run the routine for this mode once.
    ///
    /// Returns `None` for modes that write a file instead of producing a
    /// table.
    pub fn run(self, session: &Session, config: &Config) -> Result<Option<ExtractionResult>> {
        match self {
            Self::WhatsNew => whats_new(session, config).map(Some),
            Self::LatestVersions => latest_versions(session, config).map(Some),
            Self::Pep => pep(session, config).map(Some),
            Self::Download => download(session, config).map(|_| None),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress bar for a loop over `len` pages; hidden when stderr is not a
/// terminal.
fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    styled_bar(ProgressBar::new(len as u64), message)
}

/// Apply the loop style to `pb`. The bar clears itself when dropped, so an
/// aborted routine leaves no partial bar behind.
fn styled_bar(pb: ProgressBar, message: &'static str) -> ProgressBar {
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.green}] {pos}/{len}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.with_finish(ProgressFinish::AndClear)
}
