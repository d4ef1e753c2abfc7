//! Per-file conversion: `NAME.SECTION.md` in, `NAME.SECTION` and
//! `NAME.SECTION.html` out.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::markdown::{CommonMark, MarkdownRenderer};
use crate::man::PageInfo;
use crate::util::decode_text;
use crate::{Document, convert_with};

/// Date format of the page footer, e.g. `06 Aug 2020`.
pub const DATE_FORMAT: &str = "%d %b %Y";

/// Program name and manual section parsed from a source file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceName {
    pub program: String,
    pub section: String,
}

impl SourceName {
    /// Parse `NAME.SECTION.md`, e.g. `rsync.1.md` or `rsyncd.conf.5.md`.
    pub fn parse(path: &Path) -> Result<Self> {
        let invalid = || {
            Error::InvalidInputName(format!(
                "{}: expected a file named NAME.SECTION.md",
                path.display()
            ))
        };

        let file_name = path.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;
        let stem = file_name.strip_suffix(".md").ok_or_else(invalid)?;
        let (program, section) = stem.rsplit_once('.').ok_or_else(invalid)?;
        if program.is_empty() || !section.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(invalid());
        }

        Ok(Self {
            program: program.to_string(),
            section: section.to_string(),
        })
    }

    /// File name of the nroff output, e.g. `rsync.1`.
    pub fn man_file_name(&self) -> String {
        format!("{}.{}", self.program, self.section)
    }

    /// File name of the HTML output, e.g. `rsync.1.html`.
    pub fn html_file_name(&self) -> String {
        format!("{}.{}.html", self.program, self.section)
    }
}

/// Which documents [`ManPage::write`] puts on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Outputs {
    #[default]
    Both,
    HtmlOnly,
    ManOnly,
}

/// A converted manual page, held in memory until written.
#[derive(Debug, Clone)]
pub struct ManPage {
    pub info: PageInfo,
    pub document: Document,
    pub man_path: PathBuf,
    pub html_path: PathBuf,
}

impl ManPage {
    /// Convert the source file at `path` with the CommonMark renderer.
    ///
    /// Outputs are placed next to the source unless `dest` is given.
    pub fn load(path: &Path, config: &Config, dest: Option<&Path>) -> Result<Self> {
        Self::load_with(&CommonMark, path, config, dest)
    }

    pub fn load_with<R: MarkdownRenderer + ?Sized>(
        renderer: &R,
        path: &Path,
        config: &Config,
        dest: Option<&Path>,
    ) -> Result<Self> {
        let name = SourceName::parse(path)?;
        let bytes = fs::read(path)?;
        let source = decode_text(&bytes);
        let markdown = config.substitute(&source);

        let info = config.page_info(&name.program, &name.section, &file_date(path));
        let document = convert_with(renderer, &markdown, &info)?;

        let dir = match dest {
            Some(dir) => dir.to_path_buf(),
            None => path.parent().map(Path::to_path_buf).unwrap_or_default(),
        };

        Ok(Self {
            info,
            document,
            man_path: dir.join(name.man_file_name()),
            html_path: dir.join(name.html_file_name()),
        })
    }

    pub fn write(&self, outputs: Outputs) -> Result<()> {
        if outputs != Outputs::HtmlOnly {
            fs::write(&self.man_path, &self.document.man)?;
            info!(path = %self.man_path.display(), "wrote man page");
        }
        if outputs != Outputs::ManOnly {
            fs::write(&self.html_path, &self.document.html)?;
            info!(path = %self.html_path.display(), "wrote html page");
        }
        Ok(())
    }
}

/// The source file's modification date, or today if it cannot be read.
fn file_date(path: &Path) -> String {
    let time = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(DateTime::<Local>::from)
        .unwrap_or_else(|_| Local::now());
    time.format(DATE_FORMAT).to_string()
}
