//! Turns a region descriptor into numbered snippet and ground-truth files.

use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::Path;

use tracing::{Span, debug, info, info_span, warn};

use crate::error::{Error, Result};
use crate::raster::{Ink, Page, PageView, PageVisitor};
use crate::region::{Region, count_png_files};
use crate::segment::{LineCut, cut_lines};

pub const SNIPPET_SUFFIX: &str = ".bin.png";
pub const GROUND_TRUTH_SUFFIX: &str = ".gt.txt";

/// File name of the `index`-th (1-based) snippet image.
pub fn snippet_name(index: usize) -> String {
    format!("{index:06}{SNIPPET_SUFFIX}")
}

/// File name of the `index`-th (1-based) ground-truth line.
pub fn ground_truth_name(index: usize) -> String {
    format!("{index:06}{GROUND_TRUTH_SUFFIX}")
}

/// Why a region was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The output directory already holds more than one image.
    AlreadySegmented { existing: usize },
    /// Zero or one ground-truth line: nothing to split.
    TooFewLines { lines: usize },
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadySegmented { existing } => {
                write!(f, "{existing} images already present")
            }
            SkipReason::TooFewLines { lines } => write!(f, "only {lines} ground-truth lines"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Segment,
    Skip(SkipReason),
}

/// Decides whether a region with `lines` ground-truth lines and `existing`
/// images in its output directory should be segmented.
pub fn plan(lines: usize, existing: usize) -> Plan {
    if existing > 1 {
        Plan::Skip(SkipReason::AlreadySegmented { existing })
    } else if lines <= 1 {
        Plan::Skip(SkipReason::TooFewLines { lines })
    } else {
        Plan::Segment
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Snippet/ground-truth pairs written.
    pub written: usize,
    /// Lines whose band was empty and got no files.
    pub empty: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Skipped(SkipReason),
    Segmented(Summary),
}

/// Runs segmentation for regions, logging into the span it owns.
pub struct Driver {
    span: Span,
}

impl Driver {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    /// Loads the descriptor at `path` and runs it under a span carrying
    /// that path.
    pub fn process_descriptor(path: &Path) -> Result<Outcome> {
        let driver = Self::new(info_span!("region", path = %path.display()));
        let region = {
            let _guard = driver.span.enter();
            Region::load(path)?
        };
        driver.run(&region)
    }

    pub fn run(&self, region: &Region) -> Result<Outcome> {
        let _guard = self.span.enter();

        let lines = region.lines();
        let existing = count_png_files(&region.dir);
        if let Plan::Skip(reason) = plan(lines.len(), existing) {
            info!(%reason, "skipping region");
            return Ok(Outcome::Skipped(reason));
        }

        info!(
            "segmenting {} into {} lines",
            region.image.display(),
            lines.len()
        );
        fs::create_dir_all(&region.dir).map_err(|e| Error::io(&region.dir, e))?;
        let page = Page::open(&region.image)?;
        let (width, height) = page.dimensions();
        debug!(width, height, "decoded page");
        let summary = page.visit(WriteSnippets {
            dir: &region.dir,
            lines: &lines,
        })?;
        info!(
            written = summary.written,
            empty = summary.empty,
            "segmentation finished"
        );
        Ok(Outcome::Segmented(summary))
    }
}

struct WriteSnippets<'a> {
    dir: &'a Path,
    lines: &'a [&'a str],
}

impl PageVisitor for WriteSnippets<'_> {
    type Output = Result<Summary>;

    fn visit<P: Ink>(self, view: PageView<'_, P>) -> Result<Summary> {
        let mut summary = Summary::default();
        for (i, cut) in cut_lines(&view, self.lines.len()).into_iter().enumerate() {
            let LineCut::Snippet(snippet) = cut else {
                warn!("skipping snippet line {}: image is empty", i + 1);
                summary.empty += 1;
                continue;
            };
            summary.written += 1;
            write_artifacts(self.dir, summary.written, &snippet, self.lines[i])?;
        }
        Ok(summary)
    }
}

fn write_artifacts<P: Ink>(
    dir: &Path,
    index: usize,
    snippet: &PageView<'_, P>,
    line: &str,
) -> Result<()> {
    let image_path = dir.join(snippet_name(index));
    snippet.save_png(&image_path)?;

    let gt_path = dir.join(ground_truth_name(index));
    fs::write(&gt_path, format!("{line}\n")).map_err(|e| Error::io(&gt_path, e))?;

    debug!(index, path = %image_path.display(), "wrote snippet");
    Ok(())
}
