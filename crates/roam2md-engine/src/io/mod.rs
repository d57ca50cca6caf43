use crate::convert::RenderedPage;
use crate::models::PageKind;
use relative_path::{RelativePath, RelativePathBuf};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Subdirectories that daily and weekly pages are filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub daily_dir: String,
    pub weekly_dir: String,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            daily_dir: "daily".to_string(),
            weekly_dir: "weekly_plans".to_string(),
        }
    }
}

/// Path of a page's file relative to the output root.
///
/// A `/` in the title nests the file in subdirectories. `.` and `..`
/// segments are escaped so every file stays under the output root.
pub fn destination(page: &RenderedPage, layout: &OutputLayout) -> RelativePathBuf {
    let file_name = format!("{}.md", escape_dot_segments(&page.title));
    match page.kind {
        PageKind::Ordinary => RelativePathBuf::from(file_name),
        PageKind::Daily => RelativePath::new(&layout.daily_dir).join(file_name),
        PageKind::Weekly => RelativePath::new(&layout.weekly_dir).join(file_name),
    }
}

fn escape_dot_segments(title: &str) -> String {
    title
        .split('/')
        .map(|segment| match segment {
            "." | ".." => segment.replace('.', "%2E"),
            _ => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// YAML front matter for a page.
pub fn front_matter(page: &RenderedPage) -> String {
    format!(
        "---\ntitle:   {}\ncreated: {}\n---\n\n",
        page.title,
        page.created.format("%Y-%m-%d")
    )
}

/// Full file contents: front matter then the rendered lines.
pub fn page_contents(page: &RenderedPage) -> String {
    let mut contents = front_matter(page);
    contents.push_str(&page.lines.join("\n"));
    contents
}

/// Write one page under `root`, creating parent directories as needed.
pub fn write_page(
    page: &RenderedPage,
    root: &Path,
    layout: &OutputLayout,
) -> Result<PathBuf, IoError> {
    let absolute_path = destination(page, layout).to_path(root);
    let io_err = |source| IoError::Io {
        path: absolute_path.clone(),
        source,
    };

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(&absolute_path, page_contents(page)).map_err(io_err)?;

    log::debug!("wrote {}", absolute_path.display());
    Ok(absolute_path)
}

/// A page that could not be written, kept whole so it can be replayed.
#[derive(Debug)]
pub struct WriteFailure {
    pub page: RenderedPage,
    pub error: IoError,
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: >{}<", self.page.title)?;
        writeln!(f, "Content:")?;
        for line in &self.page.lines {
            writeln!(f, "    {line}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<WriteFailure>,
}

/// Write every page. A failed write is recorded and the rest still go out.
pub fn write_pages(pages: Vec<RenderedPage>, root: &Path, layout: &OutputLayout) -> WriteReport {
    let mut report = WriteReport::default();

    for page in pages {
        match write_page(&page, root, layout) {
            Ok(path) => report.written.push(path),
            Err(error) => {
                log::warn!("could not write page {:?}: {error}", page.title);
                report.failures.push(WriteFailure { page, error });
            }
        }
    }

    log::info!(
        "wrote {} pages to {} ({} failed)",
        report.written.len(),
        root.display(),
        report.failures.len()
    );
    report
}
