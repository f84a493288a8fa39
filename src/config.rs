use crate::options::{DepthFilter, NormalizeOptions};
use std::path::{Path, PathBuf};

/// Export format toggle for batch runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
    Csv,
    Insights,
}

/// User-facing batch options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct MinerOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub formats: Vec<ExportFormat>,
    pub normalize: NormalizeOptions,
    pub keywords: Vec<String>, // insights keyword list
    pub pretty_json: bool,
    pub file_concurrency: usize, // limit number of snapshots processed concurrently
    pub progress: bool,
    pub progress_label: Option<String>,
}

impl Default for MinerOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./threads"),
            output_dir: PathBuf::from("./out"),
            formats: vec![ExportFormat::Json],
            normalize: NormalizeOptions::default(),
            keywords: Vec::new(),
            pretty_json: true,
            file_concurrency: 1, // safe default; snapshots are small but callers opt in
            progress: true,
            progress_label: None,
        }
    }
}

impl MinerOptions {
    pub fn with_input_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.input_dir = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_formats<I>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = ExportFormat>,
    {
        self.formats = formats.into_iter().collect();
        self
    }
    pub fn with_depth(mut self, depth: DepthFilter) -> Self {
        self.normalize.depth = depth;
        self
    }
    pub fn with_min_score(mut self, min: i64) -> Self {
        self.normalize.min_score = Some(min);
        self
    }
    pub fn with_max_comments(mut self, cap: usize) -> Self {
        self.normalize.max_comments = Some(cap);
        self
    }
    pub fn with_keywords<I, S>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = iter.into_iter().map(Into::into).collect();
        self
    }
    pub fn with_pretty_json(mut self, yes: bool) -> Self {
        self.pretty_json = yes;
        self
    }
    pub fn with_file_concurrency(mut self, n: usize) -> Self {
        self.file_concurrency = n.max(1);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
}
