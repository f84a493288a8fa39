//! Batch pipeline: discover captured thread snapshots, normalize each with
//! shared options, and write the selected export formats. A snapshot that
//! fails to parse is logged and skipped; the run continues.

use crate::config::{ExportFormat, MinerOptions};
use crate::csv::to_csv;
use crate::flatten::normalize;
use crate::insights::{analyze, render_insights, InsightOptions};
use crate::markdown::to_markdown;
use crate::options::DepthFilter;
use crate::paths::{discover_snapshots, SnapshotJob};
use crate::progress::make_count_progress;
use crate::snapshot::{read_raw_snapshot, write_normalized};
use crate::util::init_tracing_once;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

#[derive(Clone)]
pub struct ThreadMiner {
    pub(crate) opts: MinerOptions,
}

/// Outcome of a batch run.
#[derive(Debug)]
pub struct MinerSummary {
    pub processed: usize,
    pub failed: Vec<(PathBuf, String)>,
}

impl ThreadMiner {
    pub fn new() -> Self {
        Self {
            opts: MinerOptions::default(),
        }
    }

    // -------- Builder methods --------
    pub fn input_dir(mut self, dir: impl AsRef<std::path::Path>) -> Self {
        self.opts = self.opts.with_input_dir(dir);
        self
    }
    pub fn output_dir(mut self, dir: impl AsRef<std::path::Path>) -> Self {
        self.opts = self.opts.with_output_dir(dir);
        self
    }
    pub fn formats<I>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = ExportFormat>,
    {
        self.opts = self.opts.with_formats(formats);
        self
    }
    pub fn depth(mut self, depth: DepthFilter) -> Self {
        self.opts = self.opts.with_depth(depth);
        self
    }
    pub fn min_score(mut self, min: i64) -> Self {
        self.opts = self.opts.with_min_score(min);
        self
    }
    pub fn max_comments(mut self, cap: usize) -> Self {
        self.opts = self.opts.with_max_comments(cap);
        self
    }
    pub fn keywords<I, S>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opts = self.opts.with_keywords(iter);
        self
    }
    pub fn pretty_json(mut self, yes: bool) -> Self {
        self.opts = self.opts.with_pretty_json(yes);
        self
    }
    pub fn file_concurrency(mut self, n: usize) -> Self {
        self.opts = self.opts.with_file_concurrency(n);
        self
    }
    pub fn progress(mut self, yes: bool) -> Self {
        self.opts = self.opts.with_progress(yes);
        self
    }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self {
        self.opts = self.opts.with_progress_label(label);
        self
    }

    /// Discover, normalize, and export every snapshot under the input dir.
    pub fn run(self) -> Result<MinerSummary> {
        init_tracing_once();

        let jobs = discover_snapshots(&self.opts.input_dir);
        if jobs.is_empty() {
            tracing::warn!(
                "No snapshots found under {}. Check input_dir.",
                self.opts.input_dir.display()
            );
        } else {
            tracing::info!("Planned {} snapshots for processing.", jobs.len());
        }

        fs::create_dir_all(&self.opts.output_dir)
            .with_context(|| format!("create {}", self.opts.output_dir.display()))?;

        let pb = if self.opts.progress {
            let label = self
                .opts
                .progress_label
                .as_deref()
                .unwrap_or("Normalizing threads");
            Some(make_count_progress(jobs.len() as u64, label))
        } else {
            None
        };

        let failed = parking_lot::Mutex::new(Vec::<(PathBuf, String)>::new());

        crate::concurrency::for_each_job_limited(&jobs, self.opts.file_concurrency, |job| {
            if let Err(e) = self.process_job(job) {
                tracing::warn!(path=%job.path.display(), error=%e, "skipping snapshot");
                failed.lock().push((job.path.clone(), e.to_string()));
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            Ok(())
        })?;

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        let failed = failed.into_inner();
        Ok(MinerSummary {
            processed: jobs.len() - failed.len(),
            failed,
        })
    }

    fn process_job(&self, job: &SnapshotJob) -> Result<()> {
        let listings = read_raw_snapshot(&job.path)?;
        let data = normalize(&listings, &self.opts.normalize)?;

        for fmt in &self.opts.formats {
            match fmt {
                ExportFormat::Json => {
                    let out = self.opts.output_dir.join(format!("{}.normalized.json", job.stem));
                    write_normalized(&out, &data, self.opts.pretty_json)?;
                }
                ExportFormat::Markdown => {
                    let out = self.opts.output_dir.join(format!("{}.md", job.stem));
                    fs::write(&out, to_markdown(&data))
                        .with_context(|| format!("write {}", out.display()))?;
                }
                ExportFormat::Csv => {
                    let out = self.opts.output_dir.join(format!("{}.csv", job.stem));
                    fs::write(&out, to_csv(&data))
                        .with_context(|| format!("write {}", out.display()))?;
                }
                ExportFormat::Insights => {
                    let insight_opts =
                        InsightOptions::default().with_keywords(self.opts.keywords.iter());
                    let report = analyze(&data, &insight_opts);
                    let out = self.opts.output_dir.join(format!("{}.insights.md", job.stem));
                    fs::write(&out, render_insights(&report))
                        .with_context(|| format!("write {}", out.display()))?;
                }
            }
        }
        Ok(())
    }
}
