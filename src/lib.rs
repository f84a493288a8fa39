mod config;
mod error;
mod listing;
mod options;
mod thread;

mod csv;
mod flatten;
mod insights;
mod markdown;

mod concurrency;
mod paths;
mod pipeline;
mod progress;
mod snapshot;
mod util;

pub use crate::config::{ExportFormat, MinerOptions};
pub use crate::error::MineError;
pub use crate::listing::{CommentData, Edited, ListingData, MoreData, PostData, RawListing, RawNode};
pub use crate::options::{DepthFilter, NormalizeOptions};
pub use crate::thread::{NormalizedComment, NormalizedData, NormalizedThread, ThreadMeta};

// The core transformation and its derived views.
pub use crate::csv::to_csv;
pub use crate::flatten::normalize;
pub use crate::insights::{analyze, render_insights, InsightOptions, InsightsReport, KeywordHit, TopComment};
pub use crate::markdown::to_markdown;

// Snapshot I/O and the batch pipeline.
pub use crate::paths::{discover_snapshots, SnapshotJob};
pub use crate::pipeline::{MinerSummary, ThreadMiner};
pub use crate::snapshot::{read_normalized, read_raw_snapshot, write_normalized};

// Expose progress + tracing helpers so binaries can reuse them.
pub use crate::progress::make_count_progress;
pub use crate::util::{init_tracing_once, iso_from_epoch, now_iso};
