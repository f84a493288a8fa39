//! Normalized thread records: the flat, depth-annotated, ID-linked shape the
//! formatters and the cache collaborator consume. All types round-trip
//! losslessly through JSON.

use crate::options::DepthFilter;
use serde::{Deserialize, Serialize};

/// One per mined URL. Created once per fetch, immutable thereafter.
/// Epoch seconds and the derived RFC3339 string are both retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedThread {
    pub id: String,
    pub title: String,
    pub selftext: String,
    pub selftext_html: Option<String>,
    pub author: String,
    pub subreddit: String,
    pub score: i64,
    pub upvote_ratio: f64,
    pub num_comments: i64,
    pub created_at: String,
    pub created_utc: i64,
    pub permalink: String,
    pub url: String,
    pub is_self: bool,
    pub over_18: bool,
    pub spoiler: bool,
    pub locked: bool,
    pub archived: bool,
    pub link_flair_text: Option<String>,
    pub author_flair_text: Option<String>,
}

/// One per retained comment node.
///
/// Comments form an implicit forest: no child pointers are stored, and
/// `parent_id` keeps Reddit's prefix convention verbatim (`t3_<threadId>` for
/// top-level comments, `t1_<parentCommentId>` for replies). Output order is
/// the pre-order, sibling-order-preserving traversal of the retained subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedComment {
    pub id: String,
    pub body: String,
    pub body_html: Option<String>,
    pub author: String,
    pub score: i64,
    pub created_at: String,
    pub created_utc: i64,
    pub edited: bool,
    pub edited_at: Option<String>,
    pub edited_utc: Option<i64>,
    pub parent_id: String,
    pub thread_id: String,
    pub permalink: String,
    /// Distance from the thread root as encoded by Reddit (0 = top level).
    /// Filters act on this field; it is never renumbered.
    pub depth: u32,
    pub is_op: bool,
    pub distinguished: bool,
    pub stickied: bool,
    pub score_hidden: bool,
    pub controversiality: i64,
    pub awards: i64,
}

impl NormalizedComment {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.starts_with("t3_")
    }
}

/// Coverage/truncation metadata for one normalization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadMeta {
    pub fetched_at: String,
    /// Always equals `comments.len()` after filtering/truncation.
    pub total_comments: usize,
    pub max_depth: u32,
    pub depth_filter: DepthFilter,
    pub truncated: bool,
    /// Lower bound on additional undisplayed comments: `more`-declared counts,
    /// depth-cutoff subtree sizes, and truncation-cap drops, summed.
    pub more_comments_available: u64,
}

/// Aggregate result: one thread + ordered comment sequence + meta block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedData {
    pub thread: NormalizedThread,
    pub comments: Vec<NormalizedComment>,
    pub meta: ThreadMeta,
}
