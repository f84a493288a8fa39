use crate::error::MineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Depth retention level for the comment walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthFilter {
    /// Retain only depth 0.
    Top,
    /// Retain depth 0–1.
    Level2,
    /// Retain all depths.
    #[default]
    Full,
}

impl DepthFilter {
    /// Numeric cutoff applied during the walk; `None` means unbounded.
    pub fn cutoff(self) -> Option<u32> {
        match self {
            DepthFilter::Top => Some(0),
            DepthFilter::Level2 => Some(1),
            DepthFilter::Full => None,
        }
    }
}

impl fmt::Display for DepthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DepthFilter::Top => "top",
            DepthFilter::Level2 => "level2",
            DepthFilter::Full => "full",
        };
        f.write_str(s)
    }
}

impl FromStr for DepthFilter {
    type Err = MineError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(DepthFilter::Top),
            "level2" => Ok(DepthFilter::Level2),
            "full" => Ok(DepthFilter::Full),
            other => Err(MineError::validation(format!(
                "unknown depth filter '{other}' (expected top, level2, or full)"
            ))),
        }
    }
}

/// The three user-supplied controls honored by the normalizer, with
/// builder chaining.
#[derive(Clone, Debug, Default)]
pub struct NormalizeOptions {
    pub depth: DepthFilter,
    /// Comments below this score are dropped, unless their author is deleted
    /// (deleted-author comments are never score-filtered).
    pub min_score: Option<i64>,
    /// Cap on retained comments; the first N in traversal order survive.
    pub max_comments: Option<usize>,
}

impl NormalizeOptions {
    pub fn with_depth(mut self, depth: DepthFilter) -> Self {
        self.depth = depth;
        self
    }
    pub fn with_min_score(mut self, min: i64) -> Self {
        self.min_score = Some(min);
        self
    }
    pub fn with_max_comments(mut self, cap: usize) -> Self {
        self.max_comments = Some(cap);
        self
    }
}
