//! The thread-normalization core: a depth-first, sibling-order-preserving
//! walk over the raw comment listing with fold-style accumulators. Pure —
//! no I/O, no shared state; each call's accumulators are local to it.

use crate::error::MineError;
use crate::listing::{CommentData, PostData, RawListing, RawNode};
use crate::options::NormalizeOptions;
use crate::thread::{NormalizedComment, NormalizedData, NormalizedThread, ThreadMeta};
use crate::util::{iso_from_epoch, now_iso};

const CANONICAL_BASE: &str = "https://www.reddit.com";

/// Per-call accumulator threaded through the recursion: retained comments in
/// traversal order plus the running elided count.
#[derive(Debug, Default)]
struct FlattenOutcome {
    comments: Vec<NormalizedComment>,
    elided: u64,
}

impl FlattenOutcome {
    fn absorb(&mut self, child: FlattenOutcome) {
        self.comments.extend(child.comments);
        self.elided += child.elided;
    }
}

/// Transform the raw `[postListing, commentListing]` pair into a
/// `NormalizedData` value, honoring the depth filter, minimum score, and
/// maximum comment cap.
///
/// The first listing's first child must be a post node; anything else fails
/// with a parse error. A missing or empty comment listing is legitimate
/// (some threads have no comments) and yields zero comments.
pub fn normalize(
    listings: &[RawListing],
    opts: &NormalizeOptions,
) -> Result<NormalizedData, MineError> {
    let post = listings
        .first()
        .and_then(|l| l.data.children.first())
        .and_then(|n| match n {
            RawNode::Post(p) => Some(p),
            _ => None,
        })
        .ok_or_else(|| MineError::parse("could not find post content"))?;

    let thread = normalize_post(post);

    let mut outcome = match listings.get(1) {
        Some(listing) => flatten_children(&listing.data.children, &thread.id, 0, opts),
        None => FlattenOutcome::default(),
    };

    let mut truncated = false;
    if let Some(cap) = opts.max_comments {
        if outcome.comments.len() > cap {
            outcome.elided += (outcome.comments.len() - cap) as u64;
            outcome.comments.truncate(cap);
            truncated = true;
        }
    }

    let max_depth = outcome.comments.iter().map(|c| c.depth).max().unwrap_or(0);

    let meta = ThreadMeta {
        fetched_at: now_iso(),
        total_comments: outcome.comments.len(),
        max_depth,
        depth_filter: opts.depth,
        truncated,
        more_comments_available: outcome.elided,
    };

    Ok(NormalizedData {
        thread,
        comments: outcome.comments,
        meta,
    })
}

fn flatten_children(
    nodes: &[RawNode],
    thread_id: &str,
    level: u32,
    opts: &NormalizeOptions,
) -> FlattenOutcome {
    let mut out = FlattenOutcome::default();

    for node in nodes {
        match node {
            RawNode::More(m) => {
                out.elided += m.declared_count();
            }
            RawNode::Comment(c) => {
                // Depth as encoded by Reddit; the recursion level only backs
                // it up when the field is absent.
                let depth = c.depth.unwrap_or(level);

                if opts.depth.cutoff().is_some_and(|cut| depth > cut) {
                    // The whole hidden subtree counts toward coverage, not
                    // just this node.
                    out.elided += subtree_size(c);
                    continue;
                }

                let author_deleted = c.author.as_deref().map_or(true, |a| a == "[deleted]");
                if let Some(min) = opts.min_score {
                    if !author_deleted && c.score.unwrap_or(0) < min {
                        // Dropped outright: replies are neither emitted nor
                        // counted as elided, unlike the depth-cutoff case.
                        continue;
                    }
                }

                out.comments.push(normalize_comment(c, thread_id, depth));
                if let Some(replies) = &c.replies {
                    out.absorb(flatten_children(
                        &replies.data.children,
                        thread_id,
                        depth + 1,
                        opts,
                    ));
                }
            }
            RawNode::Post(_) | RawNode::Other => {}
        }
    }

    out
}

/// Comments in a subtree (self plus all descendants), with nested `more`
/// nodes contributing their declared counts.
fn subtree_size(c: &CommentData) -> u64 {
    let mut n = 1u64;
    if let Some(replies) = &c.replies {
        for node in &replies.data.children {
            match node {
                RawNode::Comment(child) => n += subtree_size(child),
                RawNode::More(m) => n += m.declared_count(),
                RawNode::Post(_) | RawNode::Other => {}
            }
        }
    }
    n
}

fn normalize_post(p: &PostData) -> NormalizedThread {
    let created_utc = p.created_utc.unwrap_or(0.0) as i64;
    NormalizedThread {
        id: p.id.clone(),
        title: p.title.clone(),
        selftext: p.selftext.clone(),
        selftext_html: p.selftext_html.clone(),
        author: p.author.clone().unwrap_or_else(|| "[deleted]".to_string()),
        subreddit: p.subreddit.clone(),
        score: p.score.unwrap_or(0),
        upvote_ratio: p.upvote_ratio.unwrap_or(0.0),
        num_comments: p.num_comments.unwrap_or(0),
        created_at: iso_from_epoch(created_utc),
        created_utc,
        permalink: canonical_permalink(&p.permalink),
        url: p.url.clone(),
        is_self: p.is_self,
        over_18: p.over_18,
        spoiler: p.spoiler,
        locked: p.locked,
        archived: p.archived,
        link_flair_text: p.link_flair_text.clone(),
        author_flair_text: p.author_flair_text.clone(),
    }
}

fn normalize_comment(c: &CommentData, thread_id: &str, depth: u32) -> NormalizedComment {
    let created_utc = c.created_utc.unwrap_or(0.0) as i64;
    let edited_utc = c.edited.epoch();
    NormalizedComment {
        id: c.id.clone(),
        body: c.body.clone().unwrap_or_else(|| "[deleted]".to_string()),
        body_html: c.body_html.clone(),
        author: c.author.clone().unwrap_or_else(|| "[deleted]".to_string()),
        score: c.score.unwrap_or(0),
        created_at: iso_from_epoch(created_utc),
        created_utc,
        edited: c.edited.is_edited(),
        edited_at: edited_utc.map(iso_from_epoch),
        edited_utc,
        parent_id: c
            .parent_id
            .clone()
            .unwrap_or_else(|| format!("t3_{thread_id}")),
        thread_id: thread_id.to_string(),
        permalink: c
            .permalink
            .as_deref()
            .map(canonical_permalink)
            .unwrap_or_default(),
        depth,
        is_op: c.is_submitter,
        distinguished: c.distinguished.is_some(),
        stickied: c.stickied,
        score_hidden: c.score_hidden,
        controversiality: c.controversiality.unwrap_or(0),
        awards: c.total_awards_received.unwrap_or(0),
    }
}

/// Site-relative paths get the canonical domain prepended; absolute URLs
/// pass through untouched.
fn canonical_permalink(rel: &str) -> String {
    if rel.is_empty() || rel.starts_with("http") {
        rel.to_string()
    } else {
        format!("{CANONICAL_BASE}{rel}")
    }
}
