#[path = "common/mod.rs"]
mod common;

use common::*;
use threadmine::{normalize, DepthFilter, MineError, NormalizeOptions};

/// The worked end-to-end example at `level2` with a zero minimum score:
/// both comments retained, `more` count carried through as-is.
#[test]
fn example_thread_level2() {
    let raw = example_thread();
    let opts = NormalizeOptions::default()
        .with_depth(DepthFilter::Level2)
        .with_min_score(0);
    let data = normalize(&raw, &opts).unwrap();

    assert_eq!(ids(&data), vec!["c1", "c2"]);
    assert_eq!(data.meta.total_comments, 2);
    assert_eq!(data.meta.max_depth, 1);
    assert_eq!(data.meta.more_comments_available, 5);
    assert!(!data.meta.truncated);

    assert_eq!(data.thread.id, "abc123");
    assert_eq!(data.comments[0].parent_id, "t3_abc123");
    assert_eq!(data.comments[1].parent_id, "t1_c1");
}

/// Same input at `top`: the depth-1 reply is elided (1) on top of the
/// `more` declaration (5).
#[test]
fn example_thread_top() {
    let raw = example_thread();
    let opts = NormalizeOptions::default()
        .with_depth(DepthFilter::Top)
        .with_min_score(0);
    let data = normalize(&raw, &opts).unwrap();

    assert_eq!(ids(&data), vec!["c1"]);
    assert_eq!(data.meta.max_depth, 0);
    assert_eq!(data.meta.more_comments_available, 6);
}

/// Two runs on identical inputs are structurally identical except for the
/// fetch timestamp.
#[test]
fn idempotent_modulo_fetched_at() {
    let raw = example_thread();
    let opts = NormalizeOptions::default().with_depth(DepthFilter::Full);
    let a = normalize(&raw, &opts).unwrap();
    let mut b = normalize(&raw, &opts).unwrap();
    b.meta.fetched_at = a.meta.fetched_at.clone();
    assert_eq!(a, b);
}

/// `top` retains a subset (by id) of `level2`, which retains a subset of
/// `full`, for a fixed raw input.
#[test]
fn depth_filters_are_monotone() {
    // c1 -> c2 -> c3 (three levels), plus top-level c4.
    let c3 = comment_node("c3", "carol", "deep", 3, 2, "t1_c2", &[]);
    let c2 = comment_node("c2", "bob", "mid", 2, 1, "t1_c1", &[c3]);
    let c1 = comment_node("c1", "alice", "top", 1, 0, "t3_abc123", &[c2]);
    let c4 = comment_node("c4", "dave", "also top", 4, 0, "t3_abc123", &[]);
    let raw = thread_pair(post_node("abc123", "Depth", "alice", 4), vec![c1, c4]);

    let run = |depth| {
        let opts = NormalizeOptions::default().with_depth(depth);
        ids(&normalize(&raw, &opts).unwrap())
    };
    let top = run(DepthFilter::Top);
    let level2 = run(DepthFilter::Level2);
    let full = run(DepthFilter::Full);

    assert_eq!(top, vec!["c1", "c4"]);
    assert!(top.iter().all(|id| level2.contains(id)));
    assert!(level2.iter().all(|id| full.contains(id)));
    assert_eq!(full, vec!["c1", "c2", "c3", "c4"]);
}

/// At full depth with no score filter and no cap, every reachable node is
/// either retained or counted as elided — never both, never neither.
#[test]
fn count_conservation_at_full_depth() {
    // 4 comments + `more` declarations of 2 and 3 (the second via the
    // children-list fallback when count is absent/zero).
    let c3 = comment_node("c3", "carol", "leaf", 1, 2, "t1_c2", &[]);
    let nested_more = more_node(2, 2, &["x1"]);
    let c2 = comment_node("c2", "bob", "mid", 2, 1, "t1_c1", &[c3, nested_more]);
    let c1 = comment_node("c1", "alice", "top", 5, 0, "t3_abc123", &[c2]);
    let c4 = comment_node("c4", "dave", "also top", 4, 0, "t3_abc123", &[]);
    let zero_count_more = more_node(0, 0, &["y1", "y2", "y3"]);
    let raw = thread_pair(
        post_node("abc123", "Conservation", "alice", 9),
        vec![c1, c4, zero_count_more],
    );

    let data = normalize(&raw, &NormalizeOptions::default()).unwrap();
    assert_eq!(data.comments.len(), 4);
    assert_eq!(data.meta.more_comments_available, 5);
    assert_eq!(
        data.comments.len() as u64 + data.meta.more_comments_available,
        9
    );
}

/// A depth-skipped comment contributes its whole subtree (self + descendants
/// + nested `more` declarations) to the elided count.
#[test]
fn depth_cutoff_counts_entire_subtree() {
    let c3 = comment_node("c3", "carol", "leaf", 1, 2, "t1_c2", &[]);
    let nested_more = more_node(7, 2, &["x1"]);
    let c2 = comment_node("c2", "bob", "mid", 2, 1, "t1_c1", &[c3, nested_more]);
    let c1 = comment_node("c1", "alice", "top", 5, 0, "t3_abc123", &[c2]);
    let raw = thread_pair(post_node("abc123", "Cutoff", "alice", 3), vec![c1]);

    let opts = NormalizeOptions::default().with_depth(DepthFilter::Top);
    let data = normalize(&raw, &opts).unwrap();
    assert_eq!(ids(&data), vec!["c1"]);
    // c2 + c3 + the nested more's 7.
    assert_eq!(data.meta.more_comments_available, 9);
}

/// With `max_comments = N` and an untruncated size of M > N: exactly N
/// retained, truncation flag set, and the elided count grows by exactly M-N.
#[test]
fn truncation_cap_is_exact() {
    let kids: Vec<_> = (1i64..=4)
        .map(|i| {
            comment_node(
                &format!("c{i}"),
                "alice",
                "body",
                10 - i,
                0,
                "t3_abc123",
                &[],
            )
        })
        .collect();
    let raw = thread_pair(post_node("abc123", "Cap", "alice", 4), kids);

    let untruncated = normalize(&raw, &NormalizeOptions::default()).unwrap();
    let capped = normalize(
        &raw,
        &NormalizeOptions::default().with_max_comments(2),
    )
    .unwrap();

    assert_eq!(untruncated.comments.len(), 4);
    assert!(!untruncated.meta.truncated);

    assert_eq!(capped.comments.len(), 2);
    assert_eq!(ids(&capped), vec!["c1", "c2"]); // first N in traversal order
    assert!(capped.meta.truncated);
    assert_eq!(capped.meta.total_comments, 2);
    assert_eq!(
        capped.meta.more_comments_available,
        untruncated.meta.more_comments_available + 2
    );
}

/// A `[deleted]`-author comment below the score floor survives; an
/// otherwise-identical comment with a real author is dropped.
#[test]
fn deleted_authors_are_score_immune() {
    let ghost = comment_node("g1", "[deleted]", "[deleted]", -5, 0, "t3_abc123", &[]);
    let lurker = comment_node("l1", "mallory", "downvoted", -5, 0, "t3_abc123", &[]);
    let raw = thread_pair(post_node("abc123", "Scores", "alice", 2), vec![ghost, lurker]);

    let opts = NormalizeOptions::default().with_min_score(0);
    let data = normalize(&raw, &opts).unwrap();
    assert_eq!(ids(&data), vec!["g1"]);
}

/// A score-filtered comment's replies are neither emitted nor counted as
/// elided, unlike the depth-cutoff case.
#[test]
fn score_filter_drops_subtree_without_counting() {
    let child = comment_node("c2", "bob", "reply", 50, 1, "t1_c1", &[]);
    let low = comment_node("c1", "mallory", "downvoted", -5, 0, "t3_abc123", &[child]);
    let raw = thread_pair(post_node("abc123", "Asymmetry", "alice", 2), vec![low]);

    let opts = NormalizeOptions::default().with_min_score(0);
    let data = normalize(&raw, &opts).unwrap();
    assert!(data.comments.is_empty());
    assert_eq!(data.meta.more_comments_available, 0);
}

/// Every retained top-level comment carries the `t3_` thread prefix; every
/// retained reply references a `t1_` id that exists in the raw tree.
#[test]
fn parent_prefix_convention_holds() {
    let raw = example_thread();
    let data = normalize(&raw, &NormalizeOptions::default()).unwrap();

    let raw_ids = ["c1", "c2"];
    for c in &data.comments {
        if c.depth == 0 {
            assert_eq!(c.parent_id, format!("t3_{}", data.thread.id));
            assert!(c.is_top_level());
        } else {
            let parent = c.parent_id.strip_prefix("t1_").expect("reply prefix");
            assert!(raw_ids.contains(&parent), "unknown parent {parent}");
        }
    }
}

/// A payload with only the post listing (no comment listing) is legitimate:
/// zero comments, zero elided, max depth 0.
#[test]
fn missing_comment_listing_is_not_an_error() {
    let v = serde_json::json!([listing(vec![post_node("abc123", "Lonely", "alice", 0)])]);
    let raw: Vec<threadmine::RawListing> = serde_json::from_value(v).unwrap();

    let data = normalize(&raw, &NormalizeOptions::default()).unwrap();
    assert!(data.comments.is_empty());
    assert_eq!(data.meta.total_comments, 0);
    assert_eq!(data.meta.max_depth, 0);
    assert_eq!(data.meta.more_comments_available, 0);
}

/// A post listing whose first child is not a `t3` node is a contract
/// violation and fails with a parse error.
#[test]
fn malformed_post_listing_is_a_parse_error() {
    let stray = comment_node("c1", "alice", "not a post", 1, 0, "t3_abc123", &[]);
    let raw = thread_pair(stray, vec![]);

    match normalize(&raw, &NormalizeOptions::default()) {
        Err(MineError::Parse(msg)) => assert!(msg.contains("could not find post content")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

/// Missing author/body default to "[deleted]"; a numeric `edited` becomes
/// flag + both instants; a missing `depth` falls back to the walk level.
#[test]
fn defaults_and_edited_decoding() {
    let v = serde_json::json!([
        listing(vec![post_node("abc123", "Defaults", "alice", 1)]),
        listing(vec![serde_json::json!({
            "kind": "t1",
            "data": {
                "id": "c1",
                "author": null,
                "body": null,
                "score": 3,
                "created_utc": 1136074600.0,
                "edited": 1136075000.0,
                "parent_id": "t3_abc123",
                "replies": ""
            }
        })])
    ]);
    let raw: Vec<threadmine::RawListing> = serde_json::from_value(v).unwrap();

    let data = normalize(&raw, &NormalizeOptions::default()).unwrap();
    let c = &data.comments[0];
    assert_eq!(c.author, "[deleted]");
    assert_eq!(c.body, "[deleted]");
    assert_eq!(c.depth, 0);
    assert!(c.edited);
    assert_eq!(c.edited_utc, Some(1136075000));
    assert!(c.edited_at.is_some());
    assert_eq!(c.created_utc, 1136074600);
    assert!(c.created_at.starts_with("2006-01-01T"));
}
