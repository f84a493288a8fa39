use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One discovered snapshot file.
#[derive(Clone, Debug)]
pub struct SnapshotJob {
    pub path: PathBuf,
    /// Output file stem: the snapshot filename minus `.json` / `.json.zst`.
    pub stem: String,
}

/// Walk `dir` for captured thread payloads (`*.json`, `*.json.zst`),
/// sorted by path for deterministic planning. A missing directory yields an
/// empty plan; the caller decides whether that is worth a warning.
pub fn discover_snapshots(dir: &Path) -> Vec<SnapshotJob> {
    let re = Regex::new(r"^(?P<stem>.+?)\.json(?:\.zst)?$").unwrap();
    let mut jobs = Vec::new();
    if !dir.exists() {
        return jobs;
    }
    for entry in WalkDir::new(dir).min_depth(1) {
        if let Ok(ent) = entry {
            if !ent.file_type().is_file() {
                continue;
            }
            if let Some(name) = ent.file_name().to_str() {
                if let Some(caps) = re.captures(name) {
                    jobs.push(SnapshotJob {
                        path: ent.path().to_path_buf(),
                        stem: caps["stem"].to_string(),
                    });
                }
            }
        }
    }
    jobs.sort_by(|a, b| a.path.cmp(&b.path));
    jobs
}
