//! Snapshot I/O: captured thread payloads on disk stand in for the excluded
//! fetch layer. A snapshot file holds the two-listing JSON array Reddit
//! returns for a thread permalink; `.zst` files are transparently decoded.
//! Normalized output round-trips losslessly for the cache-hit path.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use zstd::stream::read::Decoder;

use crate::error::MineError;
use crate::listing::RawListing;
use crate::thread::NormalizedData;

/// Parse a captured `[postListing, commentListing]` payload file.
/// Shape problems surface as `MineError::Parse` so callers can tell a bad
/// capture apart from plain I/O failures.
pub fn read_raw_snapshot(path: &Path) -> Result<Vec<RawListing>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;

    let parsed: Result<Vec<RawListing>, serde_json::Error> = if is_zst(path) {
        let decoder =
            Decoder::new(file).with_context(|| format!("zstd decode {}", path.display()))?;
        serde_json::from_reader(BufReader::new(decoder))
    } else {
        serde_json::from_reader(BufReader::new(file))
    };

    let listings =
        parsed.map_err(|e| MineError::parse(format!("{}: {}", path.display(), e)))?;
    Ok(listings)
}

/// Serialize normalized output as JSON (compact or pretty).
pub fn write_normalized(path: &Path, data: &NormalizedData, pretty: bool) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    if pretty {
        serde_json::to_writer_pretty(&mut w, data)?;
    } else {
        serde_json::to_writer(&mut w, data)?;
    }
    w.flush()?;
    Ok(())
}

/// Read normalized output back (the cache collaborator contract: all fields,
/// including the epoch/ISO pairs, must survive the round trip).
pub fn read_normalized(path: &Path) -> Result<NormalizedData> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let data = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(data)
}

fn is_zst(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("zst")
}
