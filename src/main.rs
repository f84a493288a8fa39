use anyhow::Result;
use std::path::PathBuf;
use threadmine::{DepthFilter, ExportFormat, ThreadMiner};

const INPUT_ROOT: &str = "./threads";
const OUTPUT_ROOT: &str = "./out";

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(INPUT_ROOT));
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(OUTPUT_ROOT));
    let depth = match args.next() {
        Some(s) => s.parse::<DepthFilter>()?,
        None => DepthFilter::Full,
    };

    let summary = ThreadMiner::new()
        .input_dir(&input)
        .output_dir(&output)
        .formats([
            ExportFormat::Json,
            ExportFormat::Markdown,
            ExportFormat::Csv,
            ExportFormat::Insights,
        ])
        .depth(depth)
        .file_concurrency(4)
        .progress_label("Normalizing threads")
        .run()?;

    println!(
        "Normalized {} threads ({} failed)",
        summary.processed,
        summary.failed.len()
    );
    for (path, err) in &summary.failed {
        eprintln!("  failed: {} — {}", path.display(), err);
    }
    Ok(())
}
