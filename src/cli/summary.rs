//! Human-facing build summary, printed to stderr after a successful build.

use blockdex::build::{ArtifactStats, BuildReport};

use super::display::{format_size, pad_left, savings_colored, themed, BOLD, GRAY, GREEN};

fn artifact_line(stats: &ArtifactStats) -> String {
    format!(
        "  {} {}  {} → {}  {}  {}",
        themed(GREEN, &[BOLD], "✓"),
        stats.path.display(),
        pad_left(&format_size(stats.raw_bytes), 9),
        pad_left(&format_size(stats.compressed_bytes), 9),
        savings_colored(stats.raw_bytes, stats.compressed_bytes),
        themed(GRAY, &[], &format!("crc32 {:08x}", stats.crc32)),
    )
}

pub fn print_build_summary(report: &BuildReport) {
    eprintln!("{}", artifact_line(&report.artifacts.index));
    eprintln!("{}", artifact_line(&report.artifacts.meta));
    eprintln!();
    eprintln!("✅ Build complete");
    eprintln!(
        "   {} documents │ {} drafts skipped │ {} keys │ {} terms",
        report.documents, report.drafts, report.keys, report.terms
    );
}

pub fn print_empty_corpus() {
    eprintln!("⚠️  No documents found; skipping build");
}
