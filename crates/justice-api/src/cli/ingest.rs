//! `justice ingest` -- index legal documents into the document store.

use std::path::PathBuf;

use anyhow::{Result, bail};
use console::style;

use justice_infra::storage::indexer::{DocumentIndexer, IngestReport};

use super::OutputMode;
use crate::state::AppState;

/// Index `paths`, optionally dropping the existing table first.
pub async fn ingest(
    state: &AppState,
    paths: Vec<PathBuf>,
    rebuild: bool,
    output: OutputMode,
) -> Result<()> {
    if output == OutputMode::Styled {
        println!();
        println!(
            "  {} Loading embedding model {}",
            style("⏳").bold(),
            style(&state.config.embedding_model).cyan()
        );
    }

    let indexer = DocumentIndexer::new(state.open_document_store().await?);
    if rebuild {
        indexer.store().clear().await?;
        tracing::info!("dropped existing document table");
    }
    let report = indexer.index_paths(&paths).await;
    let total = indexer.store().count().await?;

    match output {
        OutputMode::Json => {
            let out = serde_json::json!({
                "files_indexed": report.files_indexed,
                "files_skipped": report.files_skipped,
                "chunks_added": report.chunks_added,
                "total_chunks": total,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputMode::Styled => print_report(&report, total),
        OutputMode::Quiet => {}
    }

    if report.files_indexed == 0 {
        bail!("no documents were indexed");
    }
    Ok(())
}

fn print_report(report: &IngestReport, total: usize) {
    println!();
    println!(
        "  {} Indexed {} file(s), {} chunk(s)",
        style("✓").green(),
        style(report.files_indexed).bold(),
        style(report.chunks_added).bold()
    );
    if report.files_skipped > 0 {
        println!(
            "  {} Skipped {} path(s)",
            style("!").yellow(),
            report.files_skipped
        );
    }
    println!("  Store now holds {} chunk(s)", style(total).cyan());
    println!();
}
