//! `justice status` -- configuration and document store overview.

use std::path::Path;

use anyhow::{Result, bail};
use console::style;

use justice_infra::llm::{create_provider, test_provider_connection};
use justice_infra::vector::lance::{DOCUMENTS_TABLE, LanceVectorStore};

use super::OutputMode;
use crate::state::AppState;

/// Print config and store info. With `check`, also probe the LLM endpoint
/// and fail when it is unreachable.
pub async fn status(state: &AppState, check: bool, output: OutputMode) -> Result<()> {
    let config = &state.config;
    let store_path = config.document_store_path(&state.data_dir);

    let chunks = if store_path.exists() {
        let store = LanceVectorStore::new(store_path.clone()).await?;
        if store.table_exists(DOCUMENTS_TABLE).await {
            Some(store.row_count(DOCUMENTS_TABLE).await?)
        } else {
            None
        }
    } else {
        None
    };

    let llm_check = if check {
        let provider = create_provider(&config.llm);
        Some(test_provider_connection(&provider).await.map_err(|e| e.to_string()))
    } else {
        None
    };

    match output {
        OutputMode::Json => print_json(state, &store_path, chunks, llm_check.as_ref())?,
        OutputMode::Styled => print_styled(state, &store_path, chunks, llm_check.as_ref()),
        OutputMode::Quiet => {}
    }

    if let Some(Err(e)) = llm_check {
        bail!("LLM endpoint {} is unreachable: {e}", config.llm.base_url);
    }
    Ok(())
}

fn print_json(
    state: &AppState,
    store_path: &Path,
    chunks: Option<usize>,
    llm_check: Option<&Result<(), String>>,
) -> Result<()> {
    let config = &state.config;
    let status = serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "data_dir": state.data_dir.display().to_string(),
        "document_store": store_path.display().to_string(),
        "embedding_model": config.embedding_model,
        "retrieval_k": config.retrieval_k,
        "chunks": chunks,
        "llm": {
            "base_url": config.llm.base_url,
            "model": config.llm.model,
            "reachable": llm_check.map(|r| r.is_ok()),
            "error": llm_check.and_then(|r| r.as_ref().err()),
        },
        "server": format!("{}:{}", config.server.host, config.server.port),
    });
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

fn print_styled(
    state: &AppState,
    store_path: &Path,
    chunks: Option<usize>,
    llm_check: Option<&Result<(), String>>,
) {
    let config = &state.config;
    println!();
    println!("  {} Justice v{}", style("⚖").bold(), env!("CARGO_PKG_VERSION"));
    println!();

    println!("  {}", style("── Documents ──").dim());
    println!("  Store:    {}", style(store_path.display()).cyan());
    println!("  Model:    {}", config.embedding_model);
    println!("  K:        {}", config.retrieval_k);
    match chunks {
        Some(n) => println!("  Chunks:   {}", style(n).bold()),
        None => println!(
            "  Chunks:   {}",
            style("none (run `justice ingest <paths>`)").yellow()
        ),
    }
    println!();

    println!("  {}", style("── LLM ──").dim());
    println!("  Endpoint: {}", style(&config.llm.base_url).cyan());
    println!("  Model:    {}", config.llm.model);
    match llm_check {
        Some(Ok(())) => println!("  Check:    {}", style("✓ reachable").green()),
        Some(Err(e)) => println!("  Check:    {} {e}", style("✗").red()),
        None => {}
    }
    println!();

    println!("  {}", style("── Server ──").dim());
    println!("  Bind:     {}:{}", config.server.host, config.server.port);
    println!("  Data:     {}", style(state.data_dir.display()).dim());
    println!();
}
