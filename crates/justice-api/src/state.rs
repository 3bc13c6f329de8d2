//! Application state shared by the CLI commands and the HTTP handlers.
//!
//! `AppState` owns the configuration, the session store, and a readiness
//! slot for the chat service. The slot starts empty and is filled by a
//! background task once the retriever and chains are built; handlers that
//! find it empty answer 503.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::RwLock;

use justice_core::chain::{ChainSet, GenerationSettings};
use justice_core::chat::service::ChatService;
use justice_core::chat::session::SessionStore;
use justice_core::retrieval::box_embedder::BoxEmbedder;
use justice_core::retrieval::box_retriever::BoxRetriever;
use justice_infra::config::{load_config, model_cache_dir, resolve_data_dir};
use justice_infra::llm::create_provider;
use justice_infra::vector::documents::LanceDocumentStore;
use justice_infra::vector::embedder::FastEmbedEmbedder;
use justice_infra::vector::lance::LanceVectorStore;
use justice_types::config::JusticeConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<JusticeConfig>,
    pub data_dir: PathBuf,
    pub sessions: Arc<SessionStore>,
    chat: Arc<RwLock<Option<Arc<ChatService>>>>,
}

impl AppState {
    /// State with an empty chat slot.
    pub fn new(config: JusticeConfig, data_dir: PathBuf) -> Self {
        let sessions = Arc::new(SessionStore::with_cap(config.max_history_turns));
        Self {
            config: Arc::new(config),
            data_dir,
            sessions,
            chat: Arc::new(RwLock::new(None)),
        }
    }

    /// Resolve the data directory, load and validate `config.toml`.
    pub async fn init(data_dir_override: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir(data_dir_override);
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("creating data directory {}", data_dir.display()))?;

        let config = load_config(&data_dir).await;
        config.validate()?;

        Ok(Self::new(config, data_dir))
    }

    /// The chat service, or `None` while chains are not ready.
    pub async fn chat_service(&self) -> Option<Arc<ChatService>> {
        self.chat.read().await.clone()
    }

    /// Mark the chains ready.
    pub async fn install(&self, service: ChatService) {
        *self.chat.write().await = Some(Arc::new(service));
    }

    /// Load the embedding model and open the document store.
    ///
    /// The model load is blocking (ONNX session, first-run download) and
    /// runs on the blocking pool.
    pub async fn open_document_store(&self) -> anyhow::Result<LanceDocumentStore> {
        let model = self.config.embedding_model.clone();
        let cache_dir = model_cache_dir(&self.data_dir);
        let embedder =
            tokio::task::spawn_blocking(move || FastEmbedEmbedder::new(&model, cache_dir))
                .await
                .context("embedding model loader panicked")??;

        let store_path = self.config.document_store_path(&self.data_dir);
        let lance = LanceVectorStore::new(store_path.clone())
            .await
            .with_context(|| format!("opening document store {}", store_path.display()))?;

        Ok(LanceDocumentStore::new(
            lance,
            Arc::new(BoxEmbedder::new(embedder)),
            self.config.retrieval_k,
        ))
    }

    /// Build the retriever, the LLM client, and the four chains.
    pub async fn build_chat_service(&self) -> anyhow::Result<ChatService> {
        let retriever = Arc::new(BoxRetriever::new(self.open_document_store().await?));
        let llm = Arc::new(create_provider(&self.config.llm));
        let chains = ChainSet::build(llm, retriever, GenerationSettings::from(&self.config.llm));
        Ok(ChatService::new(chains, self.sessions.clone()))
    }

    /// Drop the chains and forget every session.
    pub async fn teardown(&self) {
        self.chat.write().await.take();
        tracing::info!(sessions = self.sessions.len(), "clearing sessions");
        self.sessions.clear();
    }
}
