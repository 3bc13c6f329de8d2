//! FastEmbed-based local embedding generator.
//!
//! Implements the `Embedder` trait from `justice-core` with fastembed's ONNX
//! runtime inference. The model is chosen by its Hugging Face model code
//! (default `mixedbread-ai/mxbai-embed-large-v1`, 1024 dimensions); weights
//! are downloaded into the cache directory on first use.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::info;

use justice_core::retrieval::embedder::Embedder;
use justice_types::error::RetrievalError;

/// Texts per ONNX inference batch.
const EMBED_BATCH_SIZE: usize = 32;

/// Local embedding model. Cheap to clone; clones share one session.
#[derive(Clone)]
pub struct FastEmbedEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
    model_name: String,
    dimension: usize,
}

impl FastEmbedEmbedder {
    /// Load the model identified by `model_code`.
    ///
    /// Blocking: may download weights and always builds an ONNX session.
    /// Call from `spawn_blocking` inside async code.
    pub fn new(model_code: &str, cache_dir: PathBuf) -> Result<Self, RetrievalError> {
        let (model, dimension) = resolve_model(model_code)?;

        info!(model = model_code, dimension, cache = %cache_dir.display(), "loading embedding model");

        let embedding = TextEmbedding::try_new(
            InitOptions::new(model)
                .with_cache_dir(cache_dir)
                .with_show_download_progress(false),
        )
        .map_err(|e| RetrievalError::Embedding(format!("failed to load '{model_code}': {e}")))?;

        Ok(Self {
            model: Arc::new(Mutex::new(embedding)),
            model_name: model_code.to_string(),
            dimension,
        })
    }
}

/// Look up a supported fastembed model by its model code.
pub fn resolve_model(model_code: &str) -> Result<(EmbeddingModel, usize), RetrievalError> {
    TextEmbedding::list_supported_models()
        .into_iter()
        .find(|info| info.model_code.eq_ignore_ascii_case(model_code))
        .map(|info| (info.model, info.dim))
        .ok_or_else(|| {
            RetrievalError::Embedding(format!("unsupported embedding model '{model_code}'"))
        })
}

impl Embedder for FastEmbedEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let model = self.model.clone();
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|_| RetrievalError::Embedding("embedding model lock poisoned".into()))?;
            model
                .embed(texts, Some(EMBED_BATCH_SIZE))
                .map_err(|e| RetrievalError::Embedding(e.to_string()))
        })
        .await
        .map_err(|e| RetrievalError::Embedding(format!("embedding task failed: {e}")))?
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
