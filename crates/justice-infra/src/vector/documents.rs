//! LanceDB-backed legal document store.
//!
//! Implements `Retriever` from `justice-core`: the query is embedded with
//! the configured model and the `documents` table is searched by cosine
//! distance, nearest K first. Ingestion appends chunk rows through
//! [`LanceDocumentStore::add_chunks`].

use std::sync::Arc;

use arrow_array::{
    Array, FixedSizeListArray, Float32Array, Int32Array, RecordBatch, RecordBatchIterator,
    StringArray,
};
use arrow_schema::{DataType, Field};
use futures_util::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use tracing::{debug, warn};

use justice_core::retrieval::box_embedder::BoxEmbedder;
use justice_core::retrieval::retriever::Retriever;
use justice_types::document::{DocumentChunk, DocumentFragment};
use justice_types::error::RetrievalError;

use super::lance::{DOCUMENTS_TABLE, LanceVectorStore};
use super::schema::{documents_schema, vector_dimension};

/// Similarity search over the `documents` table.
pub struct LanceDocumentStore {
    store: LanceVectorStore,
    embedder: Arc<BoxEmbedder>,
    k: usize,
}

impl LanceDocumentStore {
    pub fn new(store: LanceVectorStore, embedder: Arc<BoxEmbedder>, k: usize) -> Self {
        Self { store, embedder, k }
    }

    pub fn embedder(&self) -> &BoxEmbedder {
        &self.embedder
    }

    fn dimension(&self) -> i32 {
        self.embedder.dimension() as i32
    }

    /// Open or create the table and check its vector width against the embedder.
    async fn ensure_documents_table(&self) -> Result<lancedb::Table, RetrievalError> {
        let schema = Arc::new(documents_schema(self.dimension()));
        let table = self
            .store
            .ensure_table(DOCUMENTS_TABLE, schema)
            .await
            .map_err(|e| RetrievalError::Store(format!("Failed to ensure documents table: {e}")))?;
        self.check_dimension(&table).await?;
        Ok(table)
    }

    async fn check_dimension(&self, table: &lancedb::Table) -> Result<(), RetrievalError> {
        let schema = table
            .schema()
            .await
            .map_err(|e| RetrievalError::Store(format!("Failed to read table schema: {e}")))?;
        match vector_dimension(&schema) {
            Some(dim) if dim == self.dimension() => Ok(()),
            Some(dim) => Err(RetrievalError::Schema(format!(
                "table '{DOCUMENTS_TABLE}' stores {dim}-dim vectors but '{}' produces {}",
                self.embedder.model_name(),
                self.dimension()
            ))),
            None => Err(RetrievalError::Schema(format!(
                "table '{DOCUMENTS_TABLE}' has no fixed-size vector column"
            ))),
        }
    }

    /// Number of stored chunks (0 before the first ingestion).
    pub async fn count(&self) -> Result<usize, RetrievalError> {
        self.store
            .row_count(DOCUMENTS_TABLE)
            .await
            .map_err(|e| RetrievalError::Store(format!("Failed to count rows: {e}")))
    }

    /// Drop every stored chunk. The table is recreated on the next append.
    pub async fn clear(&self) -> Result<(), RetrievalError> {
        self.store
            .drop_table(DOCUMENTS_TABLE)
            .await
            .map_err(|e| RetrievalError::Store(format!("Failed to drop documents table: {e}")))
    }

    /// Append chunks with their precomputed embeddings.
    pub async fn add_chunks(
        &self,
        chunks: &[DocumentChunk],
        embeddings: &[Vec<f32>],
    ) -> Result<usize, RetrievalError> {
        if chunks.is_empty() {
            return Ok(0);
        }
        if chunks.len() != embeddings.len() {
            return Err(RetrievalError::Embedding(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        let table = self.ensure_documents_table().await?;
        let batch = build_record_batch(
            chunks,
            embeddings,
            self.embedder.model_name(),
            self.dimension(),
        )?;
        let schema = batch.schema();
        let reader = RecordBatchIterator::new(vec![Ok(batch)], schema);

        table
            .add(reader)
            .execute()
            .await
            .map_err(|e| RetrievalError::Store(format!("Failed to add chunks: {e}")))?;

        Ok(chunks.len())
    }
}

/// Build an Arrow RecordBatch from chunks and their embeddings.
fn build_record_batch(
    chunks: &[DocumentChunk],
    embeddings: &[Vec<f32>],
    embedding_model: &str,
    dimension: i32,
) -> Result<RecordBatch, RetrievalError> {
    if let Some(bad) = embeddings.iter().find(|e| e.len() != dimension as usize) {
        return Err(RetrievalError::Schema(format!(
            "embedding has {} values, expected {dimension}",
            bad.len()
        )));
    }

    let schema = Arc::new(documents_schema(dimension));

    let id_array = StringArray::from_iter_values(chunks.iter().map(|c| c.id.as_str()));
    let source_array = StringArray::from_iter_values(chunks.iter().map(|c| c.source.as_str()));
    let index_array = Int32Array::from_iter_values(chunks.iter().map(|c| c.chunk_index as i32));
    let text_array = StringArray::from_iter_values(chunks.iter().map(|c| c.text.as_str()));
    let model_array =
        StringArray::from_iter_values(std::iter::repeat_n(embedding_model, chunks.len()));

    let values = Float32Array::from_iter_values(embeddings.iter().flatten().copied());
    let field = Arc::new(Field::new("item", DataType::Float32, true));
    let vector_array = FixedSizeListArray::new(field, dimension, Arc::new(values), None);

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(id_array),
            Arc::new(source_array),
            Arc::new(index_array),
            Arc::new(text_array),
            Arc::new(model_array),
            Arc::new(vector_array),
        ],
    )
    .map_err(|e| RetrievalError::Store(format!("Failed to build record batch: {e}")))
}

/// Parse search result rows into fragments, keeping row order.
fn record_batch_to_fragments(batch: &RecordBatch) -> Vec<DocumentFragment> {
    let (Some(sources), Some(indexes), Some(texts)) = (
        batch
            .column_by_name("source")
            .and_then(|c| c.as_any().downcast_ref::<StringArray>()),
        batch
            .column_by_name("chunk_index")
            .and_then(|c| c.as_any().downcast_ref::<Int32Array>()),
        batch
            .column_by_name("chunk_text")
            .and_then(|c| c.as_any().downcast_ref::<StringArray>()),
    ) else {
        return vec![];
    };

    // The _distance column is added by LanceDB vector search
    let distances = batch
        .column_by_name("_distance")
        .and_then(|c| c.as_any().downcast_ref::<Float32Array>());

    (0..batch.num_rows())
        .map(|i| DocumentFragment {
            source: sources.value(i).to_string(),
            chunk_index: indexes.value(i).max(0) as u32,
            text: texts.value(i).to_string(),
            distance: distances.map_or(0.0, |d| d.value(i)),
        })
        .collect()
}

impl Retriever for LanceDocumentStore {
    async fn retrieve(&self, query: &str) -> Result<Vec<DocumentFragment>, RetrievalError> {
        let Some(table) = self
            .store
            .open_table(DOCUMENTS_TABLE)
            .await
            .map_err(|e| RetrievalError::Store(format!("Failed to open documents table: {e}")))?
        else {
            warn!(
                path = %self.store.base_path().display(),
                "document store is empty; answering without legal context"
            );
            return Ok(vec![]);
        };
        self.check_dimension(&table).await?;

        let embedding = self.embedder.embed_one(query).await?;

        let results = table
            .vector_search(embedding)
            .map_err(|e| RetrievalError::Store(format!("Vector search setup failed: {e}")))?
            .distance_type(lancedb::DistanceType::Cosine)
            .limit(self.k)
            .execute()
            .await
            .map_err(|e| RetrievalError::Store(format!("Vector search failed: {e}")))?;

        let batches: Vec<RecordBatch> = results
            .try_collect()
            .await
            .map_err(|e| RetrievalError::Store(format!("Failed to collect results: {e}")))?;

        let mut fragments: Vec<DocumentFragment> =
            batches.iter().flat_map(record_batch_to_fragments).collect();
        fragments.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        fragments.truncate(self.k);

        debug!(k = self.k, found = fragments.len(), "document search complete");
        Ok(fragments)
    }
}
