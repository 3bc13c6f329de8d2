//! Retriever trait: similarity search over the document store.

use justice_types::document::DocumentFragment;
use justice_types::error::RetrievalError;

/// Returns the document fragments most similar to a query.
///
/// Results are ordered by similarity (most similar first) and capped at the
/// retriever's configured K. Implementations live in justice-infra.
pub trait Retriever: Send + Sync {
    fn retrieve(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<DocumentFragment>, RetrievalError>> + Send;
}
