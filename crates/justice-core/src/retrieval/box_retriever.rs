//! BoxRetriever -- object-safe dynamic dispatch wrapper for Retriever.

use std::future::Future;
use std::pin::Pin;

use justice_types::document::DocumentFragment;
use justice_types::error::RetrievalError;

use super::retriever::Retriever;

/// Object-safe version of [`Retriever`] with boxed futures.
pub trait RetrieverDyn: Send + Sync {
    fn retrieve_boxed<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<DocumentFragment>, RetrievalError>> + Send + 'a>>;
}

impl<T: Retriever> RetrieverDyn for T {
    fn retrieve_boxed<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<DocumentFragment>, RetrievalError>> + Send + 'a>>
    {
        Box::pin(self.retrieve(query))
    }
}

/// Type-erased retriever shared by the QA and guide chains.
pub struct BoxRetriever {
    inner: Box<dyn RetrieverDyn + Send + Sync>,
}

impl BoxRetriever {
    pub fn new<T: Retriever + 'static>(retriever: T) -> Self {
        Self {
            inner: Box::new(retriever),
        }
    }

    pub async fn retrieve(&self, query: &str) -> Result<Vec<DocumentFragment>, RetrievalError> {
        self.inner.retrieve_boxed(query).await
    }
}
