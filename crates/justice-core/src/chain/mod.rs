//! Prompt chains: template rendering, optional retrieval, one LLM call.
//!
//! A [`PromptChain`] renders its template from a [`ChainInput`], sends the
//! result as a single user message, and returns the model's text verbatim.
//! The QA and guide chains also query the document store with the
//! `question` field and fill `document_context` before rendering.

pub mod prompts;
pub mod template;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use justice_types::config::LlmSettings;
use justice_types::document::format_document_context;
use justice_types::error::ChainError;
use justice_types::llm::CompletionRequest;
use tracing::{Instrument, debug, info_span};

use crate::llm::box_provider::BoxLlmProvider;
use crate::retrieval::box_retriever::BoxRetriever;

use self::template::PromptTemplate;

pub const QUESTION: &str = "question";
pub const CHAT_HISTORY: &str = "chat_history";
pub const DOCUMENT_CONTEXT: &str = "document_context";
pub const CLASSIFICATION: &str = "classification";
pub const USER_MESSAGE: &str = "user_message";

/// Named string values supplied to a chain.
#[derive(Debug, Clone, Default)]
pub struct ChainInput {
    fields: HashMap<String, String>,
}

impl ChainInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Which of the four fixed chains this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainKind {
    Qa,
    FormFiller,
    Guide,
    Router,
}

impl ChainKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainKind::Qa => "qa",
            ChainKind::FormFiller => "form_filler",
            ChainKind::Guide => "guide",
            ChainKind::Router => "router",
        }
    }

    pub fn template_source(&self) -> &'static str {
        match self {
            ChainKind::Qa => prompts::QA_TEMPLATE,
            ChainKind::FormFiller => prompts::FORM_FILLER_TEMPLATE,
            ChainKind::Guide => prompts::GUIDE_TEMPLATE,
            ChainKind::Router => prompts::ROUTER_TEMPLATE,
        }
    }
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request generation parameters shared by all chains.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl From<&LlmSettings> for GenerationSettings {
    fn from(settings: &LlmSettings) -> Self {
        Self {
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }
}

/// A single prompt template bound to an LLM and, optionally, a retriever.
pub struct PromptChain {
    kind: ChainKind,
    template: PromptTemplate,
    llm: Arc<BoxLlmProvider>,
    retriever: Option<Arc<BoxRetriever>>,
    settings: GenerationSettings,
}

impl PromptChain {
    pub fn new(kind: ChainKind, llm: Arc<BoxLlmProvider>, settings: GenerationSettings) -> Self {
        Self {
            kind,
            template: PromptTemplate::new(kind.template_source()),
            llm,
            retriever: None,
            settings,
        }
    }

    /// Fill `document_context` from this retriever before rendering.
    pub fn with_retriever(mut self, retriever: Arc<BoxRetriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    pub fn kind(&self) -> ChainKind {
        self.kind
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Run the chain and return the model's raw text output.
    pub async fn invoke(&self, input: &ChainInput) -> Result<String, ChainError> {
        let mut input = input.clone();

        if let Some(retriever) = &self.retriever {
            let question = input
                .get(QUESTION)
                .ok_or_else(|| ChainError::MissingField(QUESTION.to_string()))?
                .to_string();
            let fragments = retriever.retrieve(&question).await?;
            debug!(
                chain = %self.kind,
                fragments = fragments.len(),
                "retrieved document context"
            );
            input.insert(DOCUMENT_CONTEXT, format_document_context(&fragments));
        }

        let prompt = self.template.render(&input)?;

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            prompt,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let span = info_span!(
            "gen_ai.complete",
            chain = %self.kind,
            gen_ai.system = self.llm.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
        );

        let response = self.llm.complete(&request).instrument(span).await?;

        debug!(
            chain = %self.kind,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = %response.stop_reason,
            "chain completed"
        );

        Ok(response.content)
    }
}

/// The four chains the chat service dispatches between.
pub struct ChainSet {
    pub qa: PromptChain,
    pub form_filler: PromptChain,
    pub guide: PromptChain,
    pub router: PromptChain,
}

impl ChainSet {
    /// Bind all four templates to one LLM. QA and guide share the retriever.
    pub fn build(
        llm: Arc<BoxLlmProvider>,
        retriever: Arc<BoxRetriever>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            qa: PromptChain::new(ChainKind::Qa, llm.clone(), settings.clone())
                .with_retriever(retriever.clone()),
            form_filler: PromptChain::new(ChainKind::FormFiller, llm.clone(), settings.clone()),
            guide: PromptChain::new(ChainKind::Guide, llm.clone(), settings.clone())
                .with_retriever(retriever),
            router: PromptChain::new(ChainKind::Router, llm, settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedProvider, StaticRetriever, settings};

    #[tokio::test]
    async fn test_qa_chain_fills_document_context() {
        let provider = ScriptedProvider::new("QA");
        let prompts = provider.prompts();
        let retriever = StaticRetriever::new(&["Section 303: Theft.", "Section 304: Snatching."]);
        let queries = retriever.queries();

        let chain = PromptChain::new(
            ChainKind::Qa,
            Arc::new(BoxLlmProvider::new(provider)),
            settings(),
        )
        .with_retriever(Arc::new(BoxRetriever::new(retriever)));

        let input = ChainInput::new()
            .with(QUESTION, "What is the punishment for theft?")
            .with(CHAT_HISTORY, "");
        let output = chain.invoke(&input).await.unwrap();

        assert_eq!(output, ScriptedProvider::QA_ANSWER);
        assert_eq!(
            queries.lock().unwrap().as_slice(),
            ["What is the punishment for theft?"]
        );
        let prompt = prompts.lock().unwrap()[0].clone();
        assert!(prompt.contains("Section 303: Theft.\n\nSection 304: Snatching."));
        assert!(prompt.contains("### Officer's Question ###\nWhat is the punishment for theft?"));
    }

    #[tokio::test]
    async fn test_form_filler_chain_does_not_retrieve() {
        let provider = ScriptedProvider::new("FORM_FILLER");
        let prompts = provider.prompts();
        let chain = PromptChain::new(
            ChainKind::FormFiller,
            Arc::new(BoxLlmProvider::new(provider)),
            settings(),
        );

        let input = ChainInput::new()
            .with(QUESTION, "Fill: Name ___")
            .with(CHAT_HISTORY, "Officer: Victim is Ravi");
        let output = chain.invoke(&input).await.unwrap();

        assert_eq!(output, ScriptedProvider::FORM_ANSWER);
        let prompt = prompts.lock().unwrap()[0].clone();
        assert!(prompt.contains("Officer: Victim is Ravi"));
        assert!(!prompt.contains("{document_context}"));
    }

    #[tokio::test]
    async fn test_missing_field_fails_before_llm_call() {
        let provider = ScriptedProvider::new("GUIDE");
        let prompts = provider.prompts();
        let chain = PromptChain::new(
            ChainKind::Guide,
            Arc::new(BoxLlmProvider::new(provider)),
            settings(),
        )
        .with_retriever(Arc::new(BoxRetriever::new(StaticRetriever::new(&[]))));

        let input = ChainInput::new().with(QUESTION, "A child went missing");
        let err = chain.invoke(&input).await.unwrap_err();

        assert!(matches!(err, ChainError::MissingField(_)));
        assert!(prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_retrieval_failure_propagates() {
        let provider = ScriptedProvider::new("QA");
        let chain = PromptChain::new(
            ChainKind::Qa,
            Arc::new(BoxLlmProvider::new(provider)),
            settings(),
        )
        .with_retriever(Arc::new(BoxRetriever::new(StaticRetriever::failing())));

        let input = ChainInput::new().with(QUESTION, "q").with(CHAT_HISTORY, "");
        let err = chain.invoke(&input).await.unwrap_err();
        assert!(matches!(err, ChainError::Retrieval(_)));
    }

    #[tokio::test]
    async fn test_llm_failure_propagates() {
        let chain = PromptChain::new(
            ChainKind::Router,
            Arc::new(BoxLlmProvider::new(ScriptedProvider::failing())),
            settings(),
        );
        let input = ChainInput::new().with(USER_MESSAGE, "hello");
        let err = chain.invoke(&input).await.unwrap_err();
        assert!(matches!(err, ChainError::Llm(_)));
    }

    #[tokio::test]
    async fn test_request_uses_generation_settings() {
        let provider = ScriptedProvider::new("QA");
        let requests = provider.requests();
        let chain = PromptChain::new(
            ChainKind::Router,
            Arc::new(BoxLlmProvider::new(provider)),
            GenerationSettings {
                model: "llama3.1:8b".to_string(),
                max_tokens: 128,
                temperature: Some(0.1),
            },
        );
        chain
            .invoke(&ChainInput::new().with(USER_MESSAGE, "hi"))
            .await
            .unwrap();

        let requests = requests.lock().unwrap();
        assert_eq!(requests[0].model, "llama3.1:8b");
        assert_eq!(requests[0].max_tokens, 128);
        assert_eq!(requests[0].temperature, Some(0.1));
        assert!(requests[0].prompt.starts_with("Your job is to classify"));
    }

    #[test]
    fn test_chain_set_wires_retriever_to_qa_and_guide() {
        let set = ChainSet::build(
            Arc::new(BoxLlmProvider::new(ScriptedProvider::new("QA"))),
            Arc::new(BoxRetriever::new(StaticRetriever::new(&[]))),
            settings(),
        );
        assert!(set.qa.retriever.is_some());
        assert!(set.guide.retriever.is_some());
        assert!(set.form_filler.retriever.is_none());
        assert!(set.router.retriever.is_none());
        assert_eq!(set.router.kind(), ChainKind::Router);
        assert_eq!(set.qa.template().fields().len(), 3);
    }
}
