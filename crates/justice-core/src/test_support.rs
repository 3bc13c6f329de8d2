//! In-memory provider and retriever doubles shared by the unit tests.

use std::sync::{Arc, Mutex};

use justice_types::document::DocumentFragment;
use justice_types::error::RetrievalError;
use justice_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason, Usage};

use crate::chain::GenerationSettings;
use crate::llm::provider::LlmProvider;
use crate::retrieval::retriever::Retriever;

pub fn settings() -> GenerationSettings {
    GenerationSettings {
        model: "test-model".to_string(),
        max_tokens: 256,
        temperature: None,
    }
}

/// Answers by recognizing which template produced the prompt.
///
/// Router prompts get the configured label back; the three answer chains
/// get a fixed string per chain. Every prompt and request is recorded.
pub struct ScriptedProvider {
    router_label: Arc<Mutex<String>>,
    prompts: Arc<Mutex<Vec<String>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    fail: bool,
}

impl ScriptedProvider {
    pub const QA_ANSWER: &'static str = "Theft is punishable under Section 303.";
    pub const FORM_ANSWER: &'static str = "Name: Ravi\nAge: NOT MENTIONED";
    pub const GUIDE_ANSWER: &'static str = "What is the age of the victim?";

    pub fn new(router_label: &str) -> Self {
        Self {
            router_label: Arc::new(Mutex::new(router_label.to_string())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("QA")
        }
    }

    pub fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        self.prompts.clone()
    }

    pub fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        self.requests.clone()
    }

    /// Handle for changing the router's answer between turns.
    pub fn router_label(&self) -> Arc<Mutex<String>> {
        self.router_label.clone()
    }

    fn answer_for(&self, prompt: &str) -> String {
        if prompt.starts_with("Your job is to classify the user's intent") {
            self.router_label.lock().unwrap().clone()
        } else if prompt.contains("### ROLE: Q&A Expert ###") {
            Self::QA_ANSWER.to_string()
        } else if prompt.contains("### ROLE: Form Expert ###") {
            Self::FORM_ANSWER.to_string()
        } else if prompt.contains("### ROLE: Investigative Guide ###") {
            Self::GUIDE_ANSWER.to_string()
        } else {
            String::new()
        }
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        if self.fail {
            return Err(LlmError::Provider {
                message: "connection refused".to_string(),
            });
        }

        let prompt = request.prompt.clone();
        self.prompts.lock().unwrap().push(prompt.clone());
        self.requests.lock().unwrap().push(request.clone());

        Ok(CompletionResponse {
            id: format!("resp-{}", self.prompts.lock().unwrap().len()),
            content: self.answer_for(&prompt),
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }
}

/// Returns the same fragments for every query and records the queries.
pub struct StaticRetriever {
    fragments: Vec<DocumentFragment>,
    queries: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl StaticRetriever {
    pub fn new(texts: &[&str]) -> Self {
        let fragments = texts
            .iter()
            .enumerate()
            .map(|(i, text)| DocumentFragment {
                source: "bns.md".to_string(),
                chunk_index: i as u32,
                text: text.to_string(),
                distance: 0.1 * (i as f32 + 1.0),
            })
            .collect();
        Self {
            fragments,
            queries: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(&[])
        }
    }

    pub fn queries(&self) -> Arc<Mutex<Vec<String>>> {
        self.queries.clone()
    }
}

impl Retriever for StaticRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<DocumentFragment>, RetrievalError> {
        if self.fail {
            return Err(RetrievalError::Store("table not found".to_string()));
        }
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.fragments.clone())
    }
}
