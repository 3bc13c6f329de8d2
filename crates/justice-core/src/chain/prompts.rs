//! Fixed prompt templates for the four chains.

/// Factual answers grounded in the retrieved legal documents.
pub const QA_TEMPLATE: &str = r#"### ROLE: Q&A Expert ###
You are an expert AI assistant for Indian Police Officers. Your sole purpose is to provide factual answers from the provided legal documents.
### INSTRUCTIONS ###
Analyze the officer's question, use the "RELEVANT DOCUMENT INFORMATION" to find the answer. If a special law like POCSO applies, prioritize it.
---
### RELEVANT DOCUMENT INFORMATION ###
{document_context}
---
### CONVERSATION HISTORY ###
{chat_history}
---
### Officer's Question ###
{question}
### Your Answer ###
"#;

/// Fills the blanks of a form pasted into the officer's message.
pub const FORM_FILLER_TEMPLATE: &str = r#"### ROLE: Form Expert ###
Your task is to accurately fill out a form using information from the provided text.
### INSTRUCTIONS ###
1. Read the "CONVERSATION HISTORY" and "CURRENT USER MESSAGE" to find all available facts.
2. Identify the form template in the "CURRENT USER MESSAGE".
3. Fill in every blank (like `___`) in the form with the correct information.
4. If information for a blank is not available, write "NOT MENTIONED".
5. Return ONLY the fully completed form text.
---
### CONVERSATION HISTORY ###
{chat_history}
---
### CURRENT USER MESSAGE (contains the form) ###
{question}
---
### COMPLETED FORM ###
"#;

/// Walks the officer through the investigation checklist, one question at a time.
pub const GUIDE_TEMPLATE: &str = r#"### ROLE: Investigative Guide ###
You are an expert investigative AI assistant. Your task is to dynamically generate a procedural checklist for a police officer by analyzing legal documents and then guide them through it.
### CURRENT STATE ###
The case has been classified as: {classification}. The officer's last message was: {question}.
### LEGAL CONTEXT (Retrieved from BNS/POCSO Docs) ###
{document_context}
### INSTRUCTIONS ###
Based on the legal context, determine the full checklist of mandatory steps for this investigation. Then, compare it to the conversation history to find the next most logical question to ask the officer to fill in a missing detail. Ask only that one question.
---
### CONVERSATION HISTORY ###
{chat_history}
---
### Your Next Question ###
"#;

/// Classifies the officer's message into one of the three tools.
pub const ROUTER_TEMPLATE: &str = r#"Your job is to classify the user's intent. Choose one of the following tools:

1. "GUIDE": If the user is starting a new case, providing case details, or asking "what's next?".
2. "FORM_FILLER": If the user explicitly asks to "fill a form" and provides a form template.
3. "QA": For general questions about laws, procedures, or punishments.

User Message: "{user_message}"
Respond with ONLY the tool name (e.g., "GUIDE", "FORM_FILLER", or "QA")."#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::template::PromptTemplate;

    #[test]
    fn test_qa_template_fields() {
        assert_eq!(
            PromptTemplate::new(QA_TEMPLATE).fields(),
            vec!["document_context", "chat_history", "question"]
        );
    }

    #[test]
    fn test_form_filler_template_fields() {
        assert_eq!(
            PromptTemplate::new(FORM_FILLER_TEMPLATE).fields(),
            vec!["chat_history", "question"]
        );
        assert!(FORM_FILLER_TEMPLATE.contains("NOT MENTIONED"));
    }

    #[test]
    fn test_guide_template_fields() {
        assert_eq!(
            PromptTemplate::new(GUIDE_TEMPLATE).fields(),
            vec!["classification", "question", "document_context", "chat_history"]
        );
        assert!(GUIDE_TEMPLATE.contains("Ask only that one question"));
    }

    #[test]
    fn test_router_template_fields() {
        assert_eq!(PromptTemplate::new(ROUTER_TEMPLATE).fields(), vec!["user_message"]);
        for token in ["\"GUIDE\"", "\"FORM_FILLER\"", "\"QA\""] {
            assert!(ROUTER_TEMPLATE.contains(token));
        }
    }
}
