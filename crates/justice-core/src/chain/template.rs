//! Prompt templates with `{field}` placeholders.
//!
//! A placeholder is an identifier (`[A-Za-z_][A-Za-z0-9_]*`) wrapped in
//! braces. Any other brace is literal text, so form templates pasted by
//! officers can carry braces without breaking rendering. Substitution is a
//! single pass: values are never re-scanned for placeholders.

use justice_types::error::ChainError;

use super::ChainInput;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// A parsed prompt template.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parse a template source string.
    pub fn new(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) if is_identifier(&after[..end]) => {
                    literal.push_str(&rest[..start]);
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(after[..end].to_string()));
                    rest = &after[end + 1..];
                }
                _ => {
                    literal.push_str(&rest[..=start]);
                    rest = after;
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Placeholder names in first-appearance order, without duplicates.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Field(name) = segment {
                if !fields.contains(&name.as_str()) {
                    fields.push(name);
                }
            }
        }
        fields
    }

    /// Substitute every placeholder from `input`.
    ///
    /// Fails on the first placeholder with no value. Extra input fields are
    /// ignored.
    pub fn render(&self, input: &ChainInput) -> Result<String, ChainError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(name) => {
                    let value = input
                        .get(name)
                        .ok_or_else(|| ChainError::MissingField(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_fields() {
        let template = PromptTemplate::new("Q: {question}\nH: {chat_history}");
        let input = ChainInput::new()
            .with("question", "What is theft?")
            .with("chat_history", "");
        assert_eq!(template.render(&input).unwrap(), "Q: What is theft?\nH: ");
    }

    #[test]
    fn test_fields_in_order_without_duplicates() {
        let template = PromptTemplate::new("{a} {b} {a} {c_1}");
        assert_eq!(template.fields(), vec!["a", "b", "c_1"]);
    }

    #[test]
    fn test_missing_field_is_error() {
        let template = PromptTemplate::new("Case: {classification}");
        let err = template.render(&ChainInput::new()).unwrap_err();
        assert!(matches!(err, ChainError::MissingField(ref f) if f == "classification"));
    }

    #[test]
    fn test_non_identifier_braces_are_literal() {
        let template = PromptTemplate::new("json {\"a\": 1} and { spaced } and {} then {x}");
        assert_eq!(template.fields(), vec!["x"]);
        let rendered = template.render(&ChainInput::new().with("x", "1")).unwrap();
        assert_eq!(rendered, "json {\"a\": 1} and { spaced } and {} then 1");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let template = PromptTemplate::new("{question}");
        let input = ChainInput::new()
            .with("question", "Name: {chat_history}")
            .with("chat_history", "SHOULD NOT APPEAR");
        assert_eq!(template.render(&input).unwrap(), "Name: {chat_history}");
    }

    #[test]
    fn test_unclosed_brace_is_literal() {
        let template = PromptTemplate::new("open { brace {question");
        assert!(template.fields().is_empty());
        assert_eq!(
            template.render(&ChainInput::new()).unwrap(),
            "open { brace {question"
        );
    }
}
