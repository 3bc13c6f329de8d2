//! Intent routing labels and the case classification heuristic.

use std::fmt;

/// Handling path chosen by the router chain.
///
/// The router is a free-text generator, so its output is parsed leniently:
/// a label *containing* one of the known tokens selects that path. Anything
/// else is `Unknown`, which the chat service maps to the Q&A path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Guide,
    FormFiller,
    Qa,
    Unknown,
}

impl Intent {
    /// Parse the raw router output.
    ///
    /// Tokens are checked in priority order GUIDE, FORM_FILLER, QA, so an
    /// output mentioning several tools resolves to the first of those.
    pub fn from_router_output(label: &str) -> Self {
        if label.contains("GUIDE") {
            Intent::Guide
        } else if label.contains("FORM_FILLER") {
            Intent::FormFiller
        } else if label.contains("QA") {
            Intent::Qa
        } else {
            Intent::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Guide => "GUIDE",
            Intent::FormFiller => "FORM_FILLER",
            Intent::Qa => "QA",
            Intent::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Legal framework a case is investigated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Protection of Children from Sexual Offences Act.
    Pocso,
    /// Bharatiya Nyaya Sanhita, general offences.
    BnsGeneral,
}

impl Classification {
    /// Keyword heuristic over the raw message.
    ///
    /// Case-sensitive substring match on "minor" or "age".
    pub fn from_message(message: &str) -> Self {
        if message.contains("minor") || message.contains("age") {
            Classification::Pocso
        } else {
            Classification::BnsGeneral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Pocso => "POCSO",
            Classification::BnsGeneral => "BNS_General",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_router_tokens() {
        assert_eq!(Intent::from_router_output("GUIDE"), Intent::Guide);
        assert_eq!(Intent::from_router_output("FORM_FILLER"), Intent::FormFiller);
        assert_eq!(Intent::from_router_output("QA"), Intent::Qa);
    }

    #[test]
    fn test_router_token_embedded_in_prose() {
        assert_eq!(
            Intent::from_router_output("The tool is: \"GUIDE\"."),
            Intent::Guide
        );
        assert_eq!(
            Intent::from_router_output("  FORM_FILLER\n"),
            Intent::FormFiller
        );
    }

    #[test]
    fn test_guide_wins_over_other_tokens() {
        assert_eq!(
            Intent::from_router_output("FORM_FILLER or GUIDE"),
            Intent::Guide
        );
        assert_eq!(
            Intent::from_router_output("QA, maybe FORM_FILLER"),
            Intent::FormFiller
        );
    }

    #[test]
    fn test_unrecognized_output_is_unknown() {
        assert_eq!(Intent::from_router_output(""), Intent::Unknown);
        assert_eq!(Intent::from_router_output("guide"), Intent::Unknown);
        assert_eq!(Intent::from_router_output("I am not sure."), Intent::Unknown);
    }

    #[test]
    fn test_intent_display() {
        assert_eq!(Intent::FormFiller.to_string(), "FORM_FILLER");
        assert_eq!(Intent::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_classification_keywords() {
        assert_eq!(
            Classification::from_message("A minor girl was found, what's next?"),
            Classification::Pocso
        );
        assert_eq!(
            Classification::from_message("victim's age is 15"),
            Classification::Pocso
        );
        assert_eq!(
            Classification::from_message("Chain snatching near the station"),
            Classification::BnsGeneral
        );
    }

    #[test]
    fn test_classification_substring_not_word() {
        // "page" and "damage" contain "age".
        assert_eq!(
            Classification::from_message("property damage reported"),
            Classification::Pocso
        );
    }

    #[test]
    fn test_classification_is_case_sensitive() {
        assert_eq!(
            Classification::from_message("MINOR involved, AGE unknown"),
            Classification::BnsGeneral
        );
    }

    #[test]
    fn test_classification_labels() {
        assert_eq!(Classification::Pocso.to_string(), "POCSO");
        assert_eq!(Classification::BnsGeneral.to_string(), "BNS_General");
    }
}
