//! PII redaction
//!
//! Patterns are applied one after another to the progressively redacted
//! text, in [`PiiKind`] order: email, card, phone, generic number, known
//! name. A card-like digit run is therefore masked as `[CARD]` before the
//! generic number pattern can see it. Replacement tokens contain no digits
//! and no `@`, so running the redactor over its own output changes nothing.

use callmate_core::{Error, PiiKind, Result, Utterance};
use regex::{NoExpand, Regex};
use std::collections::BTreeMap;

const EMAIL_PATTERN: &str = r"(?i)\b[\w.+-]+@[\w-]+(?:\.[\w-]+)+\b";
const CARD_PATTERN: &str = r"\b(?:\d[ -]*?){13,16}\b";
// Ten digits with any single separators, optionally preceded by a country
// code; a leading `+` is consumed with it.
const PHONE_PATTERN: &str = r"(?:\B\+\d{1,3}[- .]?|\b(?:\d{1,3}[- .]?)?)(?:\d[- .]?){9}\d\b";
const NUMBER_PATTERN: &str = r"\b\d{6,}\b";

/// Outcome of redacting one piece of text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redaction {
    /// Text with every match replaced by its kind's token
    pub redacted: String,

    /// Matched spans per kind, in match order. For observability only.
    pub found: BTreeMap<PiiKind, Vec<String>>,
}

impl Redaction {
    /// Whether anything was replaced
    pub fn has_pii(&self) -> bool {
        !self.found.is_empty()
    }

    /// Match counts per kind; safe to log
    pub fn counts(&self) -> BTreeMap<PiiKind, usize> {
        self.found.iter().map(|(kind, matches)| (*kind, matches.len())).collect()
    }
}

/// Regex-based PII redactor
#[derive(Debug, Clone)]
pub struct PiiRedactor {
    patterns: Vec<(PiiKind, Regex)>,
}

impl PiiRedactor {
    /// Create a redactor masking the built-in patterns plus `known_names`
    pub fn new<S: AsRef<str>>(known_names: &[S]) -> Result<Self> {
        let mut patterns = vec![
            (PiiKind::Email, compile(PiiKind::Email, EMAIL_PATTERN)?),
            (PiiKind::Card, compile(PiiKind::Card, CARD_PATTERN)?),
            (PiiKind::Phone, compile(PiiKind::Phone, PHONE_PATTERN)?),
            (PiiKind::Number, compile(PiiKind::Number, NUMBER_PATTERN)?),
        ];

        if let Some(pattern) = name_pattern(known_names)? {
            patterns.push((PiiKind::Name, compile(PiiKind::Name, &pattern)?));
        }

        Ok(Self { patterns })
    }

    /// Redact `text`, returning the scrubbed text and what was found
    pub fn redact(&self, text: &str) -> Redaction {
        let mut current = text.to_string();
        let mut found = BTreeMap::new();

        for (kind, regex) in &self.patterns {
            let matches: Vec<String> = regex
                .find_iter(&current)
                .map(|m| m.as_str().to_string())
                .collect();
            if matches.is_empty() {
                continue;
            }

            current = regex
                .replace_all(&current, NoExpand(kind.token()))
                .into_owned();
            found.insert(*kind, matches);
        }

        let redaction = Redaction {
            redacted: current,
            found,
        };
        if redaction.has_pii() {
            tracing::info!(counts = ?redaction.counts(), "redacted PII");
        }
        redaction
    }

    /// Redact and wrap the result as an [`Utterance`]
    pub fn redact_utterance(&self, conversation_id: &str, text: &str) -> Utterance {
        let redaction = self.redact(text);
        Utterance {
            conversation_id: conversation_id.to_string(),
            raw_text: text.to_string(),
            pii_found: redaction.found.keys().copied().collect(),
            redacted_text: redaction.redacted,
        }
    }
}

impl Default for PiiRedactor {
    fn default() -> Self {
        Self {
            patterns: vec![
                (PiiKind::Email, Regex::new(EMAIL_PATTERN).expect("valid email pattern")),
                (PiiKind::Card, Regex::new(CARD_PATTERN).expect("valid card pattern")),
                (PiiKind::Phone, Regex::new(PHONE_PATTERN).expect("valid phone pattern")),
                (PiiKind::Number, Regex::new(NUMBER_PATTERN).expect("valid number pattern")),
            ],
        }
    }
}

fn compile(kind: PiiKind, pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| Error::redaction(format!("Failed to compile {kind} regex: {e}")))
}

/// `(?i)\b(?:rajat\s+shinde|...)\b`, or `None` when no names are configured
fn name_pattern<S: AsRef<str>>(known_names: &[S]) -> Result<Option<String>> {
    let mut alternatives = Vec::new();

    for name in known_names {
        let words: Vec<String> = name.as_ref().split_whitespace().map(regex::escape).collect();
        if words.is_empty() {
            return Err(Error::redaction("known names must not be empty"));
        }

        let joined = words.join(" ");
        if PiiKind::ALL
            .iter()
            .any(|kind| kind.label().eq_ignore_ascii_case(&joined))
        {
            return Err(Error::redaction(format!(
                "known name '{}' collides with a redaction token",
                name.as_ref()
            )));
        }

        alternatives.push(words.join(r"\s+"));
    }

    if alternatives.is_empty() {
        return Ok(None);
    }
    Ok(Some(format!(r"(?i)\b(?:{})\b", alternatives.join("|"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redactor() -> PiiRedactor {
        PiiRedactor::new(&["Rajat Shinde"]).unwrap()
    }

    #[test]
    fn test_email_card_and_phone_redacted() {
        let result = redactor().redact(
            "Mail john.doe@example.com, card 4111111111111111, call 9876543210",
        );

        assert_eq!(result.redacted, "Mail [EMAIL], card [CARD], call [PHONE]");
        assert_eq!(result.found[&PiiKind::Email], vec!["john.doe@example.com"]);
        assert_eq!(result.found[&PiiKind::Card], vec!["4111111111111111"]);
        assert_eq!(result.found[&PiiKind::Phone], vec!["9876543210"]);
        assert!(!result.found.contains_key(&PiiKind::Number));
    }

    #[test]
    fn test_grouped_card_number() {
        let result = redactor().redact("it is 4111 1111 1111 1111 ok");
        assert_eq!(result.redacted, "it is [CARD] ok");

        let result = redactor().redact("it is 4111-1111-1111-1111");
        assert_eq!(result.redacted, "it is [CARD]");
    }

    #[test]
    fn test_card_wins_over_generic_number() {
        let result = redactor().redact("account 4111111111111111");
        assert_eq!(result.redacted, "account [CARD]");
        assert_eq!(result.counts(), BTreeMap::from([(PiiKind::Card, 1)]));
    }

    #[test]
    fn test_phone_with_separators() {
        let result = redactor().redact("reach me on 555-123-4567 tonight");
        assert_eq!(result.redacted, "reach me on [PHONE] tonight");
    }

    #[test]
    fn test_email_with_hyphenated_or_multi_label_domain() {
        let result = redactor().redact("mail jane@my-company.com now");
        assert_eq!(result.redacted, "mail [EMAIL] now");
        assert_eq!(result.found[&PiiKind::Email], vec!["jane@my-company.com"]);

        let result = redactor().redact("mail john@mail.example.com now");
        assert_eq!(result.redacted, "mail [EMAIL] now");

        let result = redactor().redact("write to first.last+tag@sub.my-co.co.uk.");
        assert_eq!(result.redacted, "write to [EMAIL].");
    }

    #[test]
    fn test_phone_with_five_five_grouping() {
        let result = redactor().redact("call 98765 43210 now");
        assert_eq!(result.redacted, "call [PHONE] now");

        let result = redactor().redact("call +91 98765-43210 now");
        assert_eq!(result.redacted, "call [PHONE] now");
        assert_eq!(result.found[&PiiKind::Phone], vec!["+91 98765-43210"]);
    }

    #[test]
    fn test_country_code_plus_is_consumed() {
        let result = redactor().redact("dial +1 555-123-4567 today");
        assert_eq!(result.redacted, "dial [PHONE] today");

        let result = redactor().redact("+91 9876543210");
        assert_eq!(result.redacted, "[PHONE]");
    }

    #[test]
    fn test_generic_number() {
        let result = redactor().redact("order 12345678 and ticket 123");
        assert_eq!(result.redacted, "order [NUMBER] and ticket 123");
    }

    #[test]
    fn test_known_name_case_insensitive() {
        let result = redactor().redact("this is rajat   SHINDE speaking");
        assert_eq!(result.redacted, "this is [NAME] speaking");
    }

    #[test]
    fn test_all_occurrences_replaced() {
        let result = redactor().redact("a@b.com or c@d.org");
        assert_eq!(result.redacted, "[EMAIL] or [EMAIL]");
        assert_eq!(result.found[&PiiKind::Email].len(), 2);
    }

    #[test]
    fn test_clean_text_untouched() {
        let result = redactor().redact("my parcel is late");
        assert_eq!(result.redacted, "my parcel is late");
        assert!(!result.has_pii());

        assert_eq!(redactor().redact("").redacted, "");
    }

    #[test]
    fn test_redaction_is_idempotent() {
        let redactor = redactor();
        for text in [
            "I am not happy, my card number is 4111111111111111",
            "Rajat Shinde, rajat@mail.com, +91 9876543210, acct 00123456",
            "1234 5678 9012 3456789012 and 987 4111 1111 1111 1111",
            "[CARD] [EMAIL] already redacted 42",
        ] {
            let once = redactor.redact(text).redacted;
            let twice = redactor.redact(&once).redacted;
            assert_eq!(once, twice, "input: {text}");
        }
    }

    #[test]
    fn test_utterance_records_kinds() {
        let utterance = redactor().redact_utterance("call-7", "email me at x@y.io");
        assert_eq!(utterance.conversation_id, "call-7");
        assert_eq!(utterance.redacted_text, "email me at [EMAIL]");
        assert!(utterance.pii_redacted());
        assert!(utterance.pii_found.contains(&PiiKind::Email));
    }

    #[test]
    fn test_name_collision_rejected() {
        assert!(PiiRedactor::new(&["number"]).is_err());
        assert!(PiiRedactor::new(&[" "]).is_err());
    }

    #[test]
    fn test_default_has_no_name_pattern() {
        let result = PiiRedactor::default().redact("Rajat Shinde");
        assert_eq!(result.redacted, "Rajat Shinde");
    }
}
