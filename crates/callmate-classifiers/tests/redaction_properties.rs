//! Property tests for the redactor

use callmate_classifiers::PiiRedactor;
use callmate_core::PiiKind;
use proptest::prelude::*;

fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("hello".to_string()),
        Just("my card number is".to_string()),
        Just("Rajat Shinde".to_string()),
        Just("not happy".to_string()),
        Just("[CARD]".to_string()),
        "[a-z]{1,8}",
        "[a-z]{1,6}@[a-z]{1,6}\\.(com|org|in)",
        "[a-z]{1,6}@[a-z]{1,6}-[a-z]{1,6}\\.(com|org|in)",
        "[a-z]{1,6}\\.[a-z]{1,6}@[a-z]{1,6}\\.[a-z]{1,6}\\.(com|co\\.uk)",
        "[0-9]{1,20}",
        "[0-9]{4} [0-9]{4} [0-9]{4} [0-9]{4}",
        "[0-9]{4}-[0-9]{4}-[0-9]{4}-[0-9]{4}",
        "\\+91 [0-9]{10}",
        "[0-9]{5} [0-9]{5}",
        "\\+91 [0-9]{5}-[0-9]{5}",
        "\\+1 [0-9]{3}-[0-9]{3}-[0-9]{4}",
        "[0-9]{3}-[0-9]{3}-[0-9]{4}",
    ]
}

fn sentence() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(fragment(), 0..8),
        prop::collection::vec(prop_oneof![Just(" "), Just(", "), Just(". ")], 8),
    )
        .prop_map(|(fragments, separators)| {
            let mut text = String::new();
            for (i, fragment) in fragments.iter().enumerate() {
                if i > 0 {
                    text.push_str(separators[i % separators.len()]);
                }
                text.push_str(fragment);
            }
            text
        })
}

proptest! {
    #[test]
    fn redact_is_idempotent(text in sentence()) {
        let redactor = PiiRedactor::new(&["Rajat Shinde"]).unwrap();
        let once = redactor.redact(&text).redacted;
        let twice = redactor.redact(&once);
        prop_assert_eq!(&twice.redacted, &once);
    }

    #[test]
    fn emails_and_names_never_survive(text in sentence()) {
        let redactor = PiiRedactor::new(&["Rajat Shinde"]).unwrap();
        let result = redactor.redact(&text);
        prop_assert!(!result.redacted.contains('@'));
        prop_assert!(!result.redacted.contains("Rajat Shinde"));
    }

    #[test]
    fn long_plain_digit_runs_never_survive(digits in "[0-9]{6,20}") {
        let redactor = PiiRedactor::default();
        let result = redactor.redact(&format!("ref {digits} end"));
        prop_assert!(!result.redacted.chars().any(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_redaction_coverage_literal() {
    let redactor = PiiRedactor::default();
    let result = redactor.redact(
        "email jane.roe@example.org card 5500 0000 0000 0004 phone 9123456780",
    );

    assert_eq!(result.redacted, "email [EMAIL] card [CARD] phone [PHONE]");
    for kind in [PiiKind::Email, PiiKind::Card, PiiKind::Phone] {
        assert!(result.found.contains_key(&kind), "missing {kind}");
    }
}
