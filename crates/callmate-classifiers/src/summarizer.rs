//! Conversation recap over the buffered context

use crate::config::SummaryConfig;
use std::time::Duration;

/// Recap returned for a conversation with no buffered utterances
pub const EMPTY_SUMMARY: &str = "No conversation to summarise.";

/// Produces a short human-readable recap of buffered utterances
#[derive(Debug, Clone)]
pub struct Summarizer {
    preview_chars: usize,
    latency: Duration,
}

impl Summarizer {
    pub fn new(config: &SummaryConfig) -> Self {
        Self {
            preview_chars: config.preview_chars.max(1),
            latency: config.latency(),
        }
    }

    /// Summarize after the simulated latency
    pub async fn summarize(&self, utterances: &[String]) -> String {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.recap(utterances)
    }

    /// Recap quoting the first and last utterance and the total count
    pub fn recap(&self, utterances: &[String]) -> String {
        let (first, last) = match (utterances.first(), utterances.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return EMPTY_SUMMARY.to_string(),
        };

        let count = utterances.len();
        if count == 1 {
            return format!(
                "1 utterance in context. Customer said: \"{}\".",
                self.preview(first)
            );
        }

        format!(
            "{count} utterances in context. Opened with: \"{}\". Latest: \"{}\".",
            self.preview(first),
            self.preview(last)
        )
    }

    fn preview(&self, text: &str) -> String {
        let trimmed = text.trim();
        match trimmed.char_indices().nth(self.preview_chars) {
            Some((cut, _)) => format!("{}...", &trimmed[..cut]),
            None => trimmed.to_string(),
        }
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(&SummaryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summarizer() -> Summarizer {
        Summarizer::new(&SummaryConfig {
            preview_chars: 10,
            latency_ms: 0,
        })
    }

    #[tokio::test]
    async fn test_empty_summary_exact_text() {
        assert_eq!(summarizer().summarize(&[]).await, "No conversation to summarise.");
    }

    #[test]
    fn test_recap_mentions_first_last_and_count() {
        let utterances = vec![
            "my parcel never arrived".to_string(),
            "middle".to_string(),
            "ok thanks".to_string(),
        ];
        let recap = summarizer().recap(&utterances);

        assert!(recap.starts_with("3 utterances"));
        assert!(recap.contains("\"my parcel ...\""));
        assert!(recap.contains("\"ok thanks\""));
        assert!(!recap.contains("middle"));
    }

    #[test]
    fn test_single_utterance() {
        let recap = summarizer().recap(&["hello".to_string()]);
        assert_eq!(recap, "1 utterance in context. Customer said: \"hello\".");
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let recap = summarizer().recap(&["ééééééééééééé".to_string()]);
        assert!(recap.contains("\"éééééééééé...\""));
    }

    #[tokio::test(start_paused = true)]
    async fn test_summarize_waits_for_latency() {
        let summarizer = Summarizer::new(&SummaryConfig {
            preview_chars: 40,
            latency_ms: 150,
        });
        let start = tokio::time::Instant::now();
        summarizer.summarize(&["hi".to_string()]).await;
        assert!(start.elapsed() >= Duration::from_millis(150));
    }
}
