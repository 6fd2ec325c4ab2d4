//! Case-insensitive keyword matching shared by the agents and the rollup

use aho_corasick::AhoCorasick;
use callmate_core::Result;

/// Substring membership test over a fixed keyword set (ASCII case-insensitive)
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    matcher: AhoCorasick,
    keywords: Vec<String>,
}

impl KeywordMatcher {
    /// Build a matcher; empty keywords are rejected since they match everything
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        if keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(callmate_core::Error::config("keyword lists must not contain empty entries"));
        }

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&keywords)
            .map_err(|e| {
                callmate_core::Error::classifier(format!("Failed to build keyword matcher: {e}"))
            })?;

        Ok(Self { matcher, keywords })
    }

    /// Whether any keyword occurs in `text`
    pub fn is_match(&self, text: &str) -> bool {
        !self.keywords.is_empty() && self.matcher.is_match(text)
    }

    /// Keywords found in `text`, deduplicated, in keyword-list order
    pub fn matched<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let mut hits = vec![false; self.keywords.len()];
        for mat in self.matcher.find_overlapping_iter(text) {
            hits[mat.pattern().as_usize()] = true;
        }
        self.keywords
            .iter()
            .zip(hits)
            .filter_map(|(k, hit)| hit.then_some(k.as_str()))
            .collect()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}
