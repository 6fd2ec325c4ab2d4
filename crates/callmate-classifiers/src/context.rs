//! Bounded per-conversation context window
//!
//! Each conversation keeps its most recent utterances in a FIFO ring of
//! fixed capacity. The map is guarded by one lock and every conversation by
//! its own mutex, so appends to different conversations do not contend and
//! appends to the same conversation serialize in arrival order.

use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

type Window = Arc<Mutex<VecDeque<String>>>;

/// Shared store of recent redacted utterances, keyed by conversation id
#[derive(Debug)]
pub struct ContextStore {
    capacity: usize,
    conversations: RwLock<HashMap<String, Window>>,
}

impl ContextStore {
    /// Create a store; a capacity of zero is treated as one
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            conversations: RwLock::new(HashMap::new()),
        }
    }

    /// Append to a conversation, evicting the oldest entry once over capacity
    pub fn append_utterance(&self, conversation_id: &str, text: impl Into<String>) {
        let window = self.window(conversation_id);
        let mut window = window.lock();
        window.push_back(text.into());
        while window.len() > self.capacity {
            window.pop_front();
        }
    }

    /// Snapshot of a conversation, oldest first; empty for unknown ids
    pub fn get_context(&self, conversation_id: &str) -> Vec<String> {
        let window = self.conversations.read().get(conversation_id).cloned();
        match window {
            Some(window) => window.lock().iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of conversations seen so far
    pub fn conversation_count(&self) -> usize {
        self.conversations.read().len()
    }

    fn window(&self, conversation_id: &str) -> Window {
        if let Some(window) = self.conversations.read().get(conversation_id) {
            return Arc::clone(window);
        }

        let mut conversations = self.conversations.write();
        Arc::clone(
            conversations
                .entry(conversation_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(VecDeque::with_capacity(self.capacity)))),
        )
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_last_five_in_order() {
        let store = ContextStore::new(5);
        for i in 1..=7 {
            store.append_utterance("call-1", format!("u{i}"));
        }

        assert_eq!(store.get_context("call-1"), vec!["u3", "u4", "u5", "u6", "u7"]);
    }

    #[test]
    fn test_unknown_conversation_is_empty() {
        let store = ContextStore::default();
        assert!(store.get_context("missing").is_empty());
        assert_eq!(store.conversation_count(), 0);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = ContextStore::new(3);
        store.append_utterance("c", "one");

        let mut snapshot = store.get_context("c");
        snapshot.push("injected".to_string());
        store.append_utterance("c", "two");

        assert_eq!(store.get_context("c"), vec!["one", "two"]);
    }

    #[test]
    fn test_conversations_are_isolated() {
        let store = ContextStore::new(2);
        store.append_utterance("a", "a1");
        store.append_utterance("b", "b1");
        store.append_utterance("a", "a2");

        assert_eq!(store.get_context("a"), vec!["a1", "a2"]);
        assert_eq!(store.get_context("b"), vec!["b1"]);
        assert_eq!(store.conversation_count(), 2);
    }

    #[test]
    fn test_zero_capacity_behaves_as_one() {
        let store = ContextStore::new(0);
        store.append_utterance("c", "first");
        store.append_utterance("c", "second");
        assert_eq!(store.get_context("c"), vec!["second"]);
    }

    #[test]
    fn test_concurrent_appends_across_threads() {
        let store = Arc::new(ContextStore::new(100));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.append_utterance(&format!("call-{t}"), format!("{t}-{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for t in 0..4 {
            let context = store.get_context(&format!("call-{t}"));
            assert_eq!(context.len(), 50);
            assert!(context.iter().all(|u| u.starts_with(&format!("{t}-"))));
            assert_eq!(context.last().unwrap(), &format!("{t}-49"));
        }
    }
}
