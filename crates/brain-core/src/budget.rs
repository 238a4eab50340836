//! Token counting and the per-message budget ceiling.
//!
//! Counts use the `cl100k_base` byte-pair encoding. The encoder is loaded
//! once per [`BudgetGuard`] and shared between clones.

use std::fmt;
use std::sync::Arc;

use tiktoken_rs::CoreBPE;

use crate::error::BrainError;

/// Default ceiling for a single user message.
pub const DEFAULT_REQUEST_MAX_TOKENS: usize = 500;

/// Result of a budget check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetVerdict {
    /// Within the ceiling.
    Allowed { tokens: usize },
    /// Over the ceiling; must not be forwarded.
    Rejected { tokens: usize, ceiling: usize },
}

impl BudgetVerdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, BudgetVerdict::Allowed { .. })
    }
}

/// Pre-flight check on the new message text alone.
#[derive(Clone)]
pub struct BudgetGuard {
    bpe: Arc<CoreBPE>,
    ceiling: usize,
}

impl fmt::Debug for BudgetGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BudgetGuard")
            .field("encoding", &"cl100k_base")
            .field("ceiling", &self.ceiling)
            .finish()
    }
}

impl BudgetGuard {
    /// Load the encoder and set the ceiling.
    pub fn new(ceiling: usize) -> Result<Self, BrainError> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| {
            BrainError::Configuration(format!("failed to load cl100k_base encoding: {}", e))
        })?;
        Ok(Self {
            bpe: Arc::new(bpe),
            ceiling,
        })
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Number of tokens `text` encodes to.
    pub fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }

    /// Compare the token count for `text` against the ceiling.
    pub fn check(&self, text: &str) -> BudgetVerdict {
        let tokens = self.count_tokens(text);
        if tokens > self.ceiling {
            BudgetVerdict::Rejected {
                tokens,
                ceiling: self.ceiling,
            }
        } else {
            BudgetVerdict::Allowed { tokens }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard(ceiling: usize) -> BudgetGuard {
        BudgetGuard::new(ceiling).unwrap()
    }

    #[test]
    fn test_count_empty() {
        assert_eq!(guard(1).count_tokens(""), 0);
    }

    #[test]
    fn test_count_is_stable_across_guards() {
        let text = "Сколько будет 2+2? How much is two plus two?";
        let first = guard(10).count_tokens(text);
        let second = guard(500).count_tokens(text);
        assert!(first > 0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_longer_text_costs_more() {
        let guard = guard(DEFAULT_REQUEST_MAX_TOKENS);
        let short = guard.count_tokens("Что такое производная?");
        let long = guard.count_tokens("Что такое производная? Объясни на примере параболы.");
        assert!(long > short);
    }

    #[test]
    fn test_guard_boundary() {
        // "hello" and " world" are one token each
        assert_eq!(
            guard(2).check("hello world"),
            BudgetVerdict::Allowed { tokens: 2 }
        );
        assert_eq!(
            guard(1).check("hello world"),
            BudgetVerdict::Rejected {
                tokens: 2,
                ceiling: 1
            }
        );
    }

    #[test]
    fn test_default_ceiling_rejects_long_message() {
        let guard = guard(DEFAULT_REQUEST_MAX_TOKENS);
        assert!(guard.check("Сколько будет 2+2?").is_allowed());
        assert!(!guard.check(&" word".repeat(600)).is_allowed());
    }

    #[test]
    fn test_clones_share_the_encoder() {
        let guard = guard(3);
        let clone = guard.clone();
        assert!(Arc::ptr_eq(&guard.bpe, &clone.bpe));
        assert_eq!(clone.ceiling(), 3);
    }
}
