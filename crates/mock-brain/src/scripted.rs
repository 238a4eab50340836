//! Scripted brain: replays queued outcomes and records what it was asked.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use brain_core::{async_trait, CompletionClient, CompletionOutcome, Prompt};
use tokio::sync::Mutex;

/// Plays back outcomes in the order they were queued.
///
/// When the queue runs dry it answers with the fallback outcome. Every
/// prompt it receives is kept for later inspection.
pub struct ScriptedBrain {
    queue: Mutex<VecDeque<CompletionOutcome>>,
    fallback: CompletionOutcome,
    prompts: Mutex<Vec<Prompt>>,
    calls: AtomicUsize,
}

impl Default for ScriptedBrain {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedBrain {
    /// An empty script whose fallback reply is `"ok"`.
    pub fn new() -> Self {
        Self::with_fallback(CompletionOutcome::Success("ok".to_string()))
    }

    pub fn with_fallback(fallback: CompletionOutcome) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback,
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Build a script from a list of outcomes.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = CompletionOutcome>) -> Self {
        let brain = Self::new();
        Self {
            queue: Mutex::new(outcomes.into_iter().collect()),
            ..brain
        }
    }

    /// Queue another outcome.
    pub async fn push(&self, outcome: CompletionOutcome) {
        self.queue.lock().await.push_back(outcome);
    }

    /// Queue a successful reply.
    pub async fn push_reply(&self, text: impl Into<String>) {
        self.push(CompletionOutcome::Success(text.into())).await;
    }

    /// Number of `ask` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every prompt received, oldest first.
    pub async fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().await.clone()
    }

    /// The most recent prompt, if any.
    pub async fn last_prompt(&self) -> Option<Prompt> {
        self.prompts.lock().await.last().cloned()
    }
}

#[async_trait]
impl CompletionClient for ScriptedBrain {
    async fn ask(&self, prompt: &Prompt) -> CompletionOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().await.push(prompt.clone());
        self.queue
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }

    fn name(&self) -> &str {
        "ScriptedBrain"
    }
}
