//! The conversation state machine.

use std::sync::Arc;

use brain_core::{
    hash_prompt, BudgetGuard, BudgetVerdict, ChatState, CompletionClient, CompletionOutcome,
    ConversationKey, HistoryMessage, PromptAssembler,
};
use database::{ConversationStore, ProfileFields};
use tracing::{debug, error, info, warn};

use crate::catalog::{Difficulty, Subject};
use crate::commands::Command;
use crate::config::ControllerConfig;
use crate::diagnostics::{WarningLog, LOG_ATTACHMENT_NAME};
use crate::error::OrchestratorError;
use crate::keyboard::{Attachment, Reply};
use crate::locks::UserLocks;
use crate::replies;

/// Drives each (user, chat) pair through
/// `not_chat -> set_subject -> set_difficult -> chat -> not_chat`.
///
/// All work for one user is serialized; the store is the only place state
/// lives, so a restarted controller picks up where the previous one left off.
pub struct ConversationController<S, C>
where
    S: ConversationStore + ?Sized,
    C: CompletionClient + ?Sized,
{
    store: Arc<S>,
    client: Arc<C>,
    assembler: PromptAssembler,
    budget: BudgetGuard,
    config: ControllerConfig,
    warning_log: Option<WarningLog>,
    locks: UserLocks,
}

impl<S, C> ConversationController<S, C>
where
    S: ConversationStore + ?Sized,
    C: CompletionClient + ?Sized,
{
    /// Build a controller. Fails only if the tokenizer cannot be loaded.
    pub fn new(
        store: Arc<S>,
        client: Arc<C>,
        config: ControllerConfig,
    ) -> Result<Self, OrchestratorError> {
        let assembler = PromptAssembler::new(config.preamble.clone());
        let budget = BudgetGuard::new(config.request_max_tokens)?;
        info!(
            "Conversation controller ready (client: {}, budget: {} tokens, timeout: {:?})",
            client.name(),
            budget.ceiling(),
            config.completion_timeout
        );
        info!("Preamble sha256: {}", hash_prompt(assembler.preamble()));
        if config.operator_id.is_none() {
            warn!("No operator identity configured; /debug is disabled");
        }

        Ok(Self {
            store,
            client,
            assembler,
            budget,
            warning_log: config.warning_log.clone().map(WarningLog::new),
            config,
            locks: UserLocks::new(),
        })
    }

    /// Handle one inbound text message and produce the reply.
    ///
    /// Never fails: storage problems are logged and answered with the fixed
    /// apology, leaving the conversation state where it was.
    pub async fn handle(&self, user_id: i64, chat_id: i64, text: &str) -> Reply {
        let _guard = self.locks.acquire(user_id).await;
        let key = ConversationKey::new(user_id, chat_id);

        let state = match self.store.get_state(key).await {
            Ok(state) => state,
            Err(e) => {
                error!(
                    user = user_id,
                    chat = chat_id,
                    "Failed to load conversation state: {}", e
                );
                return Reply::new(replies::APOLOGY, ChatState::NotChat);
            }
        };
        debug!(
            user = user_id,
            chat = chat_id,
            state = %state,
            "Handling message"
        );

        match self.dispatch(key, state, text).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(
                    user = user_id,
                    chat = chat_id,
                    state = %state,
                    "Turn failed: {}", e
                );
                Reply::new(replies::APOLOGY, state)
            }
        }
    }

    async fn dispatch(
        &self,
        key: ConversationKey,
        state: ChatState,
        text: &str,
    ) -> Result<Reply, OrchestratorError> {
        let command = Command::parse(text);
        if command == Command::Help {
            return Ok(Reply::new(replies::HELP_TEXT, state));
        }

        match (state, command) {
            (state, Command::EndChat) if state.is_active() => self.end_conversation(key).await,
            (ChatState::NotChat, Command::NewChat) => {
                self.transition(key, ChatState::SetSubject).await?;
                Ok(Reply::new(replies::CHOOSE_SUBJECT, ChatState::SetSubject))
            }
            (ChatState::NotChat, Command::Debug) if self.is_operator(key.user_id) => {
                self.dump_warning_log().await
            }
            (ChatState::NotChat, _) => Ok(self.acknowledge()),
            (ChatState::SetSubject, _) => self.select_subject(key, text).await,
            (ChatState::SetDifficult, _) => self.select_difficulty(key, text).await,
            (ChatState::Chat, _) => self.chat_turn(key, text).await,
        }
    }

    fn is_operator(&self, user_id: i64) -> bool {
        self.config.operator_id == Some(user_id)
    }

    fn acknowledge(&self) -> Reply {
        let text = replies::acknowledgment(&mut rand::thread_rng());
        Reply::new(text, ChatState::NotChat)
    }

    async fn transition(
        &self,
        key: ConversationKey,
        to: ChatState,
    ) -> Result<(), OrchestratorError> {
        self.store.set_state(key, to).await?;
        info!(user = key.user_id, chat = key.chat_id, "State -> {}", to);
        Ok(())
    }

    /// Store the selection and advance to `next` in one step.
    async fn record_selection(
        &self,
        key: ConversationKey,
        fields: ProfileFields,
        next: ChatState,
    ) -> Result<(), OrchestratorError> {
        let profile = self.store.record_selection(key, fields, next).await?;
        info!(
            user = key.user_id,
            chat = key.chat_id,
            profile = profile.id,
            "State -> {}", next
        );
        Ok(())
    }

    async fn select_subject(
        &self,
        key: ConversationKey,
        text: &str,
    ) -> Result<Reply, OrchestratorError> {
        let Some(subject) = Subject::from_label(text) else {
            return Ok(Reply::new(replies::INVALID_CHOICE, ChatState::SetSubject));
        };

        let fields = ProfileFields::subject(subject.code());
        self.record_selection(key, fields, ChatState::SetDifficult)
            .await?;
        Ok(Reply::new(
            replies::CHOOSE_DIFFICULTY,
            ChatState::SetDifficult,
        ))
    }

    async fn select_difficulty(
        &self,
        key: ConversationKey,
        text: &str,
    ) -> Result<Reply, OrchestratorError> {
        let Some(difficulty) = Difficulty::from_label(text) else {
            return Ok(Reply::new(replies::INVALID_CHOICE, ChatState::SetDifficult));
        };

        let fields = ProfileFields::difficult(difficulty.code());
        self.record_selection(key, fields, ChatState::Chat).await?;
        Ok(Reply::new(replies::ASK_QUESTION, ChatState::Chat))
    }

    async fn end_conversation(&self, key: ConversationKey) -> Result<Reply, OrchestratorError> {
        let deleted = self.store.end_session(key).await?;
        info!(
            user = key.user_id,
            chat = key.chat_id,
            "History cleared ({} records), state -> not_chat", deleted
        );
        Ok(Reply::new(replies::HISTORY_DELETED, ChatState::NotChat))
    }

    async fn chat_turn(
        &self,
        key: ConversationKey,
        text: &str,
    ) -> Result<Reply, OrchestratorError> {
        if let BudgetVerdict::Rejected { tokens, ceiling } = self.budget.check(text) {
            info!(
                user = key.user_id,
                "Message rejected: {} tokens over ceiling {}", tokens, ceiling
            );
            return Ok(Reply::new(replies::MESSAGE_TOO_LONG, ChatState::Chat));
        }

        let (subject, difficulty) = self.selections(key.user_id).await?;
        let history = self
            .store
            .get_ordered(key.user_id)
            .await?
            .iter()
            .map(|record| record.to_history_message())
            .collect::<Result<Vec<HistoryMessage>, _>>()?;

        let prompt = self
            .assembler
            .assemble(subject.prompt(), difficulty.prompt(), &history, text);

        let limit = self.config.completion_timeout;
        let outcome = match tokio::time::timeout(limit, self.client.ask(&prompt)).await {
            Ok(outcome) => outcome,
            Err(_) => CompletionOutcome::network(format!("no answer within {:?}", limit)),
        };

        match outcome {
            CompletionOutcome::Success(answer) => {
                self.store.append_turn(key.user_id, text, &answer).await?;
                debug!(
                    user = key.user_id,
                    "Turn stored ({} prior records)",
                    history.len()
                );
                Ok(Reply::new(answer, ChatState::Chat))
            }
            CompletionOutcome::Failure(reason) => {
                error!(
                    user = key.user_id,
                    chat = key.chat_id,
                    reason = %reason,
                    prompt = ?prompt.messages(),
                    "Completion failed"
                );
                Ok(Reply::new(replies::APOLOGY, ChatState::Chat))
            }
        }
    }

    async fn selections(&self, user_id: i64) -> Result<(Subject, Difficulty), OrchestratorError> {
        let (subject_code, difficulty_code) = self
            .store
            .get_profile(user_id)
            .await?
            .and_then(|profile| profile.selections())
            .ok_or(OrchestratorError::IncompleteProfile(user_id))?;

        let subject = Subject::from_code(subject_code).ok_or(OrchestratorError::UnknownCode {
            kind: "subject",
            code: subject_code,
        })?;
        let difficulty =
            Difficulty::from_code(difficulty_code).ok_or(OrchestratorError::UnknownCode {
                kind: "difficulty",
                code: difficulty_code,
            })?;
        Ok((subject, difficulty))
    }

    async fn dump_warning_log(&self) -> Result<Reply, OrchestratorError> {
        let contents = match &self.warning_log {
            Some(log) => log.read().await?,
            None => None,
        };

        Ok(match contents {
            Some(bytes) => Reply::new("", ChatState::NotChat).with_attachment(Attachment {
                file_name: LOG_ATTACHMENT_NAME.to_string(),
                bytes,
            }),
            None => Reply::new(replies::LOG_EMPTY, ChatState::NotChat),
        })
    }
}
